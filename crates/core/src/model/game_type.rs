use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when resolving a game type from its wire name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameTypeError {
    #[error("unknown game type: {0:?}")]
    Unknown(String),
}

/// The three puzzle shapes a player can practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    MissingNumber,
    MoreOrLess,
    PartWhole,
}

impl GameType {
    /// Every playable game type, in menu order.
    pub const ALL: [GameType; 3] = [
        GameType::MissingNumber,
        GameType::MoreOrLess,
        GameType::PartWhole,
    ];

    /// Stable identifier used on the wire and in routes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameType::MissingNumber => "missing_number",
            GameType::MoreOrLess => "more_or_less",
            GameType::PartWhole => "part_whole",
        }
    }

    /// Human-readable title for menus and headings.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameType::MissingNumber => "Missing Number",
            GameType::MoreOrLess => "More or Less",
            GameType::PartWhole => "Part-Whole",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = GameTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|game_type| game_type.as_str() == s)
            .ok_or_else(|| GameTypeError::Unknown(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for game_type in GameType::ALL {
            assert_eq!(game_type.as_str().parse::<GameType>(), Ok(game_type));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "long_division".parse::<GameType>().unwrap_err();
        assert_eq!(err, GameTypeError::Unknown("long_division".into()));
    }
}
