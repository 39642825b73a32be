use std::sync::Arc;

use math_core::model::{StatsFilter, StatsReport};
use storage::AttemptRepository;

use crate::error::StatsError;

/// Loads the player's attempt statistics.
#[derive(Clone)]
pub struct StatsService {
    attempts: Arc<dyn AttemptRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    /// # Errors
    ///
    /// Returns `StatsError` when the backend cannot deliver the report; the
    /// failure is also logged.
    pub async fn fetch(&self, filter: StatsFilter) -> Result<StatsReport, StatsError> {
        self.attempts.fetch_stats(filter).await.map_err(|err| {
            log::error!("failed to load stats ({}): {err}", filter.as_query_value());
            StatsError::from(err)
        })
    }
}
