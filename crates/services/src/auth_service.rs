use std::sync::Arc;

use storage::{AuthRepository, Credentials, StorageError};

use crate::error::{AuthAction, AuthError};

/// Account flows in front of the backend's session endpoints.
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthRepository>) -> Self {
        Self { auth }
    }

    /// The user of an existing server session, if any.
    ///
    /// Failures are logged and treated as "not logged in".
    pub async fn current_user(&self) -> Option<String> {
        match self.auth.check_session().await {
            Ok(status) => status.user().map(str::to_owned),
            Err(err) => {
                log::warn!("session check failed: {err}");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` without contacting the backend when a
    /// field is blank, `AuthError::Rejected` with the backend's reason, or
    /// `AuthError::Unavailable` when the request itself fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let credentials = credentials(username, password)?;
        let result = self.auth.login(&credentials).await;
        finish(AuthAction::Login, &credentials, result)
    }

    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn register(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let credentials = credentials(username, password)?;
        let result = self.auth.register(&credentials).await;
        finish(AuthAction::Register, &credentials, result)
    }

    /// End the server session. Failures are logged; the caller forgets the user regardless.
    pub async fn logout(&self) {
        if let Err(err) = self.auth.logout().await {
            log::warn!("logout failed: {err}");
        }
    }
}

fn credentials(username: &str, password: &str) -> Result<Credentials, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(Credentials::new(username, password))
}

fn finish(
    action: AuthAction,
    credentials: &Credentials,
    result: Result<String, StorageError>,
) -> Result<String, AuthError> {
    match result {
        Ok(username) => {
            log::info!("{action:?} succeeded for {username}");
            Ok(username)
        }
        Err(StorageError::Rejected(message)) => Err(AuthError::Rejected(message)),
        Err(source) => {
            log::error!("{action:?} failed for {}: {source}", credentials.username);
            Err(AuthError::Unavailable { action, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn blank_fields_never_reach_backend() {
        let auth = service();
        let err = auth.login("   ", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
        assert_eq!(err.user_message(), "Please enter username and password");
        assert!(matches!(
            auth.register("nova", "").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn register_trims_username_and_logs_in() {
        let auth = service();
        assert_eq!(auth.register("  nova ", "star1").await.unwrap(), "nova");
        assert_eq!(auth.current_user().await.as_deref(), Some("nova"));

        auth.logout().await;
        assert_eq!(auth.current_user().await, None);
    }

    #[tokio::test]
    async fn backend_refusal_is_shown_verbatim() {
        let auth = service();
        let err = auth.login("ghost", "boo!").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid username or password");
    }
}
