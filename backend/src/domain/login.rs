//! Login use-case: resolve credentials, then record the user.
//!
//! Every successful login upserts the user row so that later aggregate writes
//! can reference it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, User};

/// [`LoginService`] decorator that upserts the resolved user.
#[derive(Clone)]
pub struct UpsertOnLoginService<U> {
    provider: Arc<dyn LoginService>,
    users: Arc<U>,
}

impl<U> UpsertOnLoginService<U> {
    /// Wrap `provider`, recording each resolved user in `users`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use scheduler::domain::ports::{FixtureLoginService, FixtureUserRepository, LoginService};
    /// use scheduler::domain::{LoginCredentials, UpsertOnLoginService};
    ///
    /// let service = UpsertOnLoginService::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureUserRepository),
    /// );
    /// let credentials = LoginCredentials::try_from_parts("testuser", "password").expect("valid");
    /// let user = tokio::runtime::Runtime::new()
    ///     .expect("runtime")
    ///     .block_on(service.authenticate(&credentials))
    ///     .expect("fixture user");
    /// assert_eq!(user.username().as_ref(), "testuser");
    /// ```
    pub fn new(provider: Arc<dyn LoginService>, users: Arc<U>) -> Self {
        Self { provider, users }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U> LoginService for UpsertOnLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self.provider.authenticate(credentials).await?;
        self.users
            .upsert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.user_id(), "user logged in");
        Ok(user)
    }
}
