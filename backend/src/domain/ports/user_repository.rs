//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user, or refresh the stored username if it already exists.
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// Repository that accepts upserts and never finds anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn upsert(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }
}
