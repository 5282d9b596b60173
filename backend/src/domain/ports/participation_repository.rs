//! Port for participant answer persistence.
//!
//! Availabilities are keyed by `(user, candidate)` and comments by
//! `(schedule, user)`. Both writes are single-statement upserts: the first
//! write inserts, later writes overwrite the stored value.

use async_trait::async_trait;

use crate::domain::{Availability, Comment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by participation repository adapters.
    pub enum ParticipationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "participation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "participation repository query failed: {message}",
        /// The schedule, candidate or user does not exist, or the candidate
        /// belongs to a different schedule.
        UnknownReference { message: String } =>
            "answer references a missing row: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } =>
            "answer write conflicts with existing data: {message}",
    }
}

/// Storage contract for availability answers and comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    /// Insert or overwrite the answer for `(user_id, candidate_id)`.
    async fn upsert_availability(
        &self,
        availability: &Availability,
    ) -> Result<(), ParticipationRepositoryError>;

    /// Insert or overwrite the comment for `(schedule_id, user_id)`.
    async fn upsert_comment(&self, comment: &Comment) -> Result<(), ParticipationRepositoryError>;
}

/// Repository that accepts every write and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureParticipationRepository;

#[async_trait]
impl ParticipationRepository for FixtureParticipationRepository {
    async fn upsert_availability(
        &self,
        _availability: &Availability,
    ) -> Result<(), ParticipationRepositoryError> {
        Ok(())
    }

    async fn upsert_comment(&self, _comment: &Comment) -> Result<(), ParticipationRepositoryError> {
        Ok(())
    }
}
