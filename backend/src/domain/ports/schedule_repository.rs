//! Port for schedule aggregate persistence.
//!
//! The [`ScheduleRepository`] owns the schedule header and its candidates.
//! Creation writes both in a single transaction; teardown removes every row
//! belonging to the aggregate, dependants first, in a single transaction.

use async_trait::async_trait;

use crate::domain::{NewSchedule, Schedule, ScheduleAggregate, ScheduleId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by schedule repository adapters.
    pub enum ScheduleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "schedule repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "schedule repository query failed: {message}",
        /// A referenced row (typically the creator) does not exist.
        UnknownReference { message: String } =>
            "schedule references a missing row: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } =>
            "schedule write conflicts with existing data: {message}",
    }
}

/// Storage contract for schedules and candidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Persist the schedule and all of its candidates atomically.
    ///
    /// Either every row is written or none is.
    async fn create(&self, schedule: &NewSchedule) -> Result<(), ScheduleRepositoryError>;

    /// Load the schedule with its candidates, answers, comments and the
    /// users who left them.
    ///
    /// Returns `None` when the schedule does not exist.
    async fn load_aggregate(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Option<ScheduleAggregate>, ScheduleRepositoryError>;

    /// Schedules created by `user_id`, newest first.
    async fn list_by_creator(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError>;

    /// Remove availabilities, candidates, comments and the schedule header.
    ///
    /// Returns `false` when the schedule did not exist.
    async fn delete_aggregate(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<bool, ScheduleRepositoryError>;
}

/// Repository that stores nothing.
///
/// Used when the server starts without a database so routes stay reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleRepository;

#[async_trait]
impl ScheduleRepository for FixtureScheduleRepository {
    async fn create(&self, _schedule: &NewSchedule) -> Result<(), ScheduleRepositoryError> {
        Ok(())
    }

    async fn load_aggregate(
        &self,
        _schedule_id: &ScheduleId,
    ) -> Result<Option<ScheduleAggregate>, ScheduleRepositoryError> {
        Ok(None)
    }

    async fn list_by_creator(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Schedule>, ScheduleRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_aggregate(
        &self,
        _schedule_id: &ScheduleId,
    ) -> Result<bool, ScheduleRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_finds_nothing() {
        let repo = FixtureScheduleRepository;
        let id = ScheduleId::random();
        assert!(repo.load_aggregate(&id).await.expect("load").is_none());
        assert!(!repo.delete_aggregate(&id).await.expect("delete"));
        let user = UserId::new(0).expect("valid id");
        assert!(repo.list_by_creator(&user).await.expect("list").is_empty());
    }

    #[rstest]
    fn errors_format_with_context() {
        let err = ScheduleRepositoryError::unknown_reference("created_by");
        assert_eq!(
            err.to_string(),
            "schedule references a missing row: created_by"
        );
    }
}
