//! Driving port for schedule reads.

use async_trait::async_trait;

use crate::domain::{Error, Schedule, ScheduleId, ScheduleView, User, UserId};

/// Schedule read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleQuery: Send + Sync {
    /// Assemble the read model of `schedule_id` as seen by `viewer`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the schedule does not exist.
    async fn fetch_view(&self, schedule_id: ScheduleId, viewer: User)
    -> Result<ScheduleView, Error>;

    /// Schedules created by `user_id`, newest first.
    async fn list_schedules(&self, user_id: UserId) -> Result<Vec<Schedule>, Error>;
}

/// Query implementation backed by no storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleQuery;

#[async_trait]
impl ScheduleQuery for FixtureScheduleQuery {
    async fn fetch_view(
        &self,
        schedule_id: ScheduleId,
        _viewer: User,
    ) -> Result<ScheduleView, Error> {
        Err(Error::not_found(format!("schedule {schedule_id} not found")))
    }

    async fn list_schedules(&self, _user_id: UserId) -> Result<Vec<Schedule>, Error> {
        Ok(Vec::new())
    }
}
