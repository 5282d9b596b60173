//! Driving port for schedule mutations.
//!
//! HTTP handlers call [`ScheduleCommand`] to create schedules, record
//! availability answers and comments, and tear an aggregate down. Inputs are
//! validated domain values; the implementation stamps identifiers and
//! timestamps.

use async_trait::async_trait;

use crate::domain::{
    AvailabilityValue, CandidateId, CommentText, Error, ScheduleDraft, ScheduleId, UserId,
};

/// Request to create a schedule with its candidates.
#[derive(Debug, Clone)]
pub struct CreateScheduleRequest {
    /// Authenticated creator.
    pub created_by: UserId,
    /// Validated form input.
    pub draft: ScheduleDraft,
}

/// Request to record one availability answer.
#[derive(Debug, Clone)]
pub struct UpdateAvailabilityRequest {
    pub schedule_id: ScheduleId,
    pub candidate_id: CandidateId,
    pub user_id: UserId,
    pub availability: AvailabilityValue,
}

/// Request to record a participant comment.
#[derive(Debug, Clone)]
pub struct UpdateCommentRequest {
    pub schedule_id: ScheduleId,
    pub user_id: UserId,
    pub comment: CommentText,
}

/// Schedule mutation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleCommand: Send + Sync {
    /// Create the schedule and all candidates atomically.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the creator is unknown to storage and
    /// `service_unavailable` when storage cannot be reached.
    async fn create_schedule(&self, request: CreateScheduleRequest) -> Result<ScheduleId, Error>;

    /// Upsert the answer for `(user_id, candidate_id)` and echo the stored
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the schedule or candidate does not exist or
    /// the candidate belongs to another schedule.
    async fn update_availability(
        &self,
        request: UpdateAvailabilityRequest,
    ) -> Result<AvailabilityValue, Error>;

    /// Upsert the comment for `(schedule_id, user_id)` and echo the stored
    /// text.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the schedule does not exist.
    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<CommentText, Error>;

    /// Remove the schedule and everything that depends on it.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete_schedule(&self, schedule_id: ScheduleId) -> Result<bool, Error>;
}

/// Command implementation that echoes inputs without persisting them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureScheduleCommand;

#[async_trait]
impl ScheduleCommand for FixtureScheduleCommand {
    async fn create_schedule(&self, _request: CreateScheduleRequest) -> Result<ScheduleId, Error> {
        Ok(ScheduleId::random())
    }

    async fn update_availability(
        &self,
        request: UpdateAvailabilityRequest,
    ) -> Result<AvailabilityValue, Error> {
        Ok(request.availability)
    }

    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<CommentText, Error> {
        Ok(request.comment)
    }

    async fn delete_schedule(&self, _schedule_id: ScheduleId) -> Result<bool, Error> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_answers() {
        let request = UpdateAvailabilityRequest {
            schedule_id: ScheduleId::random(),
            candidate_id: CandidateId::new(1),
            user_id: UserId::new(0).expect("valid id"),
            availability: AvailabilityValue::new(2).expect("valid"),
        };
        let stored = FixtureScheduleCommand
            .update_availability(request)
            .await
            .expect("accepted");
        assert_eq!(stored.value(), 2);
    }
}
