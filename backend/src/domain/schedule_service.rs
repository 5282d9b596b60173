//! Schedule aggregate service.
//!
//! Implements the [`ScheduleCommand`] and [`ScheduleQuery`] driving ports on
//! top of the schedule and participation repositories. Repository failures
//! are translated into domain [`Error`]s here so adapters never see storage
//! error types.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateScheduleRequest, ParticipationRepository, ParticipationRepositoryError,
    ScheduleCommand, ScheduleQuery, ScheduleRepository, ScheduleRepositoryError,
    UpdateAvailabilityRequest, UpdateCommentRequest,
};
use crate::domain::{
    Availability, AvailabilityValue, Comment, CommentText, Error, NewSchedule, Schedule,
    ScheduleId, ScheduleView, User, UserId,
};

/// Service coordinating schedule and participation storage.
#[derive(Clone)]
pub struct ScheduleAggregateService<S, P> {
    schedules: Arc<S>,
    participation: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<S, P> ScheduleAggregateService<S, P> {
    /// Create a new service.
    pub fn new(schedules: Arc<S>, participation: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            schedules,
            participation,
            clock,
        }
    }
}

fn map_schedule_error(error: ScheduleRepositoryError) -> Error {
    match error {
        ScheduleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("schedule repository unavailable: {message}"))
        }
        ScheduleRepositoryError::Query { message } => {
            Error::internal(format!("schedule repository error: {message}"))
        }
        ScheduleRepositoryError::UnknownReference { message } => {
            debug!(%message, "schedule write references a missing row");
            Error::not_found("referenced user does not exist")
                .with_details(json!({ "code": "unknown_reference" }))
        }
        ScheduleRepositoryError::Conflict { message } => {
            debug!(%message, "schedule write violates a unique constraint");
            Error::conflict("schedule already exists")
                .with_details(json!({ "code": "constraint_violation" }))
        }
    }
}

fn map_participation_error(error: ParticipationRepositoryError) -> Error {
    match error {
        ParticipationRepositoryError::Connection { message } => Error::service_unavailable(
            format!("participation repository unavailable: {message}"),
        ),
        ParticipationRepositoryError::Query { message } => {
            Error::internal(format!("participation repository error: {message}"))
        }
        ParticipationRepositoryError::UnknownReference { message } => {
            debug!(%message, "answer references a missing row");
            Error::not_found("schedule or candidate not found")
                .with_details(json!({ "code": "unknown_reference" }))
        }
        ParticipationRepositoryError::Conflict { message } => {
            debug!(%message, "answer violates a unique constraint");
            Error::conflict("answer conflicts with stored data")
                .with_details(json!({ "code": "constraint_violation" }))
        }
    }
}

#[async_trait]
impl<S, P> ScheduleCommand for ScheduleAggregateService<S, P>
where
    S: ScheduleRepository,
    P: ParticipationRepository,
{
    async fn create_schedule(&self, request: CreateScheduleRequest) -> Result<ScheduleId, Error> {
        let CreateScheduleRequest { created_by, draft } = request;
        let schedule = NewSchedule::from_draft(
            draft,
            ScheduleId::random(),
            created_by,
            self.clock.utc(),
        );
        self.schedules
            .create(&schedule)
            .await
            .map_err(map_schedule_error)?;
        info!(
            schedule_id = %schedule.schedule_id,
            created_by = %created_by,
            candidates = schedule.candidates.len(),
            "schedule created"
        );
        Ok(schedule.schedule_id)
    }

    async fn update_availability(
        &self,
        request: UpdateAvailabilityRequest,
    ) -> Result<AvailabilityValue, Error> {
        let availability = Availability {
            schedule_id: request.schedule_id,
            candidate_id: request.candidate_id,
            user_id: request.user_id,
            availability: request.availability,
        };
        self.participation
            .upsert_availability(&availability)
            .await
            .map_err(map_participation_error)?;
        info!(
            schedule_id = %availability.schedule_id,
            candidate_id = %availability.candidate_id,
            user_id = %availability.user_id,
            availability = %availability.availability,
            "availability recorded"
        );
        Ok(availability.availability)
    }

    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<CommentText, Error> {
        let comment = Comment {
            schedule_id: request.schedule_id,
            user_id: request.user_id,
            comment: request.comment,
        };
        self.participation
            .upsert_comment(&comment)
            .await
            .map_err(map_participation_error)?;
        info!(
            schedule_id = %comment.schedule_id,
            user_id = %comment.user_id,
            "comment recorded"
        );
        Ok(comment.comment)
    }

    async fn delete_schedule(&self, schedule_id: ScheduleId) -> Result<bool, Error> {
        let deleted = self
            .schedules
            .delete_aggregate(&schedule_id)
            .await
            .map_err(map_schedule_error)?;
        info!(%schedule_id, deleted, "schedule teardown finished");
        Ok(deleted)
    }
}

#[async_trait]
impl<S, P> ScheduleQuery for ScheduleAggregateService<S, P>
where
    S: ScheduleRepository,
    P: ParticipationRepository,
{
    async fn fetch_view(
        &self,
        schedule_id: ScheduleId,
        viewer: User,
    ) -> Result<ScheduleView, Error> {
        let aggregate = self
            .schedules
            .load_aggregate(&schedule_id)
            .await
            .map_err(map_schedule_error)?
            .ok_or_else(|| {
                Error::not_found(format!("schedule {schedule_id} not found")).with_details(
                    json!({
                        "scheduleId": schedule_id.to_string(),
                        "code": "schedule_not_found",
                    }),
                )
            })?;
        Ok(ScheduleView::assemble(aggregate, &viewer))
    }

    async fn list_schedules(&self, user_id: UserId) -> Result<Vec<Schedule>, Error> {
        self.schedules
            .list_by_creator(&user_id)
            .await
            .map_err(map_schedule_error)
    }
}

#[cfg(test)]
#[path = "schedule_service_tests.rs"]
mod tests;
