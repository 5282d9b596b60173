//! Domain primitives, aggregates and services.
//!
//! Purpose: define the schedule aggregate (schedule, candidates,
//! availabilities, comments) and the users who participate in it, free of
//! transport and storage concerns. Adapters talk to the domain through the
//! traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Schedule, Candidate, ScheduleDraft, NewSchedule: aggregate root and its
//!   creation inputs.
//! - AvailabilityValue, CommentText: participant answers.
//! - ScheduleView: read model assembled for one viewer.
//! - ScheduleAggregateService: implementation of the schedule driving ports.
//! - UpsertOnLoginService: records each user as they log in.

pub mod auth;
pub mod error;
mod login;
pub mod participation;
pub mod ports;
pub mod schedule;
mod schedule_service;
pub mod schedule_view;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login::UpsertOnLoginService;
pub use self::participation::{
    Availability, AvailabilityValue, COMMENT_MAX, Comment, CommentText,
    ParticipationValidationError, ScheduleAggregate,
};
pub use self::schedule::{
    CANDIDATE_NAME_MAX, Candidate, CandidateId, CandidateName, NewSchedule, SCHEDULE_NAME_MAX,
    Schedule, ScheduleDraft, ScheduleId, ScheduleName, ScheduleValidationError,
    parse_candidate_names,
};
pub use self::schedule_service::ScheduleAggregateService;
pub use self::schedule_view::ScheduleView;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use scheduler::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
