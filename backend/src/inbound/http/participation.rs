//! Participant answers: per-candidate availability and per-schedule comment.
//!
//! ```text
//! POST /schedules/{scheduleId}/users/{userId}/candidates/{candidateId} {"availability":2}
//! POST /schedules/{scheduleId}/users/{userId}/comments {"comment":"testcomment"}
//! ```
//!
//! Both routes upsert one cell and echo the committed value. The path
//! `userId` is trusted; any authenticated caller may answer.

use actix_web::{Either, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{UpdateAvailabilityRequest, UpdateCommentRequest};
use crate::domain::{AvailabilityValue, CommentText, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_participation_validation, parse_candidate_id, parse_schedule_id, parse_user_id,
};

/// Success marker echoed by mutation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UpdateStatus {
    #[serde(rename = "OK")]
    Ok,
}

/// JSON body for the availability route.
///
/// `availability` may be a number or a numeric string. Anything else,
/// including a missing field, records the unknown answer `0`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    #[serde(default)]
    #[schema(value_type = Option<i64>, minimum = 0, maximum = 2)]
    pub availability: Option<Value>,
}

/// Form body for the availability route.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityForm {
    #[serde(default)]
    pub availability: Option<String>,
}

/// Committed availability.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub status: UpdateStatus,
    #[schema(value_type = u8, minimum = 0, maximum = 2)]
    pub availability: AvailabilityValue,
}

/// JSON body for the comment route.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentRequest {
    pub comment: String,
}

/// Committed comment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub status: UpdateStatus,
    pub comment: String,
}

fn submitted_availability(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn availability_from_body(
    body: Either<web::Json<AvailabilityRequest>, web::Form<AvailabilityForm>>,
) -> Result<AvailabilityValue, Error> {
    let raw = match body {
        Either::Left(json) => submitted_availability(json.into_inner().availability),
        Either::Right(form) => form.into_inner().availability,
    };
    AvailabilityValue::from_submitted(raw.as_deref()).map_err(map_participation_validation)
}

/// Record how available a user is for one candidate.
#[utoipa::path(
    post,
    path = "/schedules/{scheduleId}/users/{userId}/candidates/{candidateId}",
    params(
        ("scheduleId" = String, Path, description = "Schedule identifier (UUID)"),
        ("userId" = i64, Path, description = "Participant identifier"),
        ("candidateId" = i64, Path, description = "Candidate identifier")
    ),
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability stored", body = AvailabilityResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown schedule, candidate or user", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["participation"],
    operation_id = "updateAvailability"
)]
#[post("/schedules/{schedule_id}/users/{user_id}/candidates/{candidate_id}")]
pub async fn update_availability(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<(String, String, String)>,
    body: Either<web::Json<AvailabilityRequest>, web::Form<AvailabilityForm>>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let (schedule_id, user_id, candidate_id) = path.into_inner();
    let request = UpdateAvailabilityRequest {
        schedule_id: parse_schedule_id(&schedule_id)?,
        user_id: parse_user_id(&user_id)?,
        candidate_id: parse_candidate_id(&candidate_id)?,
        availability: availability_from_body(body)?,
    };
    let availability = state.schedules.update_availability(request).await?;
    Ok(web::Json(AvailabilityResponse {
        status: UpdateStatus::Ok,
        availability,
    }))
}

/// Record or clear a participant's comment on a schedule.
#[utoipa::path(
    post,
    path = "/schedules/{scheduleId}/users/{userId}/comments",
    params(
        ("scheduleId" = String, Path, description = "Schedule identifier (UUID)"),
        ("userId" = i64, Path, description = "Participant identifier")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment stored", body = CommentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown schedule or user", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["participation"],
    operation_id = "updateComment"
)]
#[post("/schedules/{schedule_id}/users/{user_id}/comments")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<(String, String)>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let (schedule_id, user_id) = path.into_inner();
    let request = UpdateCommentRequest {
        schedule_id: parse_schedule_id(&schedule_id)?,
        user_id: parse_user_id(&user_id)?,
        comment: CommentText::new(payload.into_inner().comment)
            .map_err(map_participation_validation)?,
    };
    let comment = state.schedules.update_comment(request).await?;
    Ok(web::Json(CommentResponse {
        status: UpdateStatus::Ok,
        comment: comment.as_ref().to_owned(),
    }))
}

#[cfg(test)]
#[path = "participation_tests.rs"]
mod tests;
