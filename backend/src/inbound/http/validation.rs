//! Translation of request parsing failures into `invalid_request` errors.
//!
//! Every validation error carries `details.field` (the request field name as
//! clients see it) and `details.code` (a stable snake_case reason).

use serde_json::json;

use crate::domain::{
    CandidateId, Error, LoginValidationError, ParticipationValidationError, ScheduleId,
    ScheduleValidationError, UserId,
};

/// Request field names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const SCHEDULE_ID: FieldName = FieldName::new("scheduleId");
pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const CANDIDATE_ID: FieldName = FieldName::new("candidateId");

fn field_error(field: FieldName, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

fn invalid_path_value(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} is not a valid identifier")).with_details(json!({
        "field": name,
        "value": value,
        "code": "invalid_identifier",
    }))
}

pub(crate) fn parse_schedule_id(raw: &str) -> Result<ScheduleId, Error> {
    ScheduleId::parse(raw).map_err(|_| invalid_path_value(SCHEDULE_ID, raw))
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|_| invalid_path_value(USER_ID, raw))
}

pub(crate) fn parse_candidate_id(raw: &str) -> Result<CandidateId, Error> {
    raw.trim()
        .parse::<i64>()
        .map(CandidateId::new)
        .map_err(|_| invalid_path_value(CANDIDATE_ID, raw))
}

pub(crate) fn map_schedule_validation(error: ScheduleValidationError) -> Error {
    let message = error.to_string();
    match error {
        ScheduleValidationError::EmptyName => {
            field_error(FieldName::new("scheduleName"), "empty", message)
        }
        ScheduleValidationError::NameTooLong { .. } => {
            field_error(FieldName::new("scheduleName"), "too_long", message)
        }
        ScheduleValidationError::NoCandidates => {
            field_error(FieldName::new("candidates"), "no_candidates", message)
        }
        ScheduleValidationError::CandidateTooLong { line, .. } => {
            Error::invalid_request(message).with_details(json!({
                "field": "candidates",
                "line": line,
                "code": "too_long",
            }))
        }
    }
}

pub(crate) fn map_participation_validation(error: ParticipationValidationError) -> Error {
    let message = error.to_string();
    match error {
        ParticipationValidationError::AvailabilityOutOfRange { .. } => {
            field_error(FieldName::new("availability"), "out_of_range", message)
        }
        ParticipationValidationError::CommentTooLong { .. } => {
            field_error(FieldName::new("comment"), "too_long", message)
        }
    }
}

pub(crate) fn map_login_validation(error: LoginValidationError) -> Error {
    let message = error.to_string();
    match error {
        LoginValidationError::EmptyUsername => {
            field_error(FieldName::new("username"), "empty", message)
        }
        LoginValidationError::EmptyPassword => {
            field_error(FieldName::new("password"), "empty", message)
        }
    }
}
