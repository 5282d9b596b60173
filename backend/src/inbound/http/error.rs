//! HTTP mapping for domain errors.
//!
//! The domain error type stays transport agnostic; this module turns it into
//! a JSON payload with a matching status code and the `trace-id` header.

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Body error handler for `web::JsonConfig`.
///
/// Malformed JSON becomes an `invalid_request` payload instead of Actix's
/// plain-text 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}"))
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

/// Body error handler for `web::FormConfig`.
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid form body: {err}"))
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

/// JSON extractor settings shared by every JSON route.
///
/// Bodies are parsed regardless of the `Content-Type` header.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_error_handler)
}

/// Form extractor settings shared by every form route.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(form_error_handler)
}
