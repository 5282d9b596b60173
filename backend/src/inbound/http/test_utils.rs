//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::ports::{FixtureLoginService, ScheduleCommand, ScheduleQuery};

/// Session middleware for tests: fresh key, cookie named `session`, no
/// `Secure` flag so plain HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
///
/// # Panics
///
/// Panics when the response did not set a session cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Route handler that logs the fixture user in.
///
/// Mount it under any path and call it first to obtain a session cookie.
pub async fn login_fixture_user(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_user(&FixtureLoginService::user()?)?;
    Ok(HttpResponse::NoContent().finish())
}

/// HTTP state around the given schedule ports and the fixture login.
pub fn schedule_state(
    schedules: impl ScheduleCommand + 'static,
    schedules_query: impl ScheduleQuery + 'static,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(schedules),
        Arc::new(schedules_query),
    ))
}
