//! Schedule pages.
//!
//! ```text
//! GET  /                        schedules created by the caller
//! GET  /schedules/new           creation form
//! POST /schedules               scheduleName=..&memo=..&candidates=..
//! GET  /schedules/{scheduleId}  availability grid and comments
//! ```

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ScheduleDraft, ScheduleValidationError};
use crate::domain::ports::CreateScheduleRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::html;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_schedule_validation, parse_schedule_id};

/// Form body for `POST /schedules`.
///
/// Missing fields deserialize as empty strings so validation, not the form
/// extractor, reports which field is wrong.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleForm {
    #[serde(default)]
    pub schedule_name: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub candidates: String,
}

impl TryFrom<CreateScheduleForm> for ScheduleDraft {
    type Error = ScheduleValidationError;

    fn try_from(form: CreateScheduleForm) -> Result<Self, Self::Error> {
        ScheduleDraft::try_new(&form.schedule_name, form.memo, &form.candidates)
    }
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Landing page.
#[get("/")]
pub async fn index(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let Some(user) = session.user() else {
        return Ok(html_response(html::index_page(None, &[])));
    };
    let schedules = state.schedules_query.list_schedules(user.user_id()).await?;
    Ok(html_response(html::index_page(Some(&user), &schedules)))
}

/// Creation form.
#[get("/schedules/new")]
pub async fn new_schedule(identity: Identity) -> HttpResponse {
    html_response(html::new_schedule_page(&identity))
}

/// Create a schedule and redirect to its page.
#[post("/schedules")]
pub async fn create_schedule(
    state: web::Data<HttpState>,
    identity: Identity,
    form: web::Form<CreateScheduleForm>,
) -> ApiResult<HttpResponse> {
    let draft = ScheduleDraft::try_from(form.into_inner()).map_err(map_schedule_validation)?;
    let schedule_id = state
        .schedules
        .create_schedule(CreateScheduleRequest {
            created_by: identity.user_id(),
            draft,
        })
        .await?;
    debug!(%schedule_id, "redirecting to created schedule");
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/schedules/{schedule_id}")))
        .finish())
}

/// Render one schedule for the caller.
#[get("/schedules/{schedule_id}")]
pub async fn show_schedule(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let schedule_id = parse_schedule_id(&path.into_inner())?;
    let viewer = identity.into_user();
    let view = state
        .schedules_query
        .fetch_view(schedule_id, viewer.clone())
        .await?;
    Ok(html_response(html::schedule_page(&view, &viewer)))
}

#[cfg(test)]
#[path = "schedules_tests.rs"]
mod tests;
