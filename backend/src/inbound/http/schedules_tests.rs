//! Tests for the schedule page handlers.

use super::*;
use crate::domain::ports::{
    FixtureLoginService, FixtureScheduleCommand, FixtureScheduleQuery, MockScheduleCommand,
    MockScheduleQuery, ScheduleCommand, ScheduleQuery,
};
use crate::domain::{
    Candidate, CandidateId, CandidateName, Error, Schedule, ScheduleAggregate, ScheduleId,
    ScheduleName, ScheduleView, User,
};
use crate::inbound::http::test_utils::{
    login_fixture_user, schedule_state, session_cookie, test_session_middleware,
};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::Value;

fn viewer() -> User {
    FixtureLoginService::user().expect("fixture user")
}

fn sample_schedule(schedule_id: ScheduleId) -> Schedule {
    Schedule {
        schedule_id,
        schedule_name: ScheduleName::new("テスト予定1").expect("valid name"),
        memo: "テストメモ1\r\nテストメモ2".to_owned(),
        created_by: viewer(),
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

fn sample_view(schedule_id: ScheduleId) -> ScheduleView {
    let candidates = ["テスト候補1", "テスト候補2", "テスト候補3"]
        .into_iter()
        .zip(0_i32..)
        .map(|(name, order)| Candidate {
            candidate_id: CandidateId::new(i64::from(order) + 1),
            schedule_id,
            candidate_name: CandidateName::from_db(name.to_owned()),
            display_order: order,
        })
        .collect();
    ScheduleView::assemble(
        ScheduleAggregate {
            schedule: sample_schedule(schedule_id),
            candidates,
            availabilities: Vec::new(),
            comments: Vec::new(),
            participants: Vec::new(),
        },
        &viewer(),
    )
}

async fn init(
    command: impl ScheduleCommand + 'static,
    query: impl ScheduleQuery + 'static,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(schedule_state(command, query))
            .wrap(test_session_middleware())
            .route("/test-login", web::get().to(login_fixture_user))
            .service(index)
            .service(new_schedule)
            .service(create_schedule)
            .service(show_schedule),
    )
    .await
}

async fn login<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, test::TestRequest::get().uri("/test-login").to_request())
        .await;
    session_cookie(&res)
}

async fn body_text(res: ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[actix_web::test]
async fn create_redirects_to_the_new_schedule() {
    let schedule_id = ScheduleId::random();
    let mut command = MockScheduleCommand::new();
    command
        .expect_create_schedule()
        .withf(|request| {
            let names: Vec<&str> = request
                .draft
                .candidates
                .iter()
                .map(AsRef::as_ref)
                .collect();
            request.created_by.value() == 0
                && request.draft.schedule_name.as_ref() == "テスト予定1"
                && request.draft.memo == "テストメモ1\r\nテストメモ2"
                && names == ["テスト候補1", "テスト候補2", "テスト候補3"]
        })
        .times(1)
        .return_once(move |_| Ok(schedule_id));
    let app = init(command, FixtureScheduleQuery).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::post()
        .uri("/schedules")
        .cookie(cookie)
        .set_form([
            ("scheduleName", "テスト予定1"),
            ("memo", "テストメモ1\r\nテストメモ2"),
            ("candidates", "テスト候補1\r\nテスト候補2\r\nテスト候補3"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(location, Some(format!("/schedules/{schedule_id}")));
}

#[rstest]
#[case("", "A", "scheduleName", "empty")]
#[case("Lunch", "\r\n  \r\n", "candidates", "no_candidates")]
#[actix_web::test]
async fn invalid_forms_are_rejected_before_any_write(
    #[case] name: &str,
    #[case] candidates: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockScheduleCommand::new();
    command.expect_create_schedule().never();
    let app = init(command, FixtureScheduleQuery).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::post()
        .uri("/schedules")
        .cookie(cookie)
        .set_form([("scheduleName", name), ("memo", ""), ("candidates", candidates)])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn anonymous_create_is_unauthorised() {
    let mut command = MockScheduleCommand::new();
    command.expect_create_schedule().never();
    let app = init(command, FixtureScheduleQuery).await;

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_form([("scheduleName", "x"), ("memo", ""), ("candidates", "A")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn schedule_page_renders_memo_and_candidates() {
    let schedule_id = ScheduleId::random();
    let view = sample_view(schedule_id);
    let mut query = MockScheduleQuery::new();
    query
        .expect_fetch_view()
        .withf(move |id, viewer| *id == schedule_id && viewer.user_id().value() == 0)
        .times(1)
        .return_once(move |_, _| Ok(view));
    let app = init(FixtureScheduleCommand, query).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri(&format!("/schedules/{schedule_id}"))
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    for fragment in [
        "テスト予定1",
        "テストメモ1",
        "テストメモ2",
        "テスト候補1",
        "テスト候補2",
        "テスト候補3",
    ] {
        assert!(body.contains(fragment), "missing {fragment}");
    }
}

#[actix_web::test]
async fn unknown_schedule_is_not_found() {
    let mut query = MockScheduleQuery::new();
    query
        .expect_fetch_view()
        .return_once(|_, _| Err(Error::not_found("schedule not found")));
    let app = init(FixtureScheduleCommand, query).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri(&format!("/schedules/{}", ScheduleId::random()))
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_schedule_id_is_a_bad_request() {
    let mut query = MockScheduleQuery::new();
    query.expect_fetch_view().never();
    let app = init(FixtureScheduleCommand, query).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/schedules/not-a-uuid")
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn new_form_is_not_shadowed_by_the_schedule_route() {
    let app = init(FixtureScheduleCommand, FixtureScheduleQuery).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/schedules/new")
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("action=\"/schedules\""));
}

#[actix_web::test]
async fn index_lists_own_schedules() {
    let schedule_id = ScheduleId::random();
    let mut query = MockScheduleQuery::new();
    query
        .expect_list_schedules()
        .withf(|user_id| user_id.value() == 0)
        .return_once(move |_| Ok(vec![sample_schedule(schedule_id)]));
    let app = init(FixtureScheduleCommand, query).await;
    let cookie = login(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains(&format!("/schedules/{schedule_id}")));
}

#[actix_web::test]
async fn anonymous_index_offers_login() {
    let mut query = MockScheduleQuery::new();
    query.expect_list_schedules().never();
    let app = init(FixtureScheduleCommand, query).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("href=\"/login\""));
}
