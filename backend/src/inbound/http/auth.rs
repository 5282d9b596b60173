//! Login and logout.
//!
//! ```text
//! GET  /login
//! POST /auth/login username=testuser&password=password
//! GET  /logout
//! ```
//!
//! Credentials are resolved through the [`LoginService`] port; the resolved
//! identity is stored in the session and read back by
//! [`crate::inbound::http::identity::Identity`].
//!
//! [`LoginService`]: crate::domain::ports::LoginService

use actix_web::http::header::{self, ContentType};
use actix_web::{Either, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::html;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation;

/// Login credentials, accepted as JSON or as a form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    #[schema(format = Password)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Login page.
#[get("/login")]
pub async fn login_page(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html::login_page(session.user().as_ref()))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 302, description = "Logged in; redirects to /", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
) -> ApiResult<HttpResponse> {
    let request = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let credentials = LoginCredentials::try_from(request).map_err(map_login_validation)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    Ok(redirect_home())
}

/// Drop the session.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect_home()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        FixtureScheduleCommand, FixtureScheduleQuery, LoginService, MockLoginService,
    };
    use crate::inbound::http::error::{form_config, json_config};
    use crate::inbound::http::identity::Identity;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state(provider: impl LoginService + 'static) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(provider),
            Arc::new(FixtureScheduleCommand),
            Arc::new(FixtureScheduleQuery),
        ))
    }

    fn accepting_login() -> MockLoginService {
        let mut provider = MockLoginService::new();
        provider
            .expect_authenticate()
            .withf(|credentials| {
                credentials.username() == "testuser" && credentials.password() == "password"
            })
            .returning(|_| crate::domain::ports::FixtureLoginService::user());
        provider
    }

    macro_rules! init_app {
        ($login:expr) => {
            test::init_service(
                App::new()
                    .app_data(state($login))
                    .app_data(json_config())
                    .app_data(form_config())
                    .wrap(test_session_middleware())
                    .service(login_page)
                    .service(login)
                    .service(logout)
                    .route(
                        "/whoami",
                        web::get().to(|identity: Identity| async move {
                            HttpResponse::Ok().body(identity.username().to_string())
                        }),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn form_login_sets_session_and_redirects() {
        let app = init_app!(accepting_login());

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_form([("username", "testuser"), ("password", "password")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/")
        );

        let whoami = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&res))
                .to_request(),
        )
        .await;
        assert_eq!(whoami.status(), StatusCode::OK);
        assert_eq!(test::read_body(whoami).await, "testuser");
    }

    #[actix_web::test]
    async fn json_login_is_accepted() {
        let app = init_app!(accepting_login());

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({"username": "testuser", "password": "password"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    #[rstest]
    #[case("   ", "password", "username")]
    #[case("testuser", "", "password")]
    #[actix_web::test]
    async fn blank_credentials_are_invalid(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let mut provider = MockLoginService::new();
        provider.expect_authenticate().never();
        let app = init_app!(provider);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({"username": username, "password": password}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn rejected_credentials_are_unauthorised() {
        let mut provider = MockLoginService::new();
        provider
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = init_app!(provider);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_form([("username", "testuser"), ("password", "nope")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn logout_forgets_the_user() {
        let app = init_app!(accepting_login());

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_form([("username", "testuser"), ("password", "password")])
                .to_request(),
        )
        .await;
        let logout_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(session_cookie(&login_res))
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::FOUND);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie cleared");
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn login_page_renders_form() {
        let app = init_app!(MockLoginService::new());

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert!(body.contains("action=\"/auth/login\""));
    }
}
