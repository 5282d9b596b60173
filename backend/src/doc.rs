//! OpenAPI documentation for the JSON endpoints.
//!
//! HTML pages are not described. The document is served by Swagger UI in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::participation::{
    AvailabilityRequest, AvailabilityResponse, CommentRequest, CommentResponse, UpdateStatus,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Scheduler API",
        description = "Session-authenticated scheduling polls: availability answers, comments and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::participation::update_availability,
        crate::inbound::http::participation::update_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        LoginRequest,
        AvailabilityRequest,
        AvailabilityResponse,
        CommentRequest,
        CommentResponse,
        UpdateStatus,
    )),
    tags(
        (name = "auth", description = "Session login"),
        (name = "participation", description = "Availability answers and comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message"])]
    #[case("User", &["userId", "username"])]
    #[case("AvailabilityResponse", &["status", "availability"])]
    #[case("CommentResponse", &["status", "comment"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let present = schema_fields(name);
        for field in fields {
            assert!(present.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/schedules/{scheduleId}/users/{userId}/candidates/{candidateId}")]
    #[case("/schedules/{scheduleId}/users/{userId}/comments")]
    #[case("/auth/login")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }
}
