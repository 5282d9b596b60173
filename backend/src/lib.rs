//! Scheduling poll service.
//!
//! Layout follows ports and adapters: [`domain`] holds the schedule aggregate
//! and its ports, [`inbound`] the HTTP adapter, [`outbound`] the PostgreSQL
//! adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
