//! HTTP inbound adapter: HTML pages and JSON endpoints.

pub mod auth;
pub mod error;
pub mod health;
mod html;
pub mod identity;
pub mod participation;
pub mod schedules;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every application route and the body extractor settings.
///
/// Health probes are registered separately because they carry their own
/// state.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use scheduler::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::form_config())
        .service(schedules::index)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(schedules::new_schedule)
        .service(schedules::create_schedule)
        .service(schedules::show_schedule)
        .service(participation::update_availability)
        .service(participation::update_comment);
}
