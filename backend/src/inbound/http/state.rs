//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ScheduleCommand, ScheduleQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub schedules: Arc<dyn ScheduleCommand>,
    pub schedules_query: Arc<dyn ScheduleQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use scheduler::domain::ports::{
    ///     FixtureLoginService, FixtureScheduleCommand, FixtureScheduleQuery,
    /// };
    /// use scheduler::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureScheduleCommand),
    ///     Arc::new(FixtureScheduleQuery),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        schedules: Arc<dyn ScheduleCommand>,
        schedules_query: Arc<dyn ScheduleQuery>,
    ) -> Self {
        Self {
            login,
            schedules,
            schedules_query,
        }
    }
}
