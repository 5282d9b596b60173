//! Wiring of driving ports to either Diesel adapters or fixtures.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use scheduler::domain::ports::{
    FixtureLoginService, FixtureScheduleCommand, FixtureScheduleQuery, LoginService,
    ScheduleCommand, ScheduleQuery,
};
use scheduler::domain::{ScheduleAggregateService, UpsertOnLoginService};
use scheduler::inbound::http::state::HttpState;
use scheduler::outbound::persistence::{
    DbPool, DieselParticipationRepository, DieselScheduleRepository, DieselUserRepository,
};

use super::ServerConfig;

fn build_persistent_ports(
    pool: &DbPool,
) -> (Arc<dyn LoginService>, Arc<dyn ScheduleCommand>, Arc<dyn ScheduleQuery>) {
    let login = Arc::new(UpsertOnLoginService::new(
        Arc::new(FixtureLoginService),
        Arc::new(DieselUserRepository::new(pool.clone())),
    ));
    let service = Arc::new(ScheduleAggregateService::new(
        Arc::new(DieselScheduleRepository::new(pool.clone())),
        Arc::new(DieselParticipationRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ));
    (login, service.clone(), service)
}

/// Build the HTTP state for the configured storage.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (login, schedules, schedules_query) = match &config.db_pool {
        Some(pool) => build_persistent_ports(pool),
        None => {
            warn!("no database configured; schedules will not be persisted");
            (
                Arc::new(FixtureLoginService) as Arc<dyn LoginService>,
                Arc::new(FixtureScheduleCommand) as Arc<dyn ScheduleCommand>,
                Arc::new(FixtureScheduleQuery) as Arc<dyn ScheduleQuery>,
            )
        }
    };
    web::Data::new(HttpState::new(login, schedules, schedules_query))
}
