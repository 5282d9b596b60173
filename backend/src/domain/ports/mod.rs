//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`ScheduleCommand`, `ScheduleQuery`, `LoginService`) are
//! called by inbound adapters. Driven ports (`ScheduleRepository`,
//! `ParticipationRepository`, `UserRepository`) are implemented by outbound
//! adapters. Every port ships a fixture implementation, and a mockall mock
//! under `cfg(test)`.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod participation_repository;
mod schedule_command;
mod schedule_query;
mod schedule_repository;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use participation_repository::MockParticipationRepository;
pub use participation_repository::{
    FixtureParticipationRepository, ParticipationRepository, ParticipationRepositoryError,
};
#[cfg(test)]
pub use schedule_command::MockScheduleCommand;
pub use schedule_command::{
    CreateScheduleRequest, FixtureScheduleCommand, ScheduleCommand, UpdateAvailabilityRequest,
    UpdateCommentRequest,
};
#[cfg(test)]
pub use schedule_query::MockScheduleQuery;
pub use schedule_query::{FixtureScheduleQuery, ScheduleQuery};
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
pub use schedule_repository::{
    FixtureScheduleRepository, ScheduleRepository, ScheduleRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
