//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories implement the domain's driven ports using `diesel-async`
//! connections checked out of a `bb8` pool. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) stay private to this module; adapters only
//! translate between rows and domain values.
//!
//! # Example
//!
//! ```ignore
//! use scheduler::outbound::persistence::{DbPool, DieselScheduleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/scheduler")).await?;
//! let schedules = DieselScheduleRepository::new(pool.clone());
//! ```

mod diesel_helpers;
mod diesel_participation_repository;
mod diesel_schedule_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_participation_repository::DieselParticipationRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
