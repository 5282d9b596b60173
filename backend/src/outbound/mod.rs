//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel.
//!
//! Adapters translate between domain types and storage rows. They contain no
//! business rules.

pub mod persistence;
