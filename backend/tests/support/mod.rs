//! Shared helpers for integration tests that need PostgreSQL.
//!
//! Each suite boots an embedded cluster through [`pg_embed::test_cluster`],
//! recreates its own database and applies the crate's embedded migrations.

pub mod pg_embed;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

use scheduler::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Render a `postgres` error with the SQLSTATE and server message.
///
/// The `Display` implementation collapses database errors to `db error`,
/// which hides the useful part.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Whether `SKIP_TEST_CLUSTER` asks to skip suites without a cluster.
fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Drop and recreate `name` on the cluster.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// A migrated database with a pool ready for the Diesel adapters.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Boot a cluster, recreate `name` and apply migrations.
    pub fn provision(name: &str) -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = pg_embed::test_cluster()?;
        reset_database(&cluster, name)?;
        let url = cluster.connection().database_url(name);
        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| err.to_string())?;
        let config = PoolConfig::new(&url).with_max_size(4).with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            runtime,
            pool,
            url,
            _cluster: cluster,
        })
    }

    /// Open a plain client for assertions on raw rows.
    pub fn client(&self) -> Client {
        Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    /// Insert a user row directly.
    pub fn seed_user(&self, user_id: i64, username: &str) {
        self.client()
            .execute(
                "INSERT INTO users (user_id, username) VALUES ($1, $2)",
                &[&user_id, &username],
            )
            .unwrap_or_else(|err| panic!("seed user: {}", format_postgres_error(&err)));
    }

    /// Count rows matching a `SELECT COUNT(*)` query.
    pub fn count(&self, sql: &str, params: &[&(dyn postgres::types::ToSql + Sync)]) -> i64 {
        self.client()
            .query_one(sql, params)
            .unwrap_or_else(|err| panic!("count: {}", format_postgres_error(&err)))
            .get(0)
    }
}
