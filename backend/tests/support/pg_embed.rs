//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! `pg-embed-setup-unpriv` installs under `/var/tmp` by default. When
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset, both are pointed at a unique
//! directory under the cargo target dir for the duration of the bootstrap.
//! Environment mutation is serialised with `env-lock`.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

fn target_dir() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"))
        .join("pg-embed")
}

fn unique_dirs() -> std::io::Result<(String, String)> {
    let base = target_dir().join(format!("scheduler-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((
        runtime_dir.to_string_lossy().into_owned(),
        data_dir.to_string_lossy().into_owned(),
    ))
}

/// Download failures are worth retrying; everything else is not.
fn is_transient(message: &str) -> bool {
    let lower = message.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| lower.contains(pattern))
}

/// Start a [`TestCluster`], retrying transient download errors.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = unique_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir)),
            ("PG_DATA_DIR", Some(data_dir)),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}
