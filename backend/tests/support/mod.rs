//! Shared helper utilities for the embedded PostgreSQL integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! common setup lives here and each suite pulls it in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

#[allow(unused_imports, reason = "not every suite uses every helper")]
pub use cluster_skip::handle_cluster_setup_failure;
#[allow(unused_imports, reason = "not every suite uses every helper")]
pub use embedded_postgres::{TestDatabase, provision_test_database};

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `Display` implementation collapses database errors to `db error`, so
/// prefer the SQLSTATE and message when available.
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
