//! Logging setup for dear-gizmo
//!
//! The crate logs through `tracing`; manipulation starts and ends, view
//! cube snaps and reversals are reported at debug level, rejected inputs at
//! warn level. These helpers install a `tracing-subscriber` formatter for
//! hosts that have none.

/// Install a formatter filtered by `RUST_LOG`, defaulting to `dear_gizmo=info,warn`
///
/// Returns `false` when a global subscriber was already set.
pub fn init_tracing() -> bool {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "dear_gizmo=info,warn".into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}

/// Install a formatter with an explicit filter such as `"dear_gizmo=debug"`
pub fn init_tracing_with_filter(filter: &str) -> bool {
    use tracing_subscriber::{EnvFilter, fmt};

    fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Formatter that writes through the test harness, for `cargo test` output
pub fn init_test_tracing() -> bool {
    use tracing_subscriber::{EnvFilter, fmt};

    fmt()
        .with_env_filter(EnvFilter::new("dear_gizmo=debug"))
        .with_test_writer()
        .try_init()
        .is_ok()
}
