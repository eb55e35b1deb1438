//! Logger setup for binaries and tests

/// Filter used when neither the caller nor `RUST_LOG` picks one
pub const DEFAULT_FILTER: &str = "info";

/// Initialize logging from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
///
/// Returns `false` when a logger was already installed.
pub fn init() -> bool {
    init_with_level(DEFAULT_FILTER)
}

/// Initialize logging with a default filter, still overridable through `RUST_LOG`
///
/// Returns `false` when a logger was already installed (tests, embedding apps).
pub fn init_with_level(default_filter: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
