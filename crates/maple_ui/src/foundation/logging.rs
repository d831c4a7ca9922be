//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Respects the `RUST_LOG` environment variable and falls back to `info`
/// when it is unset. Host programs call this once before creating a
/// [`Context`](crate::Context).
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
