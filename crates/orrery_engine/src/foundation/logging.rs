//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG` alone
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level
///
/// `level` is an env_logger filter string such as `"info"` or
/// `"orrery_engine=debug,warn"`. A `RUST_LOG` variable, when set, takes
/// precedence. Calling this more than once keeps the first logger.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
