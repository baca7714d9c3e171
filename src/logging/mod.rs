use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a fmt subscriber filtered by RUST_LOG, or by 'level' when the
/// variable is not set. Calling it again is harmless.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}
