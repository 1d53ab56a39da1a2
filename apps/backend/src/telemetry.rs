//! Process-wide tracing setup.
//!
//! JSON lines on stdout so the request-trace fields (`trace_id`, `method`,
//! `path`, `status`) stay machine-readable. `RUST_LOG` overrides the default
//! filter; the default keeps this crate at `info` and quiets the per-statement
//! chatter from the database layers.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,jobboard_backend=info,sqlx=warn,sea_orm=warn";

/// Install the global subscriber. Call once, before the server binds.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_ansi(false).json())
        .init();
}
