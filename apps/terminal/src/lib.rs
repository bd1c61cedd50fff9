//! # Orderdesk Terminal Library
//!
//! Startup wiring for the order-entry terminal: logging, configuration,
//! the HTTP client, and the async runtime that drives it.
//!
//! ## Module Organization
//! ```text
//! orderdesk_terminal/
//! ├── lib.rs          ◄─── You are here (setup & run)
//! ├── app.rs          ◄─── Event loop, key mapping, effect execution
//! └── ui.rs           ◄─── Screen rendering
//! ```

pub mod app;
pub mod ui;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use orderdesk_api::{ApiConfig, OrderApi};

use crate::app::App;

/// Environment variable holding the order server URL.
pub const API_URL_ENV: &str = "ORDERDESK_API_URL";

/// Default order server URL when the environment does not set one.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default log filter when `RUST_LOG` is unset: info everywhere, debug for
/// the workspace's own crates.
pub const DEFAULT_LOG_FILTER: &str =
    "info,orderdesk_core=debug,orderdesk_api=debug,orderdesk_terminal=debug";

/// Runs the terminal application until the operator quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Resolve Server URL ───────────────────────────────────────────────► │
/// │     • ORDERDESK_API_URL, default http://localhost:5000                  │
/// │     • Normalized by ApiConfig (scheme, trailing /api)                   │
/// │                                                                         │
/// │  3. Build Client & Runtime ───────────────────────────────────────────► │
/// │     • One OrderApi for the whole session                                │
/// │     • Tokio runtime; the event loop blocks on one request at a time     │
/// │                                                                         │
/// │  4. Run the Event Loop ───────────────────────────────────────────────► │
/// │     • Alternate screen + raw mode, restored on exit                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let base_url =
        std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let config = ApiConfig::new(&base_url);
    info!(base_url = %config.base_url, "starting orderdesk terminal");

    let api = OrderApi::new(config).context("failed to build the order API client")?;
    let runtime =
        tokio::runtime::Runtime::new().context("failed to start the async runtime")?;

    App::new(api, runtime).run()
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr: stdout belongs to the alternate screen while the
/// event loop is running.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderdesk_core=trace` - Show trace for the core crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_targets_the_workspace_crates() {
        // Directives must name the crates as the compiler names them
        // (underscores), or they silently match nothing.
        let directives = EnvFilter::new(DEFAULT_LOG_FILTER).to_string();
        for target in ["orderdesk_core", "orderdesk_api", "orderdesk_terminal"] {
            assert!(
                directives.contains(&format!("{target}=debug")),
                "no debug directive for {target}: {directives}"
            );
        }
    }
}
