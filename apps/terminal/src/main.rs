//! # Orderdesk Terminal Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Orderdesk Terminal                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  Terminal (ratatui + crossterm)                  │  │
//! │  │  • Customer Grid        • Product Grid                           │  │
//! │  │  • Keypad Modal         • Cart Table + Payment                   │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ key events                            │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     App Event Loop (this crate)                  │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Delegates to lib.rs                              │  │
//! │  │  lib.rs ─────► Logging, config, client, runtime                 │  │
//! │  │  app.rs ─────► Key → Intent mapping, Effect execution           │  │
//! │  │  ui.rs ──────► Screen rendering                                 │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ Intents / Effects                     │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │   orderdesk-core (Session reducer)  +  orderdesk-api (HTTP)      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Read the order server URL from the environment
//! 3. Build the HTTP client and the async runtime
//! 4. Enter the alternate screen and run the event loop

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match orderdesk_terminal::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("orderdesk: {err:#}");
            ExitCode::FAILURE
        }
    }
}
