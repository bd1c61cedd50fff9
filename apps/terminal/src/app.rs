//! # Event Loop
//!
//! The bridge between the terminal and the pure session reducer. Key events
//! become [`Intent`]s through one total mapping function; [`Effect`]s coming
//! back from the reducer are executed against the HTTP client, and their
//! results are fed back in as new intents.
//!
//! ## Loop Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          One Iteration                                  │
//! │                                                                         │
//! │  pump() ──► draw(session) ──► poll key ──► key_action(session, key)    │
//! │    │                                             │                      │
//! │    │ finished in-flight request?        Apply(intent)                   │
//! │    │ fold its intent back in                     │                      │
//! │    │                            session.apply(intent) ──► effects      │
//! │    │                                             │                      │
//! │    └──────── spawn next queued effect ◄──────────┘                      │
//! │                                                                         │
//! │  At most one request is in flight; further effects queue behind it in  │
//! │  order. The UI keeps drawing and handling keys while a request runs,   │
//! │  so a slow server never freezes the screen.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::task::JoinHandle;
use tracing::warn;

use orderdesk_api::OrderApi;
use orderdesk_core::{Effect, Intent, Screen, Session};

use crate::ui;

/// The unit keys on the keypad, in display order.
///
/// Mapped to the first letter of each symbol: `k`, `g`, `e`, `b`.
pub const UNITS: [&str; 4] = ["kg", "g", "ea", "box"];

// =============================================================================
// Key Mapping
// =============================================================================

/// What a key press means in the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an intent to the reducer.
    Apply(Intent),
    /// Leave the application.
    Quit,
    /// Key has no meaning right now.
    Ignore,
}

/// Maps a key press to an action, given the current session state.
///
/// The layering mirrors the rendering: a pending notice swallows everything
/// except its dismissal, an open keypad swallows everything except its own
/// keys, and only then does the active screen interpret the key.
pub fn key_action(session: &Session, code: KeyCode) -> KeyAction {
    if session.notice.is_some() {
        return match code {
            KeyCode::Enter | KeyCode::Esc => KeyAction::Apply(Intent::DismissNotice),
            _ => KeyAction::Ignore,
        };
    }

    if session.keypad.is_some() {
        return match code {
            KeyCode::Char(c @ '0'..='9') => {
                KeyAction::Apply(Intent::KeypadDigit(c as u8 - b'0'))
            }
            KeyCode::Char('o') => KeyAction::Apply(Intent::KeypadDoubleZero),
            KeyCode::Char('k') => KeyAction::Apply(Intent::KeypadUnit(UNITS[0].to_string())),
            KeyCode::Char('g') => KeyAction::Apply(Intent::KeypadUnit(UNITS[1].to_string())),
            KeyCode::Char('e') => KeyAction::Apply(Intent::KeypadUnit(UNITS[2].to_string())),
            KeyCode::Char('b') => KeyAction::Apply(Intent::KeypadUnit(UNITS[3].to_string())),
            KeyCode::Char('c') => KeyAction::Apply(Intent::KeypadClear),
            KeyCode::Backspace => KeyAction::Apply(Intent::KeypadBackspace),
            KeyCode::Enter => KeyAction::Apply(Intent::KeypadConfirm),
            KeyCode::Esc => KeyAction::Apply(Intent::KeypadClose),
            _ => KeyAction::Ignore,
        };
    }

    match session.screen {
        Screen::SelectCustomer => match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char(c @ '1'..='9') => {
                KeyAction::Apply(Intent::SelectCustomer(grid_index(c)))
            }
            _ => KeyAction::Ignore,
        },
        Screen::SelectProduct => match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char(c @ '1'..='9') => {
                KeyAction::Apply(Intent::SelectProduct(grid_index(c)))
            }
            KeyCode::Char('p') => KeyAction::Apply(Intent::GoToPayment),
            _ => KeyAction::Ignore,
        },
        Screen::Payment => match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Enter => KeyAction::Apply(Intent::CompleteOrder),
            KeyCode::Esc | KeyCode::Char('b') => KeyAction::Apply(Intent::BackToProducts),
            _ => KeyAction::Ignore,
        },
    }
}

/// Converts a grid key (`1`-`9`) to a 0-based index.
fn grid_index(c: char) -> usize {
    (c as u8 - b'1') as usize
}

// =============================================================================
// Effect Execution
// =============================================================================

/// Executes one effect against the client and reports the result as the
/// intent the reducer expects.
///
/// Failures never escape: every error becomes the corresponding "it did not
/// work" intent, so the session always hears back.
pub async fn perform(api: &OrderApi, effect: Effect) -> Intent {
    match effect {
        Effect::FetchCustomers => match api.customers().await {
            Ok(customers) => Intent::CustomersLoaded(customers),
            Err(err) => {
                warn!(%err, "customer fetch failed");
                Intent::CustomersUnavailable
            }
        },

        Effect::FetchProducts => match api.products().await {
            Ok(products) => Intent::ProductsLoaded(products),
            Err(err) => {
                warn!(%err, "product fetch failed");
                Intent::ProductsUnavailable
            }
        },

        Effect::LookupPrice { product_id, unit } => {
            match api.unit_price(&product_id, &unit).await {
                Ok(quote) => Intent::QuoteArrived(quote.map(|q| q.price)),
                Err(err) => {
                    // A lookup the server cannot answer and a lookup that
                    // never reached the server render the same way: the
                    // modal shows "no price info" and confirm stays blocked.
                    warn!(%err, product_id, unit, "price lookup failed");
                    Intent::QuoteArrived(None)
                }
            }
        }

        Effect::SubmitOrder(draft) => match api.submit_order(&draft).await {
            Ok(receipt) => Intent::OrderAccepted {
                slip_number: receipt.slip_number,
            },
            Err(err) => {
                warn!(%err, "order submission failed");
                Intent::OrderRejected
            }
        },
    }
}

// =============================================================================
// App
// =============================================================================

/// The running application: session state plus the I/O it needs.
pub struct App {
    session: Session,
    api: OrderApi,
    runtime: tokio::runtime::Runtime,
    /// Effects waiting their turn behind the in-flight request.
    pending: VecDeque<Effect>,
    /// The one outstanding request, if any.
    in_flight: Option<JoinHandle<Intent>>,
    should_quit: bool,
}

impl App {
    /// Creates the app with a fresh session.
    pub fn new(api: OrderApi, runtime: tokio::runtime::Runtime) -> Self {
        App {
            session: Session::new(),
            api,
            runtime,
            pending: VecDeque::new(),
            in_flight: None,
            should_quit: false,
        }
    }

    /// Sets up the terminal, runs the event loop, and restores the terminal
    /// even when the loop errors.
    pub fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        self.dispatch(Intent::Start);

        while !self.should_quit {
            self.pump();

            terminal.draw(|frame| ui::draw(frame, &self.session))?;

            // The short poll doubles as the completion-check interval for
            // the in-flight request; drawing and key handling never wait
            // on the network.
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                // Windows terminals also deliver Release/Repeat events.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key_action(&self.session, key.code) {
                    KeyAction::Apply(intent) => self.dispatch(intent),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Ignore => {}
                }
            }
        }
        Ok(())
    }

    /// Applies an intent and queues every effect it produces.
    ///
    /// Effects run one at a time, in order; if a request is already in
    /// flight the new effects wait behind it.
    fn dispatch(&mut self, intent: Intent) {
        self.pending.extend(self.session.apply(intent));
        self.start_next();
    }

    /// Folds a finished in-flight request back into the session.
    fn pump(&mut self) {
        let Some(handle) = self.in_flight.take() else {
            return;
        };
        if !handle.is_finished() {
            self.in_flight = Some(handle);
            return;
        }
        match self.runtime.block_on(handle) {
            Ok(intent) => self.dispatch(intent),
            // Join errors only arise from a panicked task; perform() maps
            // every request failure to an intent instead.
            Err(err) => warn!(%err, "request task failed"),
        }
    }

    /// Spawns the next queued effect if nothing is in flight.
    fn start_next(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        let Some(effect) = self.pending.pop_front() else {
            return;
        };
        let api = self.api.clone();
        self.in_flight = Some(
            self.runtime
                .spawn(async move { perform(&api, effect).await }),
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
