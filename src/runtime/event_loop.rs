use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::LoadResult;
use crate::browser::Browser;
use crate::config;
use crate::session::Session;
use crate::ui;

/// Progress refresh cadence while a track is active.
const TICK_PERIOD: Duration = Duration::from_millis(10);
/// Input poll timeout when there is nothing to animate.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
    show_help: bool,
    last_tick: Instant,
}

impl EventLoopState {
    fn new() -> Self {
        Self {
            pending_gg: false,
            show_help: false,
            last_tick: Instant::now(),
        }
    }
}

/// Main terminal event loop: draws the UI, folds in loader completions,
/// handles input and drives the session's periodic tick. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    browser: &mut Browser,
    session: &mut Session,
    load_tx: &Sender<LoadResult>,
    load_rx: &Receiver<LoadResult>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::new();

    loop {
        terminal.draw(|f| ui::draw(f, browser, session, settings, state.show_help))?;

        // Loader completions arrive as messages; fold them in before
        // handling new input.
        while let Ok(result) = load_rx.try_recv() {
            session.apply_load(result);
        }

        let timeout = if session.ticking() {
            TICK_PERIOD
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, browser, session, load_tx, &mut state) {
                    break;
                }
            }
        }

        if session.ticking() && state.last_tick.elapsed() >= TICK_PERIOD {
            session.on_tick();
            state.last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Handle one key press; returns true when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    browser: &mut Browser,
    session: &mut Session,
    load_tx: &Sender<LoadResult>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('?') => {
            state.pending_gg = false;
            state.show_help = !state.show_help;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            browser.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            browser.prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                browser.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            browser.select_last();
        }
        KeyCode::Enter | KeyCode::Char('l') => {
            state.pending_gg = false;
            if let Some(path) = browser.enter(&settings.browser) {
                session.request_load(&path, &settings.browser.extensions, load_tx);
            }
        }
        KeyCode::Backspace | KeyCode::Char('h') => {
            state.pending_gg = false;
            browser.ascend(&settings.browser);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            session.toggle_pause();
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            session.toggle_loop();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
