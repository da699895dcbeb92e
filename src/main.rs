// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Video Feed TUI.
//!
//! A terminal client for a short-video sharing service, with a trending
//! carousel, a scrolling feed, search and a profile screen.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and the
//!   playback controller of every scroll container.
//! * **Background Workers** handle backend requests and video decoding, one
//!   MPV worker per container.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state. Visibility of container items is recomputed on every tick.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod commander;
mod components;
mod config;
mod content;
mod errors;
mod events;
mod model;
mod playback;
mod player;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::{
    commander::Commander,
    components::{
        Carousel, EmptyState, HomeView, Notifications, ProfileView, SearchView, VideoFeed,
    },
    config::AppConfig,
    content::AppwriteClient,
    events::{AppEvent, ContainerId, load_home, process_events},
    model::session::Session,
    playback::MediaResource,
    player::{MpvPlayer, PlayerOptions},
    tasks::AppTask,
    theme::Theme,
};

/// Interval between ticks; also the frame rate of the zoom animation.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

const LOG_FILE: &str = "vidfeed.log";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainView {
    Home,
    Search,
    Profile,
    SignIn,
}

/// Application state.
pub(crate) struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub session: Session,

    pub home: HomeView,
    pub search_view: SearchView,
    pub profile_view: ProfileView,

    pub commander: Commander,
    pub notifications: Notifications,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// Each scroll container gets its own MPV player, so that at most one
    /// video per container is ever loaded.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let options = PlayerOptions::from(&config.playback);
        Self::with_players(config, task_tx, move |container, event_tx| -> Box<dyn MediaResource> {
            Box::new(MpvPlayer::new(container, options.clone(), event_tx))
        })
    }

    /// Create application state with media resources from `player`, which
    /// is called once per scroll container.
    pub fn with_players<F>(config: AppConfig, task_tx: Sender<AppTask>, player: F) -> Self
    where
        F: Fn(ContainerId, Sender<AppEvent>) -> Box<dyn MediaResource>,
    {
        let (event_tx, event_rx) = mpsc::channel();

        let playback = &config.playback;
        let feed = |container: ContainerId, empty_state: EmptyState| {
            VideoFeed::new(
                container,
                player(container, event_tx.clone()),
                empty_state,
                playback.visibility_threshold,
            )
        };

        let trending = Carousel::new(
            player(ContainerId::Trending, event_tx.clone()),
            playback.visibility_threshold,
            Duration::from_millis(playback.zoom_duration_ms),
        );
        let home = HomeView::new(trending, feed(ContainerId::Feed, EmptyState::home()));
        let search_view = SearchView::new(feed(ContainerId::Search, EmptyState::search()));
        let profile_view = ProfileView::new(feed(ContainerId::Profile, EmptyState::profile()));

        let mut session = Session::new();
        session.subscribe(event_tx.clone());

        Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Home,
            event_tx,
            event_rx,
            task_tx,
            session,
            home,
            search_view,
            profile_view,
            commander: Commander::new(),
            notifications: Notifications::new(),
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error
/// if any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let _log_guard = init_logging(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Sends log output to a daily log file next to the configuration file.
///
/// The terminal belongs to the UI, so nothing is logged when there is no
/// configuration directory. `RUST_LOG` takes precedence over the configured
/// filter. The returned guard flushes the log when dropped.
fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let log_dir = config::config_dir()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour)
        && let Err(e) = util::term::set_terminal_bg(&hex)
    {
        warn!("failed to set terminal background: {e}");
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker owning the backend client.
/// * An input thread to poll for system keyboard events.
/// * A tick thread driving visibility updates and animation frames.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the backend client cannot be created or the event
/// processing loop encounters an unrecoverable application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    let backend = AppwriteClient::new(&app.config.backend).context("Failed to create backend client")?;
    tasks::spawn_task_worker(Box::new(backend), task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read()
                && tx_keys.send(AppEvent::Key(key)).is_err()
            {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Restore any previous session and populate the home screen.
    app.task_tx.send(AppTask::CheckSession)?;
    load_home(app)?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
