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

//! Application events and the main event loop.
//!
//! Every state change of the UI happens on the main thread, in response to
//! an [`AppEvent`] received here. Events come from the key input thread, the
//! tick thread, the task worker and the player workers.
//!
//! # Organization
//!
//! * [`handlers`]: one handler per event that is not keyboard input.
//! * [`key_handlers`]: routing of keyboard input to the commander, the
//!   active screen and the global key bindings.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

pub(crate) use handlers::load_home;

use std::{io::Stdout, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error};

use crate::{
    App, MainView,
    components::Notification,
    errors::{AuthError, FetchError},
    model::{MediaCollection, UserProfile, session::SessionChange},
    playback::MediaEvent,
    render::draw,
};

/// The scroll containers, each with its own playback controller and player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ContainerId {
    Trending,
    Feed,
    Profile,
    Search,
}

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,
    ExitApplication,

    SetMainView(MainView),
    Refresh,
    NewSearchQuery(String),

    Media(ContainerId, MediaEvent),

    TrendingLoaded(MediaCollection),
    FeedLoaded(MediaCollection),
    UserItemsLoaded(String, MediaCollection),
    SearchResultsReady(String, MediaCollection),
    FetchFailed(ContainerId, FetchError),

    SignIn { email: String, password: String },
    SignOut,
    CurrentUserResolved(Option<UserProfile>),
    SessionCheckFailed(AuthError),
    SignedIn(UserProfile),
    SignInFailed(AuthError),
    SignedOut,
    SessionChanged(SessionChange),

    Notify(Notification),

    Error(String),
}

/// Components that react to raw terminal input.
pub(crate) trait AppEventProcessor {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()>;
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a quit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            debug!("exit requested");
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Tick => handle_tick(app),
            AppEvent::SetMainView(view) => handle_set_main_view(app, view),
            AppEvent::Refresh => handle_refresh(app)?,
            AppEvent::NewSearchQuery(query) => handle_new_search_query(app, query)?,
            AppEvent::Media(container, event) => handle_media_event(app, container, event),
            AppEvent::TrendingLoaded(items) => handle_trending_loaded(app, items),
            AppEvent::FeedLoaded(items) => handle_feed_loaded(app, items),
            AppEvent::UserItemsLoaded(user_id, items) => handle_user_items_loaded(app, user_id, items),
            AppEvent::SearchResultsReady(query, items) => handle_search_results_ready(app, query, items),
            AppEvent::FetchFailed(container, err) => handle_fetch_failed(app, container, err),
            AppEvent::SignIn { email, password } => handle_sign_in(app, email, password)?,
            AppEvent::SignOut => handle_sign_out(app)?,
            AppEvent::CurrentUserResolved(user) => handle_current_user_resolved(app, user),
            AppEvent::SessionCheckFailed(err) => handle_session_check_failed(app, err),
            AppEvent::SignedIn(user) => handle_signed_in(app, user),
            AppEvent::SignInFailed(err) => handle_sign_in_failed(app, err),
            AppEvent::SignedOut => handle_signed_out(app),
            AppEvent::SessionChanged(change) => handle_session_changed(app, change)?,
            AppEvent::Notify(notification) => app.notifications.push(notification),
            AppEvent::Error(message) => {
                error!("{message}");
                app.notifications.push(Notification::error("Error", message));
            }
            AppEvent::ExitApplication => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}
