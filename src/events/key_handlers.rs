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

//! Keyboard input routing.
//!
//! A key goes to the command line first when it is open, then dismisses a
//! notification if one is on screen (`Esc`), then to the active screen, and
//! finally to the global key bindings.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    App, MainView,
    events::{AppEvent, AppEventProcessor},
};

/// Maps keyboard input to application actions.
///
/// # Errors
///
/// Returns an error if an event or task cannot be sent, which only happens
/// once the receiving side has shut down.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    if key.code == KeyCode::Esc && app.notifications.dismiss() {
        return Ok(());
    }

    match app.main_view {
        MainView::Home => app.home.process_event(event, &app.event_tx)?,
        MainView::Search => app.search_view.process_event(event, &app.event_tx)?,
        MainView::Profile => app.profile_view.process_event(event, &app.event_tx)?,
        MainView::SignIn => {}
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Home))?,
        KeyCode::Char('2') => app.event_tx.send(AppEvent::SetMainView(MainView::Search))?,
        KeyCode::Char('3') => app.event_tx.send(AppEvent::SetMainView(MainView::Profile))?,

        KeyCode::Char('/') => app.commander.open_with("search "),

        _ => {}
    }

    Ok(())
}
