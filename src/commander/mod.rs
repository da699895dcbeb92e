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

//! Command-line input logic and state management.
//!
//! `:` opens the command line. Typing is handled by a text input component;
//! `Enter` parses the buffer and dispatches the corresponding application
//! event, `Esc` closes the line.
//!
//! | Command                     | Effect                          |
//! |-----------------------------|---------------------------------|
//! | `q`                         | quit                            |
//! | `search <terms>`            | search video titles             |
//! | `refresh`                   | reload the current screen       |
//! | `login <email> <password>`  | sign in                         |
//! | `logout`                    | sign out                        |
//! | `home`, `1`                 | home screen                     |
//! | `2`                         | search screen                   |
//! | `profile`, `3`              | profile screen                  |

use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyCode};
use tracing::warn;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{MainView, components::Notification, events::AppEvent};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Opens the command line with `prefix` already typed.
    pub(crate) fn open_with(&mut self, prefix: &str) {
        self.active = true;
        self.input = Input::new(prefix.to_string());
    }

    /// The buffer as shown on screen, with any password masked.
    pub(crate) fn display_value(&self) -> String {
        let value = self.input.value();
        let mut parts = value.splitn(3, ' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("login"), Some(email), Some(password)) => {
                format!("login {email} {}", "*".repeat(password.chars().count()))
            }
            _ => value.to_string(),
        }
    }

    /// Handles a terminal event, returning `true` if the command line
    /// consumed it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                if let Some(event) = parse_command(self.input.value()) {
                    if let Err(e) = event_tx.send(event) {
                        warn!("failed to dispatch command: {e}");
                    }
                }
                self.input.reset();
                self.active = false;
            }

            _ => {
                // Delegate all other keys to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Translates a command line into the event it stands for.
pub(crate) fn parse_command(buffer: &str) -> Option<AppEvent> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        [] => return None,

        ["q"] => AppEvent::ExitApplication,

        ["search", terms @ ..] => AppEvent::NewSearchQuery(terms.join(" ")),

        ["refresh"] => AppEvent::Refresh,

        ["login", email, password] => AppEvent::SignIn {
            email: email.to_string(),
            password: password.to_string(),
        },
        ["login", ..] => AppEvent::Notify(Notification::error(
            "Sign in",
            "Usage: login <email> <password>",
        )),

        ["logout"] => AppEvent::SignOut,

        ["home"] | ["1"] => AppEvent::SetMainView(MainView::Home),
        ["2"] => AppEvent::SetMainView(MainView::Search),
        ["profile"] | ["3"] => AppEvent::SetMainView(MainView::Profile),

        [cmd, ..] => AppEvent::Notify(Notification::error(
            "Unknown command",
            format!("'{cmd}' is not a command"),
        )),
    };

    Some(event)
}
