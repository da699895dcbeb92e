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

//! Input handling for the video feed.
//!
//! Maps keyboard events to card navigation and tap-to-play. A playback
//! failure becomes a notification; the card is back to idle by then.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};

use crate::{
    components::{Notification, VideoFeed},
    events::{AppEvent, AppEventProcessor},
};

impl AppEventProcessor for VideoFeed {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()> {
        let Event::Key(key_event) = event else {
            return Ok(());
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.goto_next(),
            KeyCode::Char('k') | KeyCode::Up => self.goto_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.goto_first(),
            KeyCode::Char('G') | KeyCode::End => self.goto_last(),

            KeyCode::Enter if self.items.is_empty() => {
                if !self.is_pending() {
                    event_tx.send(self.empty_state.action.event())?;
                }
            }

            KeyCode::Enter => {
                if let Err(e) = self.tap_selected() {
                    event_tx.send(AppEvent::Notify(Notification::playback(&e)))?;
                }
            }

            KeyCode::Char('s') | KeyCode::Esc => self.stop(),

            _ => {}
        }

        Ok(())
    }
}
