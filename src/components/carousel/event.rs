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

//! Input handling for the trending carousel.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};

use crate::{
    components::{Carousel, Notification},
    events::{AppEvent, AppEventProcessor},
};

impl AppEventProcessor for Carousel {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()> {
        let Event::Key(key_event) = event else {
            return Ok(());
        };

        match key_event.code {
            KeyCode::Char('h') | KeyCode::Left => self.scroll_left(),
            KeyCode::Char('l') | KeyCode::Right => self.scroll_right(),

            KeyCode::Enter => {
                if let Err(e) = self.tap_active() {
                    event_tx.send(AppEvent::Notify(Notification::playback(&e)))?;
                }
            }

            KeyCode::Char('s') | KeyCode::Esc => self.stop(),

            _ => {}
        }

        Ok(())
    }
}
