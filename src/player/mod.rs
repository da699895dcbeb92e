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

//! Video playback through MPV.
//!
//! This module provides [`MpvPlayer`], the [`MediaResource`] used by every
//! scroll container. It manages a background worker thread that owns the
//! libmpv context, ensuring that network fetches and decoding never block
//! the main application thread. MPV opens its own video window with its
//! on-screen controller, which serves as the native playback controls.

mod commands;

use std::sync::mpsc;

use anyhow::{Context, Result};

use crate::{
    config::PlaybackConfig,
    events::{AppEvent, ContainerId},
    playback::{LoadTicket, MediaResource},
    player::commands::PlayerCommand,
};

/// Options passed to each MPV context.
#[derive(Clone, Debug, Default)]
pub(crate) struct PlayerOptions {
    pub(crate) video_output: Option<String>,
    pub(crate) on_screen_controls: bool,
}

impl From<&PlaybackConfig> for PlayerOptions {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            video_output: config.video_output.clone().filter(|vo| !vo.is_empty()),
            on_screen_controls: config.on_screen_controls,
        }
    }
}

/// A handle to one MPV playback engine.
///
/// This struct acts as a command proxy; it does not decode anything itself
/// but instead sends instructions to a background worker thread. Dropping
/// the handle closes the command channel, which stops the worker.
pub(crate) struct MpvPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<PlayerCommand>,
}

impl MpvPlayer {
    /// Spawns the player worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `container` - The scroll container this player serves; media events
    ///   are tagged with it.
    /// * `options` - MPV options such as the video output driver.
    /// * `event_tx` - A channel to send media events back to the main event
    ///   loop.
    pub(crate) fn new(
        container: ContainerId,
        options: PlayerOptions,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();

        commands::spawn_player_worker(container, options, command_rx, event_tx);

        Self { command_tx }
    }
}

impl MediaResource for MpvPlayer {
    fn load(&mut self, ticket: LoadTicket, uri: &str) -> Result<()> {
        self.command_tx
            .send(PlayerCommand::Load(ticket, uri.to_string()))
            .context("Player worker is not running")?;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.command_tx
            .send(PlayerCommand::Play)
            .context("Player worker is not running")?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.command_tx
            .send(PlayerCommand::Release)
            .context("Player worker is not running")?;
        Ok(())
    }
}
