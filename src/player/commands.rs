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

//! MPV-backed playback engine and event processing.
//!
//! The worker thread bridges the controller's command interface and MPV's
//! property observation system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`PlayerCommand`]s (load, play, release).
//! 2. **Event Channel**: Sends [`AppEvent::Media`] events tagged with the
//!    ticket of the load they belong to. Nothing is sent while no load is
//!    current, so events from a released file never reach the controller.

use anyhow::{Context, Result};
use mpv::{EndFileReason, Format};
use std::{
    sync::mpsc::{Receiver, Sender, TryRecvError},
    thread,
};
use tracing::{debug, error, info, warn};

use crate::{
    events::{AppEvent, ContainerId},
    playback::{LoadTicket, MediaEvent, MediaEventKind, PlaybackStatus},
    player::PlayerOptions,
};

#[derive(Debug)]
pub(crate) enum PlayerCommand {
    Load(LoadTicket, String),
    Play,
    Release,
}

/// Spawns the player worker thread to process playback commands.
///
/// If MPV cannot be initialised, or shuts down and cannot be restarted, the
/// worker keeps draining its command channel and answers every load with a
/// failure, so that no item is left waiting for a load that will never
/// complete.
pub(crate) fn spawn_player_worker(
    container: ContainerId,
    options: PlayerOptions,
    command_rx: Receiver<PlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        let handler = match build_handler(&options) {
            Ok(handler) => handler,
            Err(e) => {
                error!(?container, "MPV initialisation failed: {e:#}");
                send_event(&event_tx, AppEvent::Error(format!("Video player unavailable: {e:#}")));
                reject_loads(container, command_rx, &event_tx, &format!("{e:#}"));
                return;
            }
        };

        let mut worker = PlayerWorker {
            container,
            options,
            handler,
            event_tx,
            ticket: None,
            status: PlaybackStatus::default(),
        };

        info!(?container, "player worker started");
        match worker.run(&command_rx) {
            Ok(()) => debug!(?container, "player worker stopped"),
            Err(e) => {
                error!(?container, "player worker failed: {e:#}");
                worker.fail_current(&format!("{e:#}"));
                reject_loads(container, command_rx, &worker.event_tx, &format!("{e:#}"));
            }
        }
    });
}

fn build_handler(options: &PlayerOptions) -> Result<mpv::MpvHandler> {
    let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;

    if let Some(vo) = &options.video_output {
        builder
            .set_option("vo", vo.as_str())
            .context("Failed to set video output")?;
    }

    let osc = if options.on_screen_controls { "yes" } else { "no" };
    builder
        .set_option("osc", osc)
        .context("Failed to set on-screen controller")?;
    builder
        .set_option("input-default-bindings", "yes")
        .context("Failed to enable default key bindings")?;
    builder
        .set_option("input-vo-keyboard", "yes")
        .context("Failed to enable window keyboard input")?;

    let mut handler = builder.build().context("Failed to build MPV handler")?;

    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;

    Ok(handler)
}

fn send_event(event_tx: &Sender<AppEvent>, event: AppEvent) {
    if let Err(e) = event_tx.send(event) {
        debug!("event channel closed, dropping {:?}", e.0);
    }
}

fn reject_loads(
    container: ContainerId,
    command_rx: Receiver<PlayerCommand>,
    event_tx: &Sender<AppEvent>,
    reason: &str,
) {
    while let Ok(command) = command_rx.recv() {
        if let PlayerCommand::Load(ticket, _) = command {
            let event = MediaEvent::new(ticket, MediaEventKind::Failed(reason.to_string()));
            send_event(event_tx, AppEvent::Media(container, event));
        }
    }
}

/// Translates an MPV event into a media event for the current load,
/// updating `status` along the way.
///
/// An end of file that is not an error only counts once the current file
/// has loaded; before that it belongs to the file being replaced.
fn translate(status: &mut PlaybackStatus, event: mpv::Event) -> Option<MediaEventKind> {
    match event {
        mpv::Event::FileLoaded => {
            status.is_loaded = true;
            Some(MediaEventKind::Loaded)
        }
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                let previous = status.position_millis;
                status.position_millis = (seconds * 1000.0) as u64;
                // One status update per second of playback is enough for the
                // progress display.
                (previous / 1000 != status.position_millis / 1000)
                    .then_some(MediaEventKind::Status(*status))
            }
            ("duration", Format::Double(seconds)) => {
                status.duration_millis = Some((seconds * 1000.0) as u64);
                Some(MediaEventKind::Status(*status))
            }
            ("pause", Format::Flag(paused)) => {
                status.is_playing = status.is_loaded && !paused;
                Some(MediaEventKind::Status(*status))
            }
            _ => None,
        },
        mpv::Event::EndFile(Ok(reason)) if status.is_loaded => {
            if !matches!(reason, EndFileReason::MPV_END_FILE_REASON_EOF) {
                debug!(?reason, "playback ended early");
            }
            status.is_playing = false;
            status.did_just_finish = true;
            Some(MediaEventKind::Status(*status))
        }
        mpv::Event::EndFile(Err(e)) => Some(MediaEventKind::Failed(format!("{e:?}"))),
        mpv::Event::Shutdown => Some(MediaEventKind::Failed("video player closed".to_string())),
        _ => None,
    }
}

struct PlayerWorker {
    container: ContainerId,
    options: PlayerOptions,
    handler: mpv::MpvHandler,
    event_tx: Sender<AppEvent>,
    ticket: Option<LoadTicket>,
    status: PlaybackStatus,
}

impl PlayerWorker {
    /// Alternates between draining commands and waiting briefly for MPV
    /// events, until the command channel is closed.
    fn run(&mut self, command_rx: &Receiver<PlayerCommand>) -> Result<()> {
        while self.process_commands(command_rx) {
            self.process_mpv_events()?;
        }

        if let Err(e) = self.handler.command(&["stop"]) {
            debug!(container = ?self.container, "stop on exit failed: {e:?}");
        }
        Ok(())
    }

    /// Drains and executes all pending commands.
    ///
    /// Returns `false` once the owning [`super::MpvPlayer`] has been dropped.
    fn process_commands(&mut self, command_rx: &Receiver<PlayerCommand>) -> bool {
        loop {
            match command_rx.try_recv() {
                Ok(command) => {
                    if let Err(e) = self.execute(command) {
                        self.fail_current(&format!("{e:#}"));
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn execute(&mut self, command: PlayerCommand) -> Result<()> {
        match command {
            PlayerCommand::Load(ticket, uri) => {
                debug!(container = ?self.container, ?ticket, %uri, "loading");
                self.ticket = Some(ticket);
                self.status = PlaybackStatus::default();
                self.handler.set_property("pause", true)?;
                self.handler
                    .command(&["loadfile", &uri, "replace"])
                    .context(format!("Failed to load file: {}", &uri))?;
            }
            PlayerCommand::Play => {
                self.handler
                    .set_property("pause", false)
                    .context("Failed to start playback")?;
            }
            PlayerCommand::Release => {
                self.ticket = None;
                self.handler.command(&["stop"]).context("Failed to stop playback")?;
            }
        }

        Ok(())
    }

    /// Polls for an MPV event and translates it for the current load.
    ///
    /// When MPV shuts down (its window was closed, or `q` was pressed in it)
    /// the current load fails and a fresh MPV context is built for the next
    /// one.
    fn process_mpv_events(&mut self) -> Result<()> {
        let Some(mpv_event) = self.handler.wait_event(0.05) else {
            return Ok(());
        };

        let shutdown = matches!(mpv_event, mpv::Event::Shutdown);

        if let Some(kind) = translate(&mut self.status, mpv_event) {
            let finished = matches!(
                kind,
                MediaEventKind::Failed(_) | MediaEventKind::Status(PlaybackStatus { did_just_finish: true, .. })
            );
            self.emit(kind)?;
            if finished {
                self.ticket = None;
            }
        }

        if shutdown {
            warn!(container = ?self.container, "MPV shut down, restarting");
            self.ticket = None;
            self.status = PlaybackStatus::default();
            self.handler = build_handler(&self.options).context("Failed to restart MPV")?;
        }

        Ok(())
    }

    fn emit(&self, kind: MediaEventKind) -> Result<()> {
        if let Some(ticket) = self.ticket {
            self.event_tx
                .send(AppEvent::Media(self.container, MediaEvent::new(ticket, kind)))
                .context("Failed to send media event")?;
        }
        Ok(())
    }

    fn fail_current(&mut self, reason: &str) {
        if let Some(ticket) = self.ticket.take() {
            let event = MediaEvent::new(ticket, MediaEventKind::Failed(reason.to_string()));
            send_event(&self.event_tx, AppEvent::Media(self.container, event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> PlaybackStatus {
        let mut status = PlaybackStatus::default();
        assert_eq!(translate(&mut status, mpv::Event::FileLoaded), Some(MediaEventKind::Loaded));
        status
    }

    fn finished(kind: Option<MediaEventKind>) -> bool {
        matches!(
            kind,
            Some(MediaEventKind::Status(PlaybackStatus { did_just_finish: true, is_playing: false, .. }))
        )
    }

    #[test]
    fn end_of_file_finishes_playback() {
        let mut status = loaded();
        let kind = translate(&mut status, mpv::Event::EndFile(Ok(EndFileReason::MPV_END_FILE_REASON_EOF)));
        assert!(finished(kind));
    }

    #[test]
    fn quitting_the_player_window_finishes_playback() {
        for reason in [
            EndFileReason::MPV_END_FILE_REASON_QUIT,
            EndFileReason::MPV_END_FILE_REASON_STOP,
            EndFileReason::MPV_END_FILE_REASON_REDIRECT,
        ] {
            let mut status = loaded();
            assert!(finished(translate(&mut status, mpv::Event::EndFile(Ok(reason)))));
        }
    }

    #[test]
    fn end_of_replaced_file_is_ignored_while_loading() {
        let mut status = PlaybackStatus::default();
        let kind = translate(&mut status, mpv::Event::EndFile(Ok(EndFileReason::MPV_END_FILE_REASON_STOP)));
        assert_eq!(kind, None);
        assert!(!status.did_just_finish);
    }

    #[test]
    fn load_errors_and_shutdown_fail_the_load() {
        let mut status = PlaybackStatus::default();
        let kind = translate(&mut status, mpv::Event::EndFile(Err(mpv::Error::MPV_ERROR_LOADING_FAILED)));
        assert!(matches!(kind, Some(MediaEventKind::Failed(_))));

        let mut status = loaded();
        let kind = translate(&mut status, mpv::Event::Shutdown);
        assert!(matches!(kind, Some(MediaEventKind::Failed(reason)) if reason == "video player closed"));
    }

    #[test]
    fn position_updates_once_per_second() {
        let mut status = loaded();
        let tick = |status: &mut PlaybackStatus, seconds: f64| {
            translate(
                status,
                mpv::Event::PropertyChange {
                    name: "time-pos",
                    change: Format::Double(seconds),
                    reply_userdata: 0,
                },
            )
        };

        assert!(tick(&mut status, 0.2).is_none());
        assert!(tick(&mut status, 0.9).is_none());
        match tick(&mut status, 1.1) {
            Some(MediaEventKind::Status(s)) => assert_eq!(s.position_millis, 1100),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pause_flag_only_counts_once_loaded() {
        let pause = |paused| mpv::Event::PropertyChange {
            name: "pause",
            change: Format::Flag(paused),
            reply_userdata: 0,
        };

        let mut status = PlaybackStatus::default();
        translate(&mut status, pause(false));
        assert!(!status.is_playing);

        let mut status = loaded();
        translate(&mut status, pause(false));
        assert!(status.is_playing);
    }
}
