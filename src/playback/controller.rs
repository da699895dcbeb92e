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

//! Per-container playback state machine.
//!
//! Each scroll container owns one [`PlaybackController`] and, through it, one
//! media resource. The controller holds at most one *current* item, the one
//! that is loading or playing; every other item is implicitly idle. Tapping
//! a new item therefore releases the previous one first, so two items of the
//! same container can never play at once.
//!
//! State transitions:
//!
//! ```text
//! Idle --tap--> Loading --loaded--> Playing --finished/stop--> Idle
//!                  |                   |
//!                  +------failed-------+--> Errored --> Idle
//! ```
//!
//! Media events are matched against the ticket of the current load. Events
//! for any other ticket belong to a load that was stopped or superseded and
//! are dropped, so a late completion cannot bring stale playback back.

use tracing::{debug, warn};

use crate::{
    errors::PlaybackError,
    model::{ItemId, MediaItem},
    playback::{LoadTicket, MediaEvent, MediaEventKind, MediaResource, PlaybackState, PlaybackStatus},
};

struct CurrentPlayback {
    item: ItemId,
    ticket: LoadTicket,
    state: PlaybackState,
    status: Option<PlaybackStatus>,
}

pub(crate) struct PlaybackController {
    media: Box<dyn MediaResource>,
    current: Option<CurrentPlayback>,
    next_ticket: u64,
}

impl PlaybackController {
    pub(crate) fn new(media: Box<dyn MediaResource>) -> Self {
        Self {
            media,
            current: None,
            next_ticket: 1,
        }
    }

    pub(crate) fn state(&self, id: &ItemId) -> PlaybackState {
        match &self.current {
            Some(current) if &current.item == id => current.state,
            _ => PlaybackState::Idle,
        }
    }

    /// The latest status of `id`, available only while it is playing.
    pub(crate) fn status(&self, id: &ItemId) -> Option<&PlaybackStatus> {
        match &self.current {
            Some(current) if &current.item == id && current.state == PlaybackState::Playing => {
                current.status.as_ref()
            }
            _ => None,
        }
    }

    /// The item currently loading or playing, if any.
    pub(crate) fn current_item(&self) -> Option<&ItemId> {
        self.current.as_ref().map(|current| &current.item)
    }

    /// Requests playback of `item`.
    ///
    /// Tapping the item that is already loading or playing does nothing.
    /// Otherwise any current item is released and `item` starts loading.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaybackError`] if the load request could not be issued;
    /// the item is back to idle by then.
    pub(crate) fn tap(&mut self, item: &MediaItem) -> Result<(), PlaybackError> {
        if self.current_item() == Some(&item.id) {
            debug!(item = %item.id, "ignoring tap on current item");
            return Ok(());
        }

        self.release_current();

        let ticket = self.mint_ticket();
        debug!(item = %item.id, ?ticket, "Idle -> Loading");
        self.current = Some(CurrentPlayback {
            item: item.id.clone(),
            ticket,
            state: PlaybackState::Loading,
            status: None,
        });

        if let Err(e) = self.media.load(ticket, &item.video_uri) {
            return Err(self.fail(PlaybackError::Unavailable(format!("{e:#}"))));
        }

        Ok(())
    }

    /// Applies an event reported by the media resource.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaybackError`] if the event reports a failure for the
    /// current load; the item is back to idle by then.
    pub(crate) fn handle_media_event(&mut self, event: MediaEvent) -> Result<(), PlaybackError> {
        let Some(current) = self.current.as_mut() else {
            debug!(ticket = ?event.ticket, "dropping media event, nothing is playing");
            return Ok(());
        };

        if current.ticket != event.ticket {
            debug!(ticket = ?event.ticket, current = ?current.ticket, "dropping stale media event");
            return Ok(());
        }

        match event.kind {
            MediaEventKind::Loaded => {
                if current.state != PlaybackState::Loading {
                    return Ok(());
                }

                if let Err(e) = self.media.play() {
                    return Err(self.fail(PlaybackError::Unavailable(format!("{e:#}"))));
                }

                if let Some(current) = self.current.as_mut() {
                    debug!(item = %current.item, "Loading -> Playing");
                    current.state = PlaybackState::Playing;
                }
            }

            MediaEventKind::Status(status) => {
                if status.did_just_finish && current.state == PlaybackState::Playing {
                    debug!(item = %current.item, "playback finished");
                    self.release_current();
                } else {
                    current.status = Some(status);
                }
            }

            MediaEventKind::Failed(reason) => {
                let item = current.item.clone();
                return Err(self.fail(PlaybackError::LoadFailed { item, reason }));
            }
        }

        Ok(())
    }

    /// Returns the current item to idle at the user's request.
    pub(crate) fn stop(&mut self) {
        self.release_current();
    }

    /// Stops the current item if it is not among `visible`.
    ///
    /// Returns `true` if playback was stopped.
    pub(crate) fn retain_visible(&mut self, visible: &[ItemId]) -> bool {
        match self.current_item() {
            Some(id) if !visible.contains(id) => {
                debug!(item = %id, "current item scrolled out of view");
                self.release_current();
                true
            }
            _ => false,
        }
    }

    /// Forgets all playback state, for when the collection is replaced.
    pub(crate) fn reset(&mut self) {
        self.release_current();
    }

    fn mint_ticket(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    fn release_current(&mut self) {
        if let Some(current) = self.current.take() {
            debug!(item = %current.item, from = ?current.state, "-> Idle");
            if let Err(e) = self.media.release() {
                warn!("failed to release media resource: {e:#}");
            }
        }
    }

    fn fail(&mut self, err: PlaybackError) -> PlaybackError {
        if let Some(current) = self.current.as_mut() {
            warn!(item = %current.item, from = ?current.state, "-> Errored: {err}");
            current.state = PlaybackState::Errored;
        }
        self.release_current();
        err
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::fixtures::item,
        playback::testing::{FakeMedia, MediaCall},
    };

    fn loaded(ticket: LoadTicket) -> MediaEvent {
        MediaEvent::new(ticket, MediaEventKind::Loaded)
    }

    fn finished(ticket: LoadTicket) -> MediaEvent {
        MediaEvent::new(
            ticket,
            MediaEventKind::Status(PlaybackStatus {
                is_loaded: true,
                did_just_finish: true,
                position_millis: 30_000,
                duration_millis: Some(30_000),
                ..Default::default()
            }),
        )
    }

    fn progress(ticket: LoadTicket, position_millis: u64) -> MediaEvent {
        MediaEvent::new(
            ticket,
            MediaEventKind::Status(PlaybackStatus {
                is_loaded: true,
                is_playing: true,
                position_millis,
                duration_millis: Some(30_000),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn tap_loads_then_plays() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let a = item("a");

        assert_eq!(controller.state(&a.id), PlaybackState::Idle);

        controller.tap(&a).unwrap();
        assert_eq!(controller.state(&a.id), PlaybackState::Loading);
        let ticket = media.last_ticket().unwrap();

        controller.handle_media_event(loaded(ticket)).unwrap();
        assert_eq!(controller.state(&a.id), PlaybackState::Playing);
        assert_eq!(
            media.calls(),
            vec![MediaCall::Load(ticket, a.video_uri.clone()), MediaCall::Play]
        );
    }

    #[test]
    fn tapping_another_item_releases_the_first() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let (a, b) = (item("a"), item("b"));

        controller.tap(&a).unwrap();
        let first = media.last_ticket().unwrap();
        controller.handle_media_event(loaded(first)).unwrap();

        controller.tap(&b).unwrap();
        let second = media.last_ticket().unwrap();
        controller.handle_media_event(loaded(second)).unwrap();

        assert_ne!(first, second);
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
        assert_eq!(controller.state(&b.id), PlaybackState::Playing);
        assert_eq!(controller.current_item(), Some(&b.id));
        assert!(media.calls().contains(&MediaCall::Release));
    }

    #[test]
    fn late_completion_does_not_resurrect_playback() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let a = item("a");

        controller.tap(&a).unwrap();
        let ticket = media.last_ticket().unwrap();
        controller.stop();
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);

        controller.handle_media_event(loaded(ticket)).unwrap();
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
        assert!(!media.calls().contains(&MediaCall::Play));
    }

    #[test]
    fn late_completion_of_superseded_load_is_ignored() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let (a, b) = (item("a"), item("b"));

        controller.tap(&a).unwrap();
        let stale = media.last_ticket().unwrap();
        controller.tap(&b).unwrap();

        controller.handle_media_event(loaded(stale)).unwrap();
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
        assert_eq!(controller.state(&b.id), PlaybackState::Loading);
    }

    #[test]
    fn finishing_returns_to_idle_and_clears_status() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let a = item("a");

        controller.tap(&a).unwrap();
        let ticket = media.last_ticket().unwrap();
        controller.handle_media_event(loaded(ticket)).unwrap();
        controller.handle_media_event(progress(ticket, 12_000)).unwrap();
        assert_eq!(controller.status(&a.id).map(|s| s.position_millis), Some(12_000));

        controller.handle_media_event(finished(ticket)).unwrap();
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
        assert!(controller.status(&a.id).is_none());
        assert_eq!(media.calls().last(), Some(&MediaCall::Release));
    }

    #[test]
    fn load_failure_surfaces_error_and_returns_to_idle() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let a = item("a");

        controller.tap(&a).unwrap();
        let ticket = media.last_ticket().unwrap();
        let err = controller
            .handle_media_event(MediaEvent::new(ticket, MediaEventKind::Failed("404".into())))
            .unwrap_err();

        assert!(matches!(err, PlaybackError::LoadFailed { ref reason, .. } if reason == "404"));
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
        assert_eq!(controller.current_item(), None);
    }

    #[test]
    fn synchronous_load_failure_returns_to_idle() {
        let media = FakeMedia::new();
        media.fail_loads(true);
        let mut controller = PlaybackController::new(media.boxed());
        let a = item("a");

        let err = controller.tap(&a).unwrap_err();
        assert!(matches!(err, PlaybackError::Unavailable(_)));
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
    }

    #[test]
    fn tapping_the_current_item_is_a_no_op() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let a = item("a");

        controller.tap(&a).unwrap();
        controller.tap(&a).unwrap();

        let loads = media
            .calls()
            .iter()
            .filter(|call| matches!(call, MediaCall::Load(..)))
            .count();
        assert_eq!(loads, 1);
        assert_eq!(controller.state(&a.id), PlaybackState::Loading);
    }

    #[test]
    fn scrolling_away_stops_playback() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        let (a, b) = (item("a"), item("b"));

        controller.tap(&a).unwrap();
        assert!(!controller.retain_visible(&[a.id.clone(), b.id.clone()]));
        assert_eq!(controller.state(&a.id), PlaybackState::Loading);

        assert!(controller.retain_visible(&[b.id.clone()]));
        assert_eq!(controller.state(&a.id), PlaybackState::Idle);
        assert_eq!(media.calls().last(), Some(&MediaCall::Release));
    }

    #[test]
    fn dropping_the_controller_releases_media() {
        let media = FakeMedia::new();
        let mut controller = PlaybackController::new(media.boxed());
        controller.tap(&item("a")).unwrap();

        drop(controller);
        assert_eq!(media.calls().last(), Some(&MediaCall::Release));
    }
}
