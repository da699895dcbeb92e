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

//! Visibility-driven media playback.
//!
//! This module decides, for one scrollable collection of media items, which
//! item is in focus and which item (if any) is loading or playing.
//!
//! # Organization
//!
//! * [`controller`]: the per-container playback state machine.
//! * [`visibility`]: visibility computation and active-item tracking for the
//!   trending carousel.
//! * [`animation`]: the zoom presentation derived from active-item changes.
//!
//! The media backend is injected through [`MediaResource`]; completions
//! arrive later as [`MediaEvent`]s on the application event channel.

pub(crate) mod animation;
pub(crate) mod controller;
pub(crate) mod visibility;

pub(crate) use animation::{ZoomAnimation, animation_intent};
pub(crate) use controller::PlaybackController;
pub(crate) use visibility::{ItemLayout, ViewToken, Viewport, VisibilityTracker, visible_items};

use anyhow::Result;

/// Per-item playback state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Errored,
}

/// Token identifying one load request.
///
/// Media events carry the ticket of the load they belong to, so a completion
/// for a load that has since been abandoned can be recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct LoadTicket(pub(crate) u64);

/// Status snapshot reported by the media backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PlaybackStatus {
    pub(crate) is_loaded: bool,
    pub(crate) is_playing: bool,
    pub(crate) did_just_finish: bool,
    pub(crate) position_millis: u64,
    pub(crate) duration_millis: Option<u64>,
}

impl PlaybackStatus {
    /// Playback progress in the range `0.0..=1.0`, when the duration is known.
    pub(crate) fn progress(&self) -> Option<f64> {
        match self.duration_millis {
            Some(duration) if duration > 0 => {
                Some((self.position_millis as f64 / duration as f64).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MediaEventKind {
    /// The media is loaded and the first frame can be shown.
    Loaded,
    Status(PlaybackStatus),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MediaEvent {
    pub(crate) ticket: LoadTicket,
    pub(crate) kind: MediaEventKind,
}

impl MediaEvent {
    pub(crate) fn new(ticket: LoadTicket, kind: MediaEventKind) -> Self {
        Self { ticket, kind }
    }
}

/// Imperative control over a media backend.
///
/// Calls return as soon as the request has been handed off; outcomes are
/// reported asynchronously as [`MediaEvent`]s tagged with the ticket passed
/// to [`MediaResource::load`].
pub(crate) trait MediaResource {
    /// Starts fetching and decoding `uri`, paused.
    fn load(&mut self, ticket: LoadTicket, uri: &str) -> Result<()>;

    /// Starts playback of the loaded media.
    fn play(&mut self) -> Result<()>;

    /// Stops playback and drops any in-flight load.
    fn release(&mut self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! A recording [`MediaResource`] double.

    use std::{cell::RefCell, rc::Rc};

    use anyhow::{Result, bail};

    use super::{LoadTicket, MediaResource};

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum MediaCall {
        Load(LoadTicket, String),
        Play,
        Release,
    }

    #[derive(Clone, Default)]
    pub(crate) struct FakeMedia {
        calls: Rc<RefCell<Vec<MediaCall>>>,
        fail_loads: Rc<RefCell<bool>>,
    }

    impl FakeMedia {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn boxed(&self) -> Box<dyn MediaResource> {
            Box::new(self.clone())
        }

        pub(crate) fn calls(&self) -> Vec<MediaCall> {
            self.calls.borrow().clone()
        }

        pub(crate) fn fail_loads(&self, fail: bool) {
            *self.fail_loads.borrow_mut() = fail;
        }

        pub(crate) fn last_ticket(&self) -> Option<LoadTicket> {
            self.calls.borrow().iter().rev().find_map(|call| match call {
                MediaCall::Load(ticket, _) => Some(*ticket),
                _ => None,
            })
        }
    }

    impl MediaResource for FakeMedia {
        fn load(&mut self, ticket: LoadTicket, uri: &str) -> Result<()> {
            if *self.fail_loads.borrow() {
                bail!("player worker has gone away");
            }
            self.calls.borrow_mut().push(MediaCall::Load(ticket, uri.to_string()));
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            self.calls.borrow_mut().push(MediaCall::Play);
            Ok(())
        }

        fn release(&mut self) -> Result<()> {
            self.calls.borrow_mut().push(MediaCall::Release);
            Ok(())
        }
    }
}
