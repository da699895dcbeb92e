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

//! Horizontally scrolling trending carousel.
//!
//! The carousel keeps a single *active* item, the first card that is at
//! least threshold-visible. The active item zooms in and the previously
//! active one zooms out. Being active does not start playback; `Enter` taps
//! the active card.

mod event;
mod render;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::{
    errors::PlaybackError,
    model::{ItemId, MediaCollection},
    playback::{
        ItemLayout, MediaEvent, MediaResource, PlaybackController, PlaybackState, PlaybackStatus,
        Viewport, VisibilityTracker, ZoomAnimation, animation_intent, visible_items,
    },
};

/// Columns of one card plus the gap between cards.
pub(crate) const CARD_LAYOUT: ItemLayout = ItemLayout {
    extent: 22,
    spacing: 3,
};

pub(crate) struct Carousel {
    items: MediaCollection,
    controller: PlaybackController,
    tracker: VisibilityTracker,
    offset: u32,
    /// Viewport width in columns, as of the last draw.
    viewport: u32,
    threshold: f32,
    zoom_duration: Duration,
    changed_at: Option<Instant>,
    pending: bool,
}

impl Carousel {
    pub(crate) fn new(media: Box<dyn MediaResource>, threshold: f32, zoom_duration: Duration) -> Self {
        Self {
            items: MediaCollection::empty(),
            controller: PlaybackController::new(media),
            tracker: VisibilityTracker::default(),
            offset: 0,
            viewport: 0,
            threshold,
            zoom_duration,
            changed_at: None,
            pending: false,
        }
    }

    pub(crate) fn set_pending(&mut self) {
        self.pending = true;
    }

    pub(crate) fn fetch_failed(&mut self) {
        self.pending = false;
    }

    /// Replaces the collection wholesale.
    ///
    /// Playback is reset and the active item returns to its default, the
    /// second card, which starts out scrolled to the left edge.
    pub(crate) fn replace_items(&mut self, items: MediaCollection) {
        debug!(count = items.len(), "replacing trending items");
        self.controller.reset();
        self.tracker = VisibilityTracker::new(&items);
        self.offset = if items.len() >= 2 { CARD_LAYOUT.stride() } else { 0 };
        self.items = items;
        self.changed_at = None;
        self.pending = false;
        self.clamp_offset();
        self.refresh_visibility();
    }

    pub(crate) fn active(&self) -> Option<&ItemId> {
        self.tracker.active()
    }

    pub(crate) fn state(&self, id: &ItemId) -> PlaybackState {
        self.controller.state(id)
    }

    pub(crate) fn status(&self, id: &ItemId) -> Option<&PlaybackStatus> {
        self.controller.status(id)
    }

    pub(crate) fn current_item(&self) -> Option<&ItemId> {
        self.controller.current_item()
    }

    /// Taps the active card.
    pub(crate) fn tap_active(&mut self) -> Result<(), PlaybackError> {
        let Some(item) = self.tracker.active().and_then(|id| self.items.find(id)) else {
            return Ok(());
        };
        self.controller.tap(item)
    }

    pub(crate) fn handle_media_event(&mut self, event: MediaEvent) -> Result<(), PlaybackError> {
        self.controller.handle_media_event(event)
    }

    pub(crate) fn stop(&mut self) {
        if let Some(id) = self.current_item() {
            debug!(%id, "stopping trending playback");
        }
        self.controller.stop();
    }

    /// Records the viewport width seen by the renderer.
    pub(crate) fn set_viewport(&mut self, columns: u32) {
        self.viewport = columns;
    }

    /// Feeds the current visibility into the active-item tracker, and stops
    /// playback of a card that has scrolled away.
    pub(crate) fn refresh_visibility(&mut self) {
        if self.viewport == 0 {
            return;
        }

        self.clamp_offset();
        let viewport = Viewport {
            offset: self.offset,
            length: self.viewport,
        };
        let tokens = visible_items(&self.items, CARD_LAYOUT, viewport, self.threshold);

        let visible: Vec<ItemId> = tokens.iter().map(|token| token.key.clone()).collect();
        self.controller.retain_visible(&visible);

        if self.tracker.on_viewable_items_changed(&tokens).is_some() {
            self.changed_at = Some(Instant::now());
        }
    }

    /// Current zoom scale of the card for `id`.
    pub(crate) fn scale_of(&self, id: &ItemId, now: Instant) -> f32 {
        let intent = animation_intent(self.tracker.previous(), self.tracker.active(), id);
        let elapsed = self
            .changed_at
            .map_or(self.zoom_duration, |at| now.saturating_duration_since(at));
        ZoomAnimation::new(intent, self.zoom_duration).scale_at(elapsed)
    }

    fn scroll_by(&mut self, delta: i64) {
        let offset = i64::from(self.offset) + delta;
        self.offset = offset.max(0) as u32;
        self.refresh_visibility();
    }

    fn scroll_left(&mut self) {
        self.scroll_by(-i64::from(CARD_LAYOUT.stride() / 2));
    }

    fn scroll_right(&mut self) {
        self.scroll_by(i64::from(CARD_LAYOUT.stride() / 2));
    }

    fn clamp_offset(&mut self) {
        if self.viewport == 0 {
            return;
        }
        let max = CARD_LAYOUT
            .content_length(self.items.len())
            .saturating_sub(self.viewport);
        self.offset = self.offset.min(max);
    }
}
