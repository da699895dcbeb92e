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

//! Vertical feed of tap-to-play video cards.
//!
//! The feed owns its container's [`PlaybackController`]. Cards sit at a
//! uniform stride of rows; after every move, replacement or resize the set
//! of visible cards is recomputed and playback of a card that is no longer
//! visible is stopped.

mod event;
mod render;

use tracing::debug;

use crate::{
    components::EmptyState,
    errors::PlaybackError,
    events::ContainerId,
    model::{ItemId, MediaCollection, MediaItem},
    playback::{
        ItemLayout, MediaEvent, MediaResource, PlaybackController, PlaybackState, PlaybackStatus,
        ViewToken, Viewport, visible_items,
    },
};

/// Rows of one card (header, creator, blank, thumbnail, status, rule) plus
/// the gap between cards.
pub(crate) const CARD_LAYOUT: ItemLayout = ItemLayout {
    extent: 6,
    spacing: 1,
};

pub(crate) struct VideoFeed {
    container: ContainerId,
    items: MediaCollection,
    controller: PlaybackController,
    selected: Option<usize>,
    offset: u32,
    /// Viewport height in rows, as of the last draw.
    viewport: u32,
    threshold: f32,
    empty_state: EmptyState,
    pending: bool,
}

impl VideoFeed {
    pub(crate) fn new(
        container: ContainerId,
        media: Box<dyn MediaResource>,
        empty_state: EmptyState,
        threshold: f32,
    ) -> Self {
        Self {
            container,
            items: MediaCollection::empty(),
            controller: PlaybackController::new(media),
            selected: None,
            offset: 0,
            viewport: 0,
            threshold,
            empty_state,
            pending: false,
        }
    }

    pub(crate) fn items(&self) -> &MediaCollection {
        &self.items
    }

    /// Marks a fetch as in flight; cleared by the next replacement or
    /// failure.
    pub(crate) fn set_pending(&mut self) {
        self.pending = true;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Replaces the collection wholesale.
    ///
    /// All playback state is reset and the scroll position returns to the
    /// top.
    pub(crate) fn replace_items(&mut self, items: MediaCollection) {
        debug!(container = ?self.container, count = items.len(), "replacing feed items");
        self.controller.reset();
        self.selected = if items.is_empty() { None } else { Some(0) };
        self.items = items;
        self.offset = 0;
        self.pending = false;
        self.refresh_visibility();
    }

    pub(crate) fn clear(&mut self) {
        self.replace_items(MediaCollection::empty());
    }

    /// A fetch failed; the current collection stays on screen.
    pub(crate) fn fetch_failed(&mut self) {
        self.pending = false;
    }

    pub(crate) fn selected_item(&self) -> Option<&MediaItem> {
        self.selected.and_then(|index| self.items.get(index))
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

    /// Taps the selected card.
    pub(crate) fn tap_selected(&mut self) -> Result<(), PlaybackError> {
        let Some(item) = self.selected_item().cloned() else {
            return Ok(());
        };
        self.controller.tap(&item)
    }

    pub(crate) fn handle_media_event(&mut self, event: MediaEvent) -> Result<(), PlaybackError> {
        self.controller.handle_media_event(event)
    }

    pub(crate) fn stop(&mut self) {
        if let Some(id) = self.current_item() {
            debug!(container = ?self.container, %id, "stopping playback");
        }
        self.controller.stop();
    }

    pub(crate) fn visible(&self) -> Vec<ViewToken> {
        let viewport = Viewport {
            offset: self.offset,
            length: self.viewport,
        };
        visible_items(&self.items, CARD_LAYOUT, viewport, self.threshold)
    }

    /// Stops playback of a card that has left the viewport.
    ///
    /// Nothing is known about the viewport before the first draw, so nothing
    /// is stopped until then.
    pub(crate) fn refresh_visibility(&mut self) {
        if self.viewport == 0 {
            return;
        }

        let visible: Vec<ItemId> = self.visible().into_iter().map(|token| token.key).collect();
        self.controller.retain_visible(&visible);
    }

    /// Records the viewport height seen by the renderer.
    pub(crate) fn set_viewport(&mut self, rows: u32) {
        if self.viewport != rows {
            self.viewport = rows;
            self.scroll_to_selected();
        }
    }

    fn select(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(index.min(self.items.len() - 1));
        self.scroll_to_selected();
        self.refresh_visibility();
    }

    fn goto_next(&mut self) {
        let next = self.selected.map_or(0, |i| i + 1);
        self.select(next);
    }

    fn goto_previous(&mut self) {
        let previous = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(previous);
    }

    fn goto_first(&mut self) {
        self.select(0);
    }

    fn goto_last(&mut self) {
        self.select(self.items.len().saturating_sub(1));
    }

    /// Keeps the whole selected card inside the viewport.
    fn scroll_to_selected(&mut self) {
        let Some(index) = self.selected else {
            self.offset = 0;
            return;
        };

        let start = index as u32 * CARD_LAYOUT.stride();
        let end = start + CARD_LAYOUT.extent;

        if start < self.offset {
            self.offset = start;
        } else if end > self.offset + self.viewport {
            self.offset = end.saturating_sub(self.viewport).min(start);
        }
    }
}
