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

//! Item visibility and active-item tracking.
//!
//! Scroll containers lay their items out at a uniform stride along one axis
//! (columns for the carousel, rows for the feed). [`visible_items`] turns a
//! scroll position into the ordered set of items that are "visible", meaning
//! at least a threshold fraction of each item lies inside the viewport.
//!
//! [`VisibilityTracker`] consumes those sets as a stream of events and keeps
//! the carousel's single active item.

use tracing::debug;

use crate::model::{ItemId, MediaCollection};

/// Default fraction of an item that must be on screen for it to be visible.
pub(crate) const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.7;

/// Uniform item geometry along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ItemLayout {
    pub(crate) extent: u32,
    pub(crate) spacing: u32,
}

impl ItemLayout {
    pub(crate) fn stride(&self) -> u32 {
        self.extent + self.spacing
    }

    /// Total scrollable length of `count` items.
    pub(crate) fn content_length(&self, count: usize) -> u32 {
        match count {
            0 => 0,
            n => self.stride() * (n as u32 - 1) + self.extent,
        }
    }
}

/// The visible window along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) offset: u32,
    pub(crate) length: u32,
}

/// An item that passed the visibility threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ViewToken {
    pub(crate) key: ItemId,
    pub(crate) index: usize,
}

/// Returns the items satisfying the visibility threshold, in screen order.
pub(crate) fn visible_items(
    items: &MediaCollection,
    layout: ItemLayout,
    viewport: Viewport,
    threshold: f32,
) -> Vec<ViewToken> {
    if layout.extent == 0 || viewport.length == 0 {
        return vec![];
    }

    let stride = layout.stride();
    let view_start = viewport.offset;
    let view_end = viewport.offset.saturating_add(viewport.length);
    let required = f64::from(threshold) * f64::from(layout.extent);

    let first = (view_start / stride) as usize;

    items
        .iter()
        .enumerate()
        .skip(first)
        .take_while(|(index, _)| (*index as u32) * stride < view_end)
        .filter(|(index, _)| {
            let start = (*index as u32) * stride;
            let end = start + layout.extent;
            let overlap = end.min(view_end).saturating_sub(start.max(view_start));
            f64::from(overlap) >= required
        })
        .map(|(index, item)| ViewToken {
            key: item.id.clone(),
            index,
        })
        .collect()
}

/// A change of the active item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ActiveChange {
    pub(crate) previous: Option<ItemId>,
    pub(crate) current: ItemId,
}

/// Tracks the single in-focus item of a carousel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct VisibilityTracker {
    active: Option<ItemId>,
    previous: Option<ItemId>,
}

impl VisibilityTracker {
    /// Starts with the second item active, the most prominent position when
    /// the carousel first appears. Shorter collections fall back to their
    /// first item, or to nothing.
    pub(crate) fn new(items: &MediaCollection) -> Self {
        let active = items.get(1).or_else(|| items.get(0)).map(|item| item.id.clone());

        Self {
            active,
            previous: None,
        }
    }

    pub(crate) fn active(&self) -> Option<&ItemId> {
        self.active.as_ref()
    }

    pub(crate) fn previous(&self) -> Option<&ItemId> {
        self.previous.as_ref()
    }

    /// Applies a visibility-change event.
    ///
    /// A non-empty set makes its first item active; an empty set keeps the
    /// current active item. Returns the change, if the active item moved.
    pub(crate) fn on_viewable_items_changed(&mut self, tokens: &[ViewToken]) -> Option<ActiveChange> {
        let first = tokens.first()?;

        if self.active.as_ref() == Some(&first.key) {
            return None;
        }

        debug!(from = ?self.active, to = %first.key, "active item changed");
        self.previous = self.active.replace(first.key.clone());

        Some(ActiveChange {
            previous: self.previous.clone(),
            current: first.key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{rng, seq::SliceRandom};

    use super::*;
    use crate::model::fixtures::collection;

    const CARD: ItemLayout = ItemLayout {
        extent: 10,
        spacing: 2,
    };

    fn keys(tokens: &[ViewToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.key.as_str()).collect()
    }

    #[test]
    fn initial_active_item_is_the_second() {
        let items = collection(&["A", "B", "C", "D", "E"]);
        let tracker = VisibilityTracker::new(&items);
        assert_eq!(tracker.active().map(ItemId::as_str), Some("B"));
        assert_eq!(tracker.previous(), None);
    }

    #[test]
    fn short_collections_fall_back() {
        let one = VisibilityTracker::new(&collection(&["A"]));
        assert_eq!(one.active().map(ItemId::as_str), Some("A"));

        let none = VisibilityTracker::new(&MediaCollection::empty());
        assert_eq!(none.active(), None);
    }

    #[test]
    fn non_empty_events_select_the_first_visible_item() {
        let all = collection(&["A", "B", "C", "D", "E", "F", "G"]);
        let mut pool: Vec<ViewToken> = all
            .iter()
            .enumerate()
            .map(|(index, item)| ViewToken {
                key: item.id.clone(),
                index,
            })
            .collect();

        let mut tracker = VisibilityTracker::new(&all);
        let mut rng = rng();

        for round in 0..500 {
            pool.shuffle(&mut rng);
            let take = round % (pool.len() + 1);
            let event = &pool[..take];
            let before = tracker.active().cloned();

            let change = tracker.on_viewable_items_changed(event);

            match event.first() {
                Some(first) => {
                    assert_eq!(tracker.active(), Some(&first.key));
                    assert_eq!(change.is_some(), before.as_ref() != Some(&first.key));
                }
                None => {
                    assert_eq!(tracker.active().cloned(), before);
                    assert!(change.is_none());
                }
            }
        }
    }

    #[test]
    fn later_events_supersede_earlier_ones() {
        let all = collection(&["A", "B", "C"]);
        let mut tracker = VisibilityTracker::new(&all);
        let token = |key: &str, index| ViewToken {
            key: ItemId::from(key),
            index,
        };

        tracker.on_viewable_items_changed(&[token("C", 2)]);
        let change = tracker.on_viewable_items_changed(&[token("A", 0), token("B", 1)]);

        assert_eq!(tracker.active().map(ItemId::as_str), Some("A"));
        assert_eq!(tracker.previous().map(ItemId::as_str), Some("C"));
        assert_eq!(
            change,
            Some(ActiveChange {
                previous: Some(ItemId::from("C")),
                current: ItemId::from("A"),
            })
        );
    }

    #[test]
    fn visibility_threshold_boundary() {
        let items = collection(&["A", "B", "C", "D"]);

        // B spans 12..22, 7 of its 10 columns are inside 15..40.
        let tokens = visible_items(&items, CARD, Viewport { offset: 15, length: 25 }, 0.7);
        assert_eq!(keys(&tokens), ["B", "C"]);

        // One column further and B drops below 70%.
        let tokens = visible_items(&items, CARD, Viewport { offset: 16, length: 25 }, 0.7);
        assert_eq!(keys(&tokens), ["C"]);
        assert_eq!(tokens[0].index, 2);
    }

    #[test]
    fn visibility_handles_edges() {
        let items = collection(&["A", "B"]);

        let tokens = visible_items(&items, CARD, Viewport { offset: 0, length: 100 }, 0.7);
        assert_eq!(keys(&tokens), ["A", "B"]);

        let tokens = visible_items(&items, CARD, Viewport { offset: 200, length: 50 }, 0.7);
        assert!(tokens.is_empty());

        let tokens = visible_items(&items, CARD, Viewport { offset: 0, length: 0 }, 0.7);
        assert!(tokens.is_empty());

        let tokens = visible_items(&MediaCollection::empty(), CARD, Viewport { offset: 0, length: 50 }, 0.7);
        assert!(tokens.is_empty());
    }

    #[test]
    fn content_length_excludes_trailing_spacing() {
        assert_eq!(CARD.content_length(0), 0);
        assert_eq!(CARD.content_length(1), 10);
        assert_eq!(CARD.content_length(3), 34);
    }
}
