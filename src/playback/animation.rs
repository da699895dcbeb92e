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

//! Zoom presentation for carousel items.

use std::time::Duration;

use crate::model::ItemId;

pub(crate) const ZOOM_IN_FROM: f32 = 0.9;
pub(crate) const ZOOM_IN_TO: f32 = 1.1;
pub(crate) const ZOOM_OUT_FROM: f32 = 1.0;
pub(crate) const ZOOM_OUT_TO: f32 = 0.9;

/// Scale of items that are neither active nor just deactivated.
pub(crate) const REST_SCALE: f32 = ZOOM_OUT_TO;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AnimationIntent {
    ZoomIn,
    ZoomOut,
    None,
}

/// Decides how `item` should animate given the previous and current active
/// items.
pub(crate) fn animation_intent(
    previous: Option<&ItemId>,
    current: Option<&ItemId>,
    item: &ItemId,
) -> AnimationIntent {
    if current == Some(item) {
        AnimationIntent::ZoomIn
    } else if previous == Some(item) {
        AnimationIntent::ZoomOut
    } else {
        AnimationIntent::None
    }
}

/// A zoom animation started at some instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ZoomAnimation {
    pub(crate) intent: AnimationIntent,
    pub(crate) duration: Duration,
}

impl ZoomAnimation {
    pub(crate) fn new(intent: AnimationIntent, duration: Duration) -> Self {
        Self { intent, duration }
    }

    /// Scale after `elapsed` time, clamped to the final scale once the
    /// animation has run its course.
    pub(crate) fn scale_at(&self, elapsed: Duration) -> f32 {
        let (from, to) = match self.intent {
            AnimationIntent::ZoomIn => (ZOOM_IN_FROM, ZOOM_IN_TO),
            AnimationIntent::ZoomOut => (ZOOM_OUT_FROM, ZOOM_OUT_TO),
            AnimationIntent::None => return REST_SCALE,
        };

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };

        from + (to - from) * progress
    }
}
