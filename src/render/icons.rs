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

//! Unicode symbols for the TUI.
//!
//! These are selected for compatibility with most modern terminal emulators
//! and fonts.

pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";
pub(crate) const ICON_THUMBNAIL: &str = "\u{25A3}";
pub(crate) const ICON_AVATAR: &str = "\u{25C9}";

// Text-style variant (using Variation Selector-15 [\u{FE0E}]) so terminals
// render it as monochrome text and respect the TUI's colour styling.
pub(crate) const ICON_LOGOUT: &str = "\u{238B}\u{FE0E}";
pub(crate) const ICON_SEARCH: &str = "\u{2315}";
