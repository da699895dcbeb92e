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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides utilities
//! for converting colors between Ratatui's internal representation and the
//! hexadecimal strings used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,

    pub(crate) title_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) selection_bg: Color,
    pub(crate) error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Dark navy background with the orange accent of the mobile client.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(22, 22, 34),
            accent_colour: Color::Rgb(255, 156, 1),
            border_colour: Color::Rgb(35, 37, 51),
            gauge_track_colour: Color::Rgb(30, 30, 45),
            commander_colour: Color::Rgb(205, 205, 224),

            title_fg: Color::Rgb(255, 255, 255),
            muted_fg: Color::Rgb(205, 205, 224),
            selection_bg: Color::Rgb(35, 37, 51),
            error_fg: Color::Rgb(255, 99, 99),
        }
    }

    /// Converts a [`Color::Rgb`] into a CSS-style hexadecimal string, for
    /// setting the terminal emulator's background via escape sequences.
    ///
    /// Returns `None` for any other colour variant.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_colours_convert_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(22, 22, 34)).as_deref(), Some("#161622"));
        assert_eq!(Theme::to_hex(Color::Reset), None);
    }
}
