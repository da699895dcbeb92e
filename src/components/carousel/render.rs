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

//! UI rendering logic for the trending carousel.
//!
//! Every card occupies a fixed slot; its zoom scale shrinks the drawn card
//! inside that slot, full size being the zoomed-in scale.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{
    components::{Carousel, carousel::CARD_LAYOUT},
    model::MediaItem,
    playback::{PlaybackState, animation::ZOOM_IN_TO},
    render::{
        Render,
        icons::{ICON_PLAY, ICON_THUMBNAIL},
    },
    theme::Theme,
    util::format::format_time,
};

const MIN_CARD_HEIGHT: u16 = 4;

impl Render for Carousel {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.set_viewport(u32::from(area.width));

        if self.items.is_empty() {
            let text = if self.pending { "Loading videos..." } else { "No trending videos yet" };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(theme.muted_fg))
                .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
            return;
        }

        let now = Instant::now();
        let stride = i32::try_from(CARD_LAYOUT.stride()).unwrap_or(i32::MAX);
        let offset = i32::try_from(self.offset).unwrap_or(i32::MAX);

        for (index, item) in self.items.iter().enumerate() {
            let ratio = self.scale_of(&item.id, now) / ZOOM_IN_TO;
            let width = (CARD_LAYOUT.extent as f32 * ratio).round() as i32;
            let height = ((area.height as f32 * ratio).round() as u16)
                .clamp(MIN_CARD_HEIGHT.min(area.height), area.height);

            let slot_x = index as i32 * stride - offset;
            let card_x = slot_x + (CARD_LAYOUT.extent as i32 - width) / 2;
            let left = card_x.max(0);
            let right = (card_x + width).min(i32::from(area.width));
            if right <= left {
                continue;
            }

            let card_area = Rect {
                x: area.x + left as u16,
                y: area.y + (area.height - height) / 2,
                width: (right - left) as u16,
                height,
            };
            self.draw_card(f, card_area, item, theme);
        }
    }
}

impl Carousel {
    fn draw_card(&self, f: &mut Frame, area: Rect, item: &MediaItem, theme: &Theme) {
        let is_active = self.active() == Some(&item.id);
        let border_colour = if is_active { theme.accent_colour } else { theme.border_colour };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_colour));

        let status = match self.state(&item.id) {
            PlaybackState::Loading => Line::from("Loading..."),
            PlaybackState::Playing => {
                let status = self.status(&item.id).copied().unwrap_or_default();
                Line::from(format!(
                    "{ICON_PLAY} {}/{}",
                    format_time(status.position_millis),
                    format_time(status.duration_millis.unwrap_or(0))
                ))
            }
            PlaybackState::Idle | PlaybackState::Errored => {
                Line::from(ICON_PLAY).style(Style::default().add_modifier(Modifier::BOLD))
            }
        };

        let lines = vec![
            Line::from(item.title.as_str())
                .style(Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD)),
            status.patch_style(Style::default().fg(theme.accent_colour)),
            Line::from(format!("{ICON_THUMBNAIL} {}", item.thumbnail_uri))
                .style(Style::default().fg(theme.muted_fg)),
        ];

        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(card, area);
    }
}
