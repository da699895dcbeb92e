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

//! UI rendering logic for the video feed.
//!
//! Each card is a fixed block of text lines; cards cut by the top or bottom
//! edge of the viewport are drawn partially.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    components::{
        VideoFeed,
        video_feed::CARD_LAYOUT,
    },
    model::MediaItem,
    playback::PlaybackState,
    render::{
        Render,
        icons::{ICON_AVATAR, ICON_PLAY, ICON_STOP, ICON_THUMBNAIL},
    },
    theme::Theme,
    util::format::{format_time, progress_bar},
};

const PROGRESS_WIDTH: usize = 24;

impl Render for VideoFeed {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.set_viewport(u32::from(area.height));

        if self.items.is_empty() {
            if self.is_pending() {
                let loading = Paragraph::new("Loading videos...")
                    .style(Style::default().fg(theme.muted_fg))
                    .alignment(Alignment::Center);
                f.render_widget(loading, area);
            } else {
                self.empty_state.draw(f, area, theme);
            }
            return;
        }

        let stride = CARD_LAYOUT.stride();
        let view_start = self.offset;
        let view_end = self.offset + u32::from(area.height);

        for (index, item) in self.items.iter().enumerate() {
            let start = index as u32 * stride;
            let end = start + CARD_LAYOUT.extent;
            if end <= view_start {
                continue;
            }
            if start >= view_end {
                break;
            }

            let lines = self.card_lines(index, item, area.width, theme);
            let skip = view_start.saturating_sub(start) as usize;
            let top = start.max(view_start) - view_start;
            let height = end.min(view_end) - start.max(view_start);

            let card_area = Rect {
                x: area.x,
                y: area.y + top as u16,
                width: area.width,
                height: height as u16,
            };
            let lines: Vec<Line> = lines.into_iter().skip(skip).collect();
            f.render_widget(Paragraph::new(lines), card_area);
        }
    }
}

impl VideoFeed {
    fn card_lines<'a>(&self, index: usize, item: &'a MediaItem, width: u16, theme: &Theme) -> Vec<Line<'a>> {
        let selected = self.selected == Some(index);
        let marker = if selected { "\u{258C} " } else { "  " };
        let marker_style = Style::default().fg(theme.accent_colour);

        let header = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(format!("{ICON_AVATAR} "), Style::default().fg(theme.accent_colour)),
            Span::styled(
                item.title.as_str(),
                Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
            ),
        ]);

        let creator = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::raw("  "),
            Span::styled(item.creator.display_name.as_str(), Style::default().fg(theme.muted_fg)),
        ]);

        let thumbnail = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(
                format!("{ICON_THUMBNAIL} {}", item.thumbnail_uri),
                Style::default().fg(theme.muted_fg),
            ),
        ]);

        let status = Line::from(vec![
            Span::styled(marker, marker_style),
            self.status_span(item, theme),
        ]);

        let rule = Line::from(Span::styled(
            "\u{2500}".repeat(usize::from(width)),
            Style::default().fg(theme.border_colour),
        ));

        let mut lines = vec![header, creator, Line::from(marker), thumbnail, status, rule];
        if selected {
            for line in lines.iter_mut().take(5) {
                line.style = Style::default().bg(theme.selection_bg);
            }
        }
        lines
    }

    fn status_span(&self, item: &MediaItem, theme: &Theme) -> Span<'static> {
        match self.state(&item.id) {
            PlaybackState::Loading => {
                Span::styled("Loading...", Style::default().fg(theme.title_fg))
            }
            PlaybackState::Playing => {
                let status = self.status(&item.id).copied().unwrap_or_default();
                let duration = status.duration_millis.unwrap_or(0);
                let bar = progress_bar(status.progress().unwrap_or(0.0), PROGRESS_WIDTH);
                Span::styled(
                    format!(
                        "{ICON_PLAY} {} / {} {bar} {ICON_STOP}",
                        format_time(status.position_millis),
                        format_time(duration)
                    ),
                    Style::default().fg(theme.accent_colour),
                )
            }
            PlaybackState::Idle | PlaybackState::Errored => Span::styled(
                format!("{ICON_PLAY} Play"),
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
            ),
        }
    }
}
