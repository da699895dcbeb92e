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

//! UI rendering logic for the search screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::SearchView,
    render::{Render, icons::ICON_SEARCH},
    theme::Theme,
};

impl SearchView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let Some(query) = self.query.as_deref() else {
            let hint = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{ICON_SEARCH} Search for a video topic"),
                    Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "press / or type :search <terms>",
                    Style::default().fg(theme.muted_fg),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(hint, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled("Search Results", Style::default().fg(theme.muted_fg))),
            Line::from(Span::styled(
                query.to_string(),
                Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border_colour))
                .padding(Padding::horizontal(1)),
        );
        f.render_widget(header, chunks[0]);

        self.feed.draw(f, chunks[1], theme);
    }
}
