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

//! UI rendering logic for the profile screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::ProfileView,
    render::{
        Render,
        icons::{ICON_AVATAR, ICON_LOGOUT},
    },
    theme::Theme,
    util::format::format_count,
};

impl ProfileView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(area);

        self.draw_header(f, chunks[0], theme);
        self.feed.draw(f, chunks[1], theme);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let logout = Paragraph::new(Line::from(vec![
            Span::styled(format!("{ICON_LOGOUT} "), Style::default().fg(theme.error_fg)),
            Span::styled("x Logout", Style::default().fg(theme.muted_fg)),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(logout, rows[0]);

        let Some(user) = &self.user else {
            return;
        };

        let posts = self.feed.items().len() as u64;
        let followers = user.followers.map_or_else(|| "-".to_string(), format_count);
        let number = Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD);
        let label = Style::default().fg(theme.muted_fg);

        let lines = vec![
            Line::from(Span::styled(
                format!("{ICON_AVATAR} {}", user.avatar_uri),
                Style::default().fg(theme.accent_colour),
            )),
            Line::from(Span::styled(
                user.username.as_str(),
                Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format_count(posts), number),
                Span::styled(" Posts    ", label),
                Span::styled(followers, number),
                Span::styled(" Followers", label),
            ]),
        ];

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
    }
}
