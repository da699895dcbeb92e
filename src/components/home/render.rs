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

//! UI rendering logic for the home screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::{HomeFocus, HomeView},
    model::UserProfile,
    render::Render,
    theme::Theme,
};

const CAROUSEL_HEIGHT: u16 = 9;

impl HomeView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, user: Option<&UserProfile>, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(CAROUSEL_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let username = user.map_or("Guest", |u| u.username.as_str());
        let welcome = Paragraph::new(vec![
            Line::from(Span::styled("Welcome Back", Style::default().fg(theme.muted_fg))),
            Line::from(Span::styled(
                username,
                Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border_colour))
                .padding(Padding::horizontal(1)),
        );
        f.render_widget(welcome, chunks[0]);

        f.render_widget(
            self.section_label("Trending Videos", HomeFocus::Trending, theme),
            chunks[1],
        );
        self.trending.draw(f, chunks[2], theme);

        f.render_widget(
            self.section_label("Latest Videos", HomeFocus::Feed, theme),
            chunks[3],
        );
        self.feed.draw(f, chunks[4], theme);
    }

    fn section_label(&self, label: &'static str, focus: HomeFocus, theme: &Theme) -> Paragraph<'static> {
        let style = if self.focus == focus {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_fg)
        };
        Paragraph::new(Line::from(Span::styled(format!(" {label}"), style)))
    }
}
