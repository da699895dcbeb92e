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

//! The screen shown in place of the profile while signed out.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme::Theme;

pub(super) fn draw_sign_in(f: &mut Frame, area: Rect, theme: &Theme) {
    let [panel] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(area);
    let [panel] = Layout::horizontal([Constraint::Max(50)])
        .flex(Flex::Center)
        .areas(panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_colour))
        .title(Span::styled(
            " Sign in ",
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::styled(
            "Sign in to see your videos.",
            Style::default().fg(theme.title_fg),
        ),
        Line::default(),
        Line::from(vec![
            Span::styled("Type ", Style::default().fg(theme.muted_fg)),
            Span::styled(
                ":login <email> <password>",
                Style::default().fg(theme.accent_colour),
            ),
        ]),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        panel,
    );
}
