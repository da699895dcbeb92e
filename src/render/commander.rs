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

//! Render the command-line interface.
//!
//! Shows the typed command, with any password masked, and places the
//! terminal cursor while the command line is open.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let [prompt, line] = Layout::horizontal([Constraint::Length(1), Constraint::Min(1)])
        .horizontal_margin(1)
        .areas(area);

    let style = Style::default()
        .fg(app.theme.commander_colour)
        .bg(app.theme.gauge_track_colour);

    f.render_widget(Paragraph::new("").style(style), area);

    if !commander.active() {
        return;
    }

    f.render_widget(Paragraph::new(":").style(style), prompt);
    f.render_widget(Paragraph::new(commander.display_value()).style(style), line);

    let cursor_x = line.x + commander.input.cursor() as u16;
    f.set_cursor_position((cursor_x, line.y));
}
