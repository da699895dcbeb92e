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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change. Drawing also records the viewport of each
//! scroll container, which the next tick uses to recompute visibility.

mod commander;
pub(crate) mod icons;
mod sign_in;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Tabs},
};

use crate::{
    App, MainView,
    render::{commander::draw_commander, icons::ICON_AVATAR, sign_in::draw_sign_in},
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state, allowing the UI
///   to update internal view state (like container viewports).
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    // Outer layout: header, main, command line
    let [header, main, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(f, header, app);

    match app.main_view {
        MainView::Home => app.home.draw(f, main, app.session.user(), &app.theme),
        MainView::Search => app.search_view.draw(f, main, &app.theme),
        MainView::Profile => app.profile_view.draw(f, main, &app.theme),
        MainView::SignIn => draw_sign_in(f, main, &app.theme),
    }

    draw_commander(f, footer, app);

    if !app.notifications.is_empty() {
        app.notifications.draw(f, area, &app.theme);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let selected = match app.main_view {
        MainView::Home => 0,
        MainView::Search => 1,
        MainView::Profile | MainView::SignIn => 2,
    };

    let tabs = Tabs::new(["1 Home", "2 Search", "3 Profile"])
        .select(selected)
        .style(Style::default().fg(theme.muted_fg))
        .highlight_style(
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        );

    let account = match app.session.user() {
        Some(user) => Line::from(vec![
            Span::styled(format!("{ICON_AVATAR} "), Style::default().fg(theme.accent_colour)),
            Span::styled(user.username.as_str(), Style::default().fg(theme.title_fg)),
        ]),
        None => Line::styled("Signed out", Style::default().fg(theme.muted_fg)),
    };
    let account_width = account.width() as u16 + 1;

    let [tabs_area, account_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(account_width)]).areas(area);

    f.render_widget(tabs, tabs_area);
    f.render_widget(account.right_aligned(), account_area);
}
