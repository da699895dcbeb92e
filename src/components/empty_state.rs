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

//! Placeholder shown in place of an empty collection.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    MainView,
    events::AppEvent,
    render::Render,
    theme::Theme,
};

/// What `Enter` does on an empty screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EmptyAction {
    Refresh,
    BrowseVideos,
}

impl EmptyAction {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            EmptyAction::Refresh => "Refresh",
            EmptyAction::BrowseVideos => "Browse Videos",
        }
    }

    pub(crate) fn event(&self) -> AppEvent {
        match self {
            EmptyAction::Refresh => AppEvent::Refresh,
            EmptyAction::BrowseVideos => AppEvent::SetMainView(MainView::Home),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EmptyState {
    pub(crate) title: &'static str,
    pub(crate) subtitle: &'static str,
    pub(crate) action: EmptyAction,
}

impl EmptyState {
    pub(crate) fn home() -> Self {
        Self {
            title: "No Videos Found",
            subtitle: "Be the first one to upload a video",
            action: EmptyAction::Refresh,
        }
    }

    pub(crate) fn search() -> Self {
        Self {
            title: "No Videos Found",
            subtitle: "No videos found for this search query",
            action: EmptyAction::BrowseVideos,
        }
    }

    pub(crate) fn profile() -> Self {
        Self {
            title: "No Videos Found",
            subtitle: "No videos found for this profile",
            action: EmptyAction::BrowseVideos,
        }
    }
}

impl Render for EmptyState {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [centre] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);

        let lines = vec![
            Line::from(Span::styled(
                self.title,
                Style::default().fg(theme.title_fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.subtitle, Style::default().fg(theme.muted_fg))),
            Line::from(""),
            Line::from(Span::styled(
                format!("[ {} ]", self.action.label()),
                Style::default()
                    .fg(theme.background_colour)
                    .bg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("press Enter", Style::default().fg(theme.muted_fg))),
        ];

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centre);
    }
}
