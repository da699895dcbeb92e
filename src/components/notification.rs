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

//! Dismissible notifications.
//!
//! Notifications stack up in arrival order; the oldest one is shown until
//! the user dismisses it with `Esc`.

use std::collections::VecDeque;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::{errors::PlaybackError, render::Render, theme::Theme};

const MAX_PENDING: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NotificationKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notification {
    pub(crate) kind: NotificationKind,
    pub(crate) title: String,
    pub(crate) message: String,
}

impl Notification {
    pub(crate) fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub(crate) fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub(crate) fn playback(err: &PlaybackError) -> Self {
        Self::error("Playback Error", err.user_message())
    }

    pub(crate) fn missing_query() -> Self {
        Self::error(
            "Missing query",
            "Please input something to search results across database",
        )
    }
}

#[derive(Default)]
pub(crate) struct Notifications {
    pending: VecDeque<Notification>,
}

impl Notifications {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a notification. Once too many are waiting the oldest one is
    /// dropped.
    pub(crate) fn push(&mut self, notification: Notification) {
        if self.pending.len() == MAX_PENDING {
            self.pending.pop_front();
        }
        self.pending.push_back(notification);
    }

    /// Dismisses the notification on screen, returning `false` if there was
    /// none.
    pub(crate) fn dismiss(&mut self) -> bool {
        self.pending.pop_front().is_some()
    }

    pub(crate) fn current(&self) -> Option<&Notification> {
        self.pending.front()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Render for Notifications {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let Some(notification) = self.current() else {
            return;
        };

        let [popup] = Layout::horizontal([Constraint::Percentage(60)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(7)])
            .flex(Flex::Center)
            .areas(popup);

        let colour = match notification.kind {
            NotificationKind::Info => theme.accent_colour,
            NotificationKind::Error => theme.error_fg,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colour))
            .title(Span::styled(
                format!(" {} ", notification.title),
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" Esc to dismiss ").alignment(Alignment::Right))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(theme.background_colour));

        let message = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(theme.title_fg))
            .wrap(Wrap { trim: true })
            .block(block);

        f.render_widget(Clear, popup);
        f.render_widget(message, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    #[test]
    fn notifications_dismiss_in_arrival_order() {
        let mut notifications = Notifications::new();
        assert!(!notifications.dismiss());

        notifications.push(Notification::missing_query());
        notifications.push(Notification::info("Signed out", "See you soon"));

        assert_eq!(notifications.current().map(|n| n.title.as_str()), Some("Missing query"));
        assert!(notifications.dismiss());
        assert_eq!(notifications.current().map(|n| n.title.as_str()), Some("Signed out"));
        assert!(notifications.dismiss());
        assert!(notifications.is_empty());
    }

    #[test]
    fn oldest_notification_is_dropped_when_full() {
        let mut notifications = Notifications::new();
        for i in 0..=MAX_PENDING {
            notifications.push(Notification::info(format!("n{i}"), ""));
        }
        assert_eq!(notifications.current().map(|n| n.title.as_str()), Some("n1"));
    }

    #[test]
    fn playback_errors_use_the_generic_message() {
        let err = PlaybackError::LoadFailed {
            item: ItemId::from("v1"),
            reason: "HTTP 403".into(),
        };
        let notification = Notification::playback(&err);
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.title, "Playback Error");
        assert!(!notification.message.contains("403"));
    }
}
