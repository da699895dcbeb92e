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

//! Profile screen: the signed-in user's header above their own videos.
//!
//! The profile belongs to the session. Its feed is dropped whenever the
//! user changes or signs out, so a later user never sees stale videos.

mod event;
mod render;

use tracing::debug;

use crate::{components::VideoFeed, model::UserProfile};

pub(crate) struct ProfileView {
    user: Option<UserProfile>,
    pub(crate) feed: VideoFeed,
}

impl ProfileView {
    pub(crate) fn new(feed: VideoFeed) -> Self {
        Self { user: None, feed }
    }

    pub(crate) fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Switches the profile to `user`, dropping the videos of any other user.
    pub(crate) fn set_user(&mut self, user: UserProfile) {
        if self.user.as_ref().map(|u| &u.id) != Some(&user.id) {
            debug!(user = %user.id, "profile user changed");
            self.feed.clear();
        }
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
        self.feed.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{Event, KeyCode, KeyEvent};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        components::EmptyState,
        events::{AppEvent, AppEventProcessor, ContainerId},
        model::fixtures::{collection, user},
        playback::testing::FakeMedia,
        theme::Theme,
    };

    fn profile(media: &FakeMedia) -> ProfileView {
        ProfileView::new(VideoFeed::new(
            ContainerId::Profile,
            media.boxed(),
            EmptyState::profile(),
            0.7,
        ))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn header_shows_user_and_counts() {
        let media = FakeMedia::new();
        let mut profile = profile(&media);
        profile.set_user(user());
        profile.feed.replace_items(collection(&["a", "b", "c"]));

        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                profile.draw(f, area, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("jsmastery"));
        assert!(screen.contains("3 Posts"));
        assert!(screen.contains("1.2k Followers"));
        assert!(screen.contains("Logout"));
    }

    #[test]
    fn x_signs_out_and_r_refreshes() {
        let media = FakeMedia::new();
        let mut profile = profile(&media);
        let (tx, rx) = mpsc::channel();
        profile.set_user(user());

        profile.process_event(key(KeyCode::Char('x')), &tx).unwrap();
        profile.process_event(key(KeyCode::Char('r')), &tx).unwrap();

        assert!(matches!(rx.try_recv(), Ok(AppEvent::SignOut)));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Refresh)));
    }

    #[test]
    fn changing_user_drops_previous_videos() {
        let media = FakeMedia::new();
        let mut profile = profile(&media);
        profile.set_user(user());
        profile.feed.replace_items(collection(&["a"]));

        profile.set_user(user());
        assert_eq!(profile.feed.items().len(), 1);

        let mut other = user();
        other.id = "user-2".into();
        profile.set_user(other);
        assert!(profile.feed.items().is_empty());

        profile.clear();
        assert!(profile.user().is_none());
    }
}
