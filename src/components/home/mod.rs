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

//! Home screen: the trending carousel above the latest videos.

mod event;
mod render;

use crate::components::{Carousel, VideoFeed};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HomeFocus {
    Trending,
    Feed,
}

pub(crate) struct HomeView {
    pub(crate) trending: Carousel,
    pub(crate) feed: VideoFeed,
    focus: HomeFocus,
}

impl HomeView {
    pub(crate) fn new(trending: Carousel, feed: VideoFeed) -> Self {
        Self {
            trending,
            feed,
            focus: HomeFocus::Feed,
        }
    }

    #[cfg(test)]
    pub(crate) fn focus(&self) -> HomeFocus {
        self.focus
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            HomeFocus::Trending => HomeFocus::Feed,
            HomeFocus::Feed => HomeFocus::Trending,
        };
    }

    pub(crate) fn refresh_visibility(&mut self) {
        self.trending.refresh_visibility();
        self.feed.refresh_visibility();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use crossterm::event::{Event, KeyCode, KeyEvent};

    use super::*;
    use crate::{
        components::EmptyState,
        events::{AppEvent, AppEventProcessor, ContainerId},
        model::{ItemId, fixtures::collection},
        playback::{PlaybackState, testing::FakeMedia},
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn home(trending: &FakeMedia, feed: &FakeMedia) -> HomeView {
        HomeView::new(
            Carousel::new(trending.boxed(), 0.7, Duration::from_millis(500)),
            VideoFeed::new(ContainerId::Feed, feed.boxed(), EmptyState::home(), 0.7),
        )
    }

    #[test]
    fn tab_switches_which_container_gets_keys() {
        let (trending_media, feed_media) = (FakeMedia::new(), FakeMedia::new());
        let mut home = home(&trending_media, &feed_media);
        let (tx, _rx) = mpsc::channel();
        home.trending.replace_items(collection(&["t1", "t2"]));
        home.feed.replace_items(collection(&["f1", "f2"]));

        assert_eq!(home.focus(), HomeFocus::Feed);
        home.process_event(key(KeyCode::Enter), &tx).unwrap();
        assert_eq!(home.feed.state(&ItemId::from("f1")), PlaybackState::Loading);

        home.process_event(key(KeyCode::Tab), &tx).unwrap();
        assert_eq!(home.focus(), HomeFocus::Trending);
        home.process_event(key(KeyCode::Enter), &tx).unwrap();
        assert_eq!(home.trending.state(&ItemId::from("t2")), PlaybackState::Loading);

        // Containers play independently of each other.
        assert_eq!(home.feed.state(&ItemId::from("f1")), PlaybackState::Loading);
    }

    #[test]
    fn r_requests_a_refresh() {
        let (trending_media, feed_media) = (FakeMedia::new(), FakeMedia::new());
        let mut home = home(&trending_media, &feed_media);
        let (tx, rx) = mpsc::channel();

        home.process_event(key(KeyCode::Char('r')), &tx).unwrap();
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Refresh)));
    }
}
