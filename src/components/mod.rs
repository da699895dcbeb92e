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

//! Screen components.
//!
//! * [`VideoFeed`] and [`Carousel`] are the two scroll containers; each owns
//!   one playback controller.
//! * [`HomeView`], [`SearchView`] and [`ProfileView`] compose them into
//!   screens.
//! * [`EmptyState`] and [`Notifications`] are shared presentation pieces.

mod carousel;
mod empty_state;
mod home;
mod notification;
mod profile;
mod search;
mod video_feed;

pub(crate) use carousel::Carousel;
pub(crate) use empty_state::EmptyState;
pub(crate) use home::{HomeFocus, HomeView};
pub(crate) use notification::{Notification, Notifications};
pub(crate) use profile::ProfileView;
pub(crate) use search::SearchView;
pub(crate) use video_feed::VideoFeed;
