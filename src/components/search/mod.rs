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

//! Search results screen.
//!
//! Only the results of the latest query are accepted; results of a query
//! that has since been replaced are dropped.

mod event;
mod render;

use tracing::debug;

use crate::{components::VideoFeed, model::MediaCollection};

pub(crate) struct SearchView {
    query: Option<String>,
    pub(crate) feed: VideoFeed,
}

impl SearchView {
    pub(crate) fn new(feed: VideoFeed) -> Self {
        Self { query: None, feed }
    }

    pub(crate) fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Starts a new query; the previous results stay on screen until the new
    /// ones arrive.
    pub(crate) fn begin(&mut self, query: String) {
        self.query = Some(query);
        self.feed.set_pending();
    }

    /// Accepts the results for `query`, returning `false` if they are stale.
    pub(crate) fn accept_results(&mut self, query: &str, results: MediaCollection) -> bool {
        if self.query.as_deref() != Some(query) {
            debug!(query, "dropping results of superseded search");
            return false;
        }
        self.feed.replace_items(results);
        true
    }
}
