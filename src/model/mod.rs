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

//! Domain models and core data structures.
//!
//! This module defines the records received from the content service (media
//! items and their creators) and the signed-in user's profile. All of these
//! are read-only once received; screens replace them wholesale rather than
//! mutating them.

pub(crate) mod session;

use std::{collections::HashSet, fmt};

use tracing::warn;

/// Stable, unique key of a media item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ItemId(String);

impl ItemId {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Creator {
    pub(crate) id: String,
    pub(crate) display_name: String,
    pub(crate) avatar_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaItem {
    pub(crate) id: ItemId,
    pub(crate) title: String,
    pub(crate) thumbnail_uri: String,
    pub(crate) video_uri: String,
    pub(crate) creator: Creator,
}

/// An ordered sequence of media items with unique keys.
///
/// Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MediaCollection {
    items: Vec<MediaItem>,
}

impl MediaCollection {
    /// Builds a collection, keeping the first occurrence of any repeated key.
    pub(crate) fn new(items: Vec<MediaItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    warn!(id = %item.id, "dropping media item with duplicate key");
                }
                fresh
            })
            .collect();

        Self { items }
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub(crate) fn find(&self, id: &ItemId) -> Option<&MediaItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }
}

/// The signed-in user as stored in the backend's users collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserProfile {
    pub(crate) id: String,
    pub(crate) account_id: String,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) avatar_uri: String,
    pub(crate) followers: Option<u64>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn item(id: &str) -> MediaItem {
        MediaItem {
            id: ItemId::from(id),
            title: format!("Video {id}"),
            thumbnail_uri: format!("https://cdn.test/{id}.jpg"),
            video_uri: format!("https://cdn.test/{id}.mp4"),
            creator: Creator {
                id: "creator-1".into(),
                display_name: "jsmastery".into(),
                avatar_uri: "https://cdn.test/avatar.png".into(),
            },
        }
    }

    pub(crate) fn collection(ids: &[&str]) -> MediaCollection {
        MediaCollection::new(ids.iter().map(|id| item(id)).collect())
    }

    pub(crate) fn user() -> UserProfile {
        UserProfile {
            id: "user-1".into(),
            account_id: "account-1".into(),
            username: "jsmastery".into(),
            email: "js@test.dev".into(),
            avatar_uri: "https://cdn.test/avatar.png".into(),
            followers: Some(1200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{collection, item};
    use super::*;

    #[test]
    fn collection_keeps_first_of_duplicate_keys() {
        let mut dup = item("b");
        dup.title = "Imposter".into();
        let coll = MediaCollection::new(vec![item("a"), item("b"), dup, item("c")]);

        let ids: Vec<&str> = coll.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(coll.find(&ItemId::from("b")).map(|i| i.title.as_str()), Some("Video b"));
    }

    #[test]
    fn collection_preserves_display_order() {
        let coll = collection(&["e", "d", "c"]);
        assert_eq!(coll.get(0).map(|i| i.id.as_str()), Some("e"));
        assert_eq!(coll.get(2).map(|i| i.id.as_str()), Some("c"));
        assert_eq!(coll.len(), 3);
        assert!(!coll.is_empty());
        assert!(MediaCollection::empty().is_empty());
    }
}
