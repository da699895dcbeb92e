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

//! Backend collaborators.
//!
//! The hosted backend is reached only through the [`ContentService`] and
//! [`IdentityService`] traits. Both are blocking and are only ever called
//! from the task worker thread.

pub(crate) mod appwrite;

pub(crate) use appwrite::AppwriteClient;

use crate::{
    errors::{AuthError, FetchError},
    model::{MediaCollection, UserProfile},
};

/// Read access to media records.
pub(crate) trait ContentService {
    /// All videos, newest first.
    fn list_feed_items(&self) -> Result<MediaCollection, FetchError>;

    /// The `limit` most recent videos.
    fn list_trending_items(&self, limit: usize) -> Result<MediaCollection, FetchError>;

    /// Videos created by the given user.
    fn list_user_items(&self, user_id: &str) -> Result<MediaCollection, FetchError>;

    /// Videos whose title matches `query`.
    fn search_items(&self, query: &str) -> Result<MediaCollection, FetchError>;
}

/// Authentication and session operations.
pub(crate) trait IdentityService {
    /// The signed-in user, or `None` when there is no session.
    fn current_user(&self) -> Result<Option<UserProfile>, AuthError>;

    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserProfile, AuthError>;

    fn sign_out(&mut self) -> Result<(), AuthError>;
}

/// Everything the task worker needs from the backend.
pub(crate) trait Backend: ContentService + IdentityService + Send {}

impl<T: ContentService + IdentityService + Send> Backend for T {}
