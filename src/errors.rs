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

//! Error taxonomy.
//!
//! None of these errors is fatal to a screen. Fetch failures degrade to an
//! empty state, playback failures become a dismissible notification and
//! authentication failures are logged or surfaced depending on the session
//! state at the time.

use thiserror::Error;

use crate::model::ItemId;

/// A collection query against the content service failed.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("content service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed content response: {0}")]
    Decode(String),
}

/// Loading or decoding a media item failed.
#[derive(Debug, Error)]
pub(crate) enum PlaybackError {
    #[error("failed to load {item}: {reason}")]
    LoadFailed { item: ItemId, reason: String },

    #[error("media resource unavailable: {0}")]
    Unavailable(String),
}

impl PlaybackError {
    /// The message shown to the user, independent of the underlying cause.
    pub(crate) fn user_message(&self) -> &'static str {
        "Unable to play video. Please check your internet connection and try again."
    }
}

/// An identity or session operation failed.
#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("not signed in")]
    Unauthorized,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("identity service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no user profile for account {0}")]
    ProfileMissing(String),

    #[error("malformed identity response: {0}")]
    Decode(String),
}

impl From<FetchError> for AuthError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(e) => AuthError::Network(e),
            FetchError::Status { status: 401, .. } => AuthError::Unauthorized,
            FetchError::Status { status, message } => AuthError::Status { status, message },
            FetchError::Decode(msg) => AuthError::Decode(msg),
        }
    }
}
