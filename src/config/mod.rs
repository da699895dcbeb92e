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

//! Application configuration.
//!
//! This module manages the application configuration file. Every section
//! falls back to its defaults, so a partial file is fine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::playback::visibility::DEFAULT_VISIBILITY_THRESHOLD;

pub(crate) const CONFIG_NAME: &str = "vidfeed";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) backend: BackendConfig,
    pub(crate) playback: PlaybackConfig,
    pub(crate) log_filter: String,
}

/// Location of the hosted backend and its collections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct BackendConfig {
    pub(crate) endpoint: String,
    pub(crate) project_id: String,
    pub(crate) database_id: String,
    pub(crate) video_collection_id: String,
    pub(crate) user_collection_id: String,
    pub(crate) request_timeout_secs: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct PlaybackConfig {
    /// Fraction of a carousel card that must be on screen for it to count as
    /// visible.
    pub(crate) visibility_threshold: f32,
    pub(crate) zoom_duration_ms: u64,
    /// Number of latest videos shown in the trending carousel.
    pub(crate) trending_limit: usize,
    /// MPV `vo` driver; MPV picks one when unset.
    pub(crate) video_output: Option<String>,
    pub(crate) on_screen_controls: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            backend: BackendConfig::default(),
            playback: PlaybackConfig::default(),
            log_filter: "vidfeed=info".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            database_id: String::new(),
            video_collection_id: String::new(),
            user_collection_id: String::new(),
            request_timeout_secs: 15,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            zoom_duration_ms: 500,
            trending_limit: 7,
            video_output: None,
            on_screen_controls: true,
        }
    }
}

impl AppConfig {
    /// Brings out-of-range values back to something usable.
    fn sanitised(mut self) -> Self {
        let threshold = self.playback.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            warn!(threshold, "visibility threshold out of range, clamping");
            self.playback.visibility_threshold = if threshold.is_nan() {
                DEFAULT_VISIBILITY_THRESHOLD
            } else {
                threshold.clamp(f32::EPSILON, 1.0)
            };
        }

        if self.playback.trending_limit == 0 {
            self.playback.trending_limit = PlaybackConfig::default().trending_limit;
        }

        self
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load::<AppConfig>(CONFIG_NAME, None)
        .unwrap_or_default()
        .sanitised()
}

/// Directory holding the configuration file, also used for the log file.
pub(crate) fn config_dir() -> Option<PathBuf> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
}
