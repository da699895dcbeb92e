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

/// Formats a duration in milliseconds into a human-readable `MM:SS` string.
///
/// This is used for the position and duration of a playing video.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(65_000), "01:05");
/// assert_eq!(format_time(3_600_000), "60:00");
/// ```
pub(crate) fn format_time(millis: u64) -> String {
    let total_seconds = millis / 1000;
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Formats a count compactly, e.g. `1200` becomes `1.2k`.
pub(crate) fn format_count(count: u64) -> String {
    match count {
        0..1_000 => count.to_string(),
        1_000..1_000_000 => compact(count as f64 / 1_000.0, "k"),
        _ => compact(count as f64 / 1_000_000.0, "M"),
    }
}

fn compact(value: f64, suffix: &str) -> String {
    let rounded = (value * 10.0).floor() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}{suffix}")
    } else {
        format!("{rounded:.1}{suffix}")
    }
}

/// A text progress bar `width` cells wide.
pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "\u{2501}".repeat(filled), "\u{2500}".repeat(width - filled))
}
