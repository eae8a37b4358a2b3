//! Core types for Marquee

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;
use uuid::Uuid;

/// Unique identifier for a shell instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShellId(pub Uuid);

impl ShellId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShellId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trick-play speed ladder supported by the player, in playback-rate units.
/// `1.0` is normal playback; negative entries are rewind speeds.
pub const PLAYBACK_SPEEDS: [f64; 9] = [-64.0, -32.0, -16.0, -4.0, 1.0, 4.0, 16.0, 32.0, 64.0];

/// Index of normal (1x) speed in [`PLAYBACK_SPEEDS`]
pub fn normal_speed_index() -> usize {
    PLAYBACK_SPEEDS
        .iter()
        .position(|&s| s == 1.0)
        .unwrap_or(PLAYBACK_SPEEDS.len() / 2)
}

/// Position of a reported playback rate in the speed ladder
pub fn speed_index(speed: f64) -> Option<usize> {
    PLAYBACK_SPEEDS.iter().position(|&s| s == speed)
}

/// Playback states reported by the external player.
///
/// This is a mirror of the player's own state machine, tracked so the shell
/// can decide when buffered subtitle cues have gone stale. Transitions are
/// owned by the player; the shell only records what it is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// No content loaded
    Idle,
    /// Tuning/preparing a new asset
    Initializing,
    /// Content is playing
    Playing,
    /// Playback paused
    Paused,
    /// Seeking to a new position
    Seeking,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Initializing => write!(f, "initializing"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Seeking => write!(f, "seeking"),
        }
    }
}

/// Severity attached to player anomaly reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Error,
    Warning,
    Trace,
}

/// Timed metadata surfaced from the stream (e.g. `#EXT-X-CUE` tags)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedMetadata {
    /// Presentation time of the tag in milliseconds
    pub time_ms: f64,
    /// Duration covered by the tag in milliseconds
    pub duration_ms: f64,
    /// Tag name, e.g. `SCTE35`
    pub name: String,
    /// Raw tag content
    pub content: String,
    /// Parsed key/value attributes
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Tag identifier (doubles as the reservation id for ad tags)
    pub id: String,
}

/// Ad break reservation handed to the player via `set_alternate_content`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdReservation {
    pub reservation_id: String,
    pub reservation_behavior: i32,
    pub placement_request: PlacementRequest,
}

/// A single ad slot within a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub id: String,
    pub pts: u64,
    pub url: Url,
}

/// Periodic playback progress report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Start of the seekable range in milliseconds
    pub start_ms: f64,
    /// End of the seekable range in milliseconds (duration for VOD)
    pub end_ms: f64,
    /// Current playback position in milliseconds
    pub position_ms: f64,
    /// Current playback rate
    pub playback_speed: f64,
}

/// Format a position in seconds as a `H:MM:SS` clock label
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_ladder() {
        assert_eq!(PLAYBACK_SPEEDS[normal_speed_index()], 1.0);
        assert_eq!(speed_index(4.0), Some(5));
        assert_eq!(speed_index(-64.0), Some(0));
        assert_eq!(speed_index(2.0), None);
    }

    #[test]
    fn test_player_state_display() {
        assert_eq!(PlayerState::Idle.to_string(), "idle");
        assert_eq!(PlayerState::Seeking.to_string(), "seeking");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00:00");
        assert_eq!(format_clock(62.5), "0:01:02");
        assert_eq!(format_clock(3723.0), "1:02:03");
        assert_eq!(format_clock(-5.0), "0:00:00");
    }
}
