//! Player event surface
//!
//! The external player delivers named events describing everything that
//! happens inside it; the shell is a pure consumer. Events are modeled as one
//! tagged enum so scripted timelines and journal dumps share a single wire
//! shape.

use crate::subtitles::VttCue;
use crate::types::{AnomalySeverity, PlayerState, ProgressUpdate, ShellId, TimedMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Events emitted by the external player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Playback state machine moved
    StateChanged { state: PlayerState },

    /// Media end reached
    Completed,

    /// Playback rate changed (trick-play entry/exit included)
    SpeedChanged { speed: f64 },

    /// ABR switched the active video profile
    BitrateChanged {
        bitrate: u64,
        #[serde(default)]
        description: String,
    },

    /// Playback failed inside the player
    Failed {
        code: i32,
        description: String,
    },

    /// Main manifest parsed
    MediaMetadata {
        duration_ms: f64,
        #[serde(default)]
        languages: Vec<String>,
        #[serde(default)]
        bitrates: Vec<u64>,
    },

    /// Subscribed playlist tag encountered
    TimedMetadata(TimedMetadata),

    /// Periodic position/seek-range report
    ProgressUpdate(ProgressUpdate),

    /// First frame rendered
    Started,

    /// Buffer health flipped; `buffered == false` means buffers ran dry
    BufferingChanged { buffered: bool },

    /// Content duration changed (live window growth, asset transition)
    DurationChanged { duration_ms: f64 },

    /// Platform decoder handle is available for the video sink
    DecoderAvailable { decoder_handle: u64 },

    /// WebVTT cue decoded from the subtitle track
    CueData(VttCue),

    /// Internal anomaly report, diagnostic only
    AnomalyReport {
        severity: AnomalySeverity,
        description: String,
    },

    /// Ad break started
    ReservationStart { reservation_id: String },

    /// Ad break ended
    ReservationEnd { reservation_id: String },

    /// Individual ad started
    PlacementStart { placement_id: String },

    /// Playback progress within an ad
    PlacementProgress {
        placement_id: String,
        position_ms: f64,
    },

    /// Error within an ad
    PlacementError { placement_id: String, code: i32 },

    /// Individual ad ended
    PlacementEnd { placement_id: String },

    /// Seek completed
    Seeked { position_ms: f64 },

    /// Ad placement request resolved by the player
    AdResolved {
        placement_id: String,
        resolved: bool,
    },
}

impl PlayerEvent {
    /// Event name as delivered on the subscription surface
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::StateChanged { .. } => "playbackStateChanged",
            PlayerEvent::Completed => "playbackCompleted",
            PlayerEvent::SpeedChanged { .. } => "playbackSpeedChanged",
            PlayerEvent::BitrateChanged { .. } => "bitrateChanged",
            PlayerEvent::Failed { .. } => "playbackFailed",
            PlayerEvent::MediaMetadata { .. } => "mediaMetadata",
            PlayerEvent::TimedMetadata(_) => "timedMetadata",
            PlayerEvent::ProgressUpdate(_) => "playbackProgressUpdate",
            PlayerEvent::Started => "playbackStarted",
            PlayerEvent::BufferingChanged { .. } => "bufferingChanged",
            PlayerEvent::DurationChanged { .. } => "durationChanged",
            PlayerEvent::DecoderAvailable { .. } => "decoderAvailable",
            PlayerEvent::CueData(_) => "vttCueDataListener",
            PlayerEvent::AnomalyReport { .. } => "anomalyReport",
            PlayerEvent::ReservationStart { .. } => "reservationStart",
            PlayerEvent::ReservationEnd { .. } => "reservationEnd",
            PlayerEvent::PlacementStart { .. } => "placementStart",
            PlayerEvent::PlacementProgress { .. } => "placementProgress",
            PlayerEvent::PlacementError { .. } => "placementError",
            PlayerEvent::PlacementEnd { .. } => "placementEnd",
            PlayerEvent::Seeked { .. } => "seeked",
            PlayerEvent::AdResolved { .. } => "adResolved",
        }
    }
}

/// A received event with journal metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique record ID
    pub id: Uuid,
    /// Shell that received the event
    pub shell_id: ShellId,
    /// Receive timestamp
    pub timestamp: DateTime<Utc>,
    /// Sequence number within the shell
    pub sequence: u64,
    /// The event
    #[serde(flatten)]
    pub event: PlayerEvent,
}

/// Bounded in-memory journal of received events.
///
/// Oldest records are dropped once capacity is reached.
pub struct EventJournal {
    shell_id: ShellId,
    sequence: AtomicU64,
    capacity: usize,
    records: Mutex<VecDeque<EventRecord>>,
}

impl EventJournal {
    pub fn new(shell_id: ShellId, capacity: usize) -> Self {
        Self {
            shell_id,
            sequence: AtomicU64::new(0),
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity.min(256))),
        }
    }

    /// Append an event, evicting the oldest record when full
    pub fn record(&self, event: PlayerEvent) -> EventRecord {
        let record = EventRecord {
            id: Uuid::new_v4(),
            shell_id: self.shell_id,
            timestamp: Utc::now(),
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            event,
        };
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());
        record
    }

    /// Snapshot of the journal contents, oldest first
    pub fn records(&self) -> Vec<EventRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
