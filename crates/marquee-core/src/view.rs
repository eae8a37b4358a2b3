//! Playback view model
//!
//! The Rust analogue of the reference UI's control surface: seek bar,
//! duration labels, transport icon, trick-mode overlay, buffering spinner,
//! subtitle line and the bitrate list. Renderers take snapshots or subscribe
//! to changes; the shell is the only writer.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Play/pause button artwork
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportIcon {
    /// Pressing would start playback
    #[default]
    Play,
    /// Pressing would pause playback
    Pause,
}

/// Snapshot of every rendered control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Seek bar fill, `0.0..=1.0`; `None` until a finite progress arrives
    pub seek_fraction: Option<f64>,
    /// Current position label, `H:MM:SS`
    pub position_label: String,
    /// Total duration label, `H:MM:SS`
    pub duration_label: String,
    /// Transport button artwork
    pub icon: TransportIcon,
    /// Active trick-play rate shown in the overlay, `None` when hidden
    pub trick_mode: Option<f64>,
    /// Buffering spinner visibility
    pub buffering_visible: bool,
    /// Rendered subtitle line, `None` when clear
    pub subtitle_line: Option<String>,
    /// Video profile bitrates offered in the quality menu
    pub bitrate_list: Vec<u64>,
    /// Platform decoder handle forwarded by the player
    pub decoder_handle: Option<u64>,
    /// Mute toggle state
    pub muted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            seek_fraction: None,
            position_label: "0:00:00".to_string(),
            duration_label: "0:00:00".to_string(),
            icon: TransportIcon::Play,
            trick_mode: None,
            buffering_visible: false,
            subtitle_line: None,
            bitrate_list: Vec::new(),
            decoder_handle: None,
            muted: false,
        }
    }
}

/// Shared handle to the view model
#[derive(Clone)]
pub struct View {
    tx: watch::Sender<ViewState>,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ViewState::default());
        Self { tx }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> ViewState {
        self.tx.borrow().clone()
    }

    /// Observe view changes
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    /// Apply a mutation and notify observers
    pub fn update(&self, mutate: impl FnOnce(&mut ViewState)) {
        self.tx.send_modify(mutate);
    }

    /// Restore the initial control state for a new asset
    pub fn reset(&self) {
        self.tx.send_replace(ViewState::default());
    }
}
