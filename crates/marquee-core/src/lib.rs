//! Marquee Core - Control shell for an external adaptive media player
//!
//! The heavy machinery of playback - manifest parsing, ABR, DRM, decoding,
//! ad decisioning - lives inside an externally-provided player component.
//! This crate is the observation/control layer around it:
//! - a typed binding to the player's method and event surfaces
//! - a view model mirroring the reference UI's controls
//! - a WebVTT cue scheduler rendering subtitles on two chained timers
//! - init-config and playlist plumbing for asset rotation
//!
//! # Architecture
//!
//! ```text
//!  ┌────────────────────────────────────────────────┐
//!  │                 External player                │
//!  │   (manifests, ABR, DRM, decode, ad sessions)   │
//!  └──────┬─────────────────────────────────▲───────┘
//!         │ events                  methods │
//!  ┌──────▼─────────────────────────────────┴───────┐
//!  │                  PlayerShell                   │
//!  │  ┌──────────────┐  ┌───────────┐  ┌─────────┐ │
//!  │  │ CueScheduler │  │ ViewState │  │ Journal │ │
//!  │  └──────────────┘  └───────────┘  └─────────┘ │
//!  └────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod player;
pub mod shell;
pub mod subtitles;
pub mod types;
pub mod view;

pub use config::{Asset, AssetDrm, DrmConfig, InitConfig, KeySystem, Playlist};
pub use error::{Error, Result};
pub use events::{EventJournal, EventRecord, PlayerEvent};
pub use player::{AdaptivePlayer, PlayerFactory, ScriptEntry, ScriptedPlayer};
pub use shell::{DecoderSink, PlayerShell};
pub use subtitles::{CueScheduler, VttCue};
pub use types::*;
pub use view::{TransportIcon, View, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the shell library with default configuration
pub fn init() {
    tracing::info!(version = VERSION, "Marquee Core initialized");
}
