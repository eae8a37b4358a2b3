//! Built-in demo timeline and playlist
//!
//! A scripted stand-in for a real player session: startup, steady playback
//! with cues and progress, an ad-break tag, a trick-play excursion with a
//! seek, and a pause at the end. Delays are real milliseconds when run live.

use marquee_core::{
    AnomalySeverity, Asset, AssetDrm, DrmConfig, KeySystem, PlayerEvent, PlayerState, Playlist,
    ProgressUpdate, ScriptEntry, TimedMetadata, VttCue,
};
use std::collections::HashMap;
use url::Url;

/// Duration of the demo asset in milliseconds
const ASSET_DURATION_MS: f64 = 120_000.0;

fn progress(position_ms: f64, playback_speed: f64) -> PlayerEvent {
    PlayerEvent::ProgressUpdate(ProgressUpdate {
        start_ms: 0.0,
        end_ms: ASSET_DURATION_MS,
        position_ms,
        playback_speed,
    })
}

/// Sample assets covering the three DRM profiles
pub fn playlist() -> anyhow::Result<Playlist> {
    let assets = vec![
        Asset::new(
            "Big Buck Bunny (clear)",
            Url::parse("https://cdn.example.com/bbb/main.m3u8")?,
        )
        .with_drm(AssetDrm::Disabled),
        Asset::new(
            "Tears of Steel (shared license)",
            Url::parse("https://cdn.example.com/tos/main.mpd")?,
        ),
        Asset::new(
            "Sintel (studio license)",
            Url::parse("https://cdn.example.com/sintel/main.mpd")?,
        )
        .with_drm(AssetDrm::Custom(DrmConfig::shared(
            "https://license.example.net/acquire",
            KeySystem::PlayReady,
        ))),
    ];
    Ok(Playlist::new(assets)?)
}

/// Ad URL the shell hands to the player on SCTE35 tags
pub fn ad_placement_url() -> anyhow::Result<Url> {
    Ok(Url::parse("https://ads.example.com/breaks/slot-30s.mpd")?)
}

/// The built-in event timeline
pub fn timeline() -> Vec<ScriptEntry> {
    let scte35 = TimedMetadata {
        time_ms: 4_000.0,
        duration_ms: 30_063.0,
        name: "SCTE35".to_string(),
        content: "-X-CUE:ID=eae90713-db8e,DURATION=30.063".to_string(),
        metadata: HashMap::from([
            ("ID".to_string(), "eae90713-db8e".to_string()),
            ("DURATION".to_string(), "30.063".to_string()),
        ]),
        id: "eae90713-db8e".to_string(),
    };

    vec![
        // startup
        ScriptEntry::new(0, PlayerEvent::StateChanged { state: PlayerState::Initializing }),
        ScriptEntry::new(150, PlayerEvent::MediaMetadata {
            duration_ms: ASSET_DURATION_MS,
            languages: vec!["en".to_string(), "de".to_string()],
            bitrates: vec![800_000, 1_600_000, 2_500_000, 5_000_000],
        }),
        ScriptEntry::new(50, PlayerEvent::DurationChanged { duration_ms: ASSET_DURATION_MS }),
        ScriptEntry::new(100, PlayerEvent::DecoderAvailable { decoder_handle: 0x4242 }),
        ScriptEntry::new(100, PlayerEvent::Started),
        ScriptEntry::new(0, PlayerEvent::StateChanged { state: PlayerState::Playing }),

        // steady playback with subtitles
        ScriptEntry::new(100, PlayerEvent::CueData(VttCue::new(
            1_200.0, 900.0, "Hello from the cue decoder",
        ))),
        ScriptEntry::new(0, PlayerEvent::CueData(VttCue::new(
            2_600.0, 700.0, "Cues arrive ahead\nof their window",
        ))),
        ScriptEntry::new(300, progress(800.0, 1.0)),
        ScriptEntry::new(500, progress(1_300.0, 1.0)),
        ScriptEntry::new(500, progress(1_800.0, 1.0)),
        ScriptEntry::new(200, PlayerEvent::BitrateChanged {
            bitrate: 2_500_000,
            description: "ramp up".to_string(),
        }),
        ScriptEntry::new(300, progress(2_300.0, 1.0)),

        // ad break opportunity
        ScriptEntry::new(200, PlayerEvent::TimedMetadata(scte35)),
        ScriptEntry::new(300, progress(2_800.0, 1.0)),

        // trick-play excursion: ffwd, seek lands, back to 1x
        ScriptEntry::new(200, PlayerEvent::SpeedChanged { speed: 16.0 }),
        ScriptEntry::new(0, PlayerEvent::AnomalyReport {
            severity: AnomalySeverity::Warning,
            description: "iframe track switch".to_string(),
        }),
        ScriptEntry::new(300, progress(30_000.0, 16.0)),
        ScriptEntry::new(200, PlayerEvent::StateChanged { state: PlayerState::Seeking }),
        ScriptEntry::new(300, PlayerEvent::Seeked { position_ms: 60_000.0 }),
        ScriptEntry::new(0, PlayerEvent::StateChanged { state: PlayerState::Playing }),
        ScriptEntry::new(0, PlayerEvent::SpeedChanged { speed: 1.0 }),
        ScriptEntry::new(100, PlayerEvent::CueData(VttCue::new(
            61_000.0, 800.0, "Back at normal speed",
        ))),
        ScriptEntry::new(200, progress(60_400.0, 1.0)),
        ScriptEntry::new(500, progress(60_900.0, 1.0)),

        // buffers run dry briefly
        ScriptEntry::new(200, PlayerEvent::BufferingChanged { buffered: false }),
        ScriptEntry::new(600, PlayerEvent::BufferingChanged { buffered: true }),
        ScriptEntry::new(200, progress(62_300.0, 1.0)),

        // pause at the end of the demo
        ScriptEntry::new(300, PlayerEvent::SpeedChanged { speed: 0.0 }),
        ScriptEntry::new(0, PlayerEvent::StateChanged { state: PlayerState::Paused }),
    ]
}

/// Total script run time in milliseconds
pub fn duration_ms(script: &[ScriptEntry]) -> u64 {
    script.iter().map(|e| e.delay_ms).sum()
}
