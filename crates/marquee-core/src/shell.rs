//! Player shell - binds the control surface to the external player
//!
//! Owns the player handle, the subtitle scheduler and the view model, and
//! drains the player's event subscription from a single pump task. Handlers
//! are observational: anomalies and failures are logged, never retried or
//! propagated. The one piece of real coordination is deciding when buffered
//! subtitle cues have gone stale (seeks and trick-play) and resetting the
//! scheduler accordingly.

use crate::config::{Asset, Playlist};
use crate::error::{Error, Result};
use crate::events::{EventJournal, PlayerEvent};
use crate::player::{AdaptivePlayer, PlayerFactory};
use crate::subtitles::CueScheduler;
use crate::types::{
    normal_speed_index, speed_index, AdReservation, PlacementRequest, PlayerState,
    ProgressUpdate, ShellId, TimedMetadata, format_clock, PLAYBACK_SPEEDS,
};
use crate::view::{TransportIcon, View};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::Url;

/// Timed-metadata tag that marks an ad break opportunity
const AD_BREAK_TAG: &str = "SCTE35";

/// Default identifier for the single mock ad slot per reservation
const AD_PLACEMENT_ID: &str = "ad1";

/// Journal capacity; oldest records are evicted beyond this
const JOURNAL_CAPACITY: usize = 1024;

/// Receives platform decoder handles as the player surfaces them
pub trait DecoderSink: Send + Sync {
    fn on_decoder_available(&self, decoder_handle: u64);
}

/// Control shell bound to one external player at a time.
///
/// Clones share all state; the shell is cheap to hand to tasks.
#[derive(Clone)]
pub struct PlayerShell {
    id: ShellId,
    factory: PlayerFactory,
    player: Arc<RwLock<Option<Arc<dyn AdaptivePlayer>>>>,
    playlist: Arc<RwLock<Playlist>>,
    state: Arc<RwLock<PlayerState>>,
    rate_index: Arc<RwLock<usize>>,
    subtitles: CueScheduler,
    view: View,
    journal: Arc<EventJournal>,
    ad_placement_url: Option<Url>,
    decoder_sink: Option<Arc<dyn DecoderSink>>,
    pump: Arc<Mutex<Option<JoinHandle<()>>>>,
    subtitle_mirror: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl PlayerShell {
    pub fn new(factory: PlayerFactory, playlist: Playlist) -> Self {
        let id = ShellId::new();
        Self {
            id,
            factory,
            player: Arc::new(RwLock::new(None)),
            playlist: Arc::new(RwLock::new(playlist)),
            state: Arc::new(RwLock::new(PlayerState::Idle)),
            rate_index: Arc::new(RwLock::new(normal_speed_index())),
            subtitles: CueScheduler::new(),
            view: View::new(),
            journal: Arc::new(EventJournal::new(id, JOURNAL_CAPACITY)),
            ad_placement_url: None,
            decoder_sink: None,
            pump: Arc::new(Mutex::new(None)),
            subtitle_mirror: Arc::new(Mutex::new(None)),
        }
    }

    /// Ad URL handed to the player when an ad-break tag arrives. Without one,
    /// ad-break tags are logged and ignored.
    pub fn with_ad_placement(mut self, url: Url) -> Self {
        self.ad_placement_url = Some(url);
        self
    }

    pub fn with_decoder_sink(mut self, sink: Arc<dyn DecoderSink>) -> Self {
        self.decoder_sink = Some(sink);
        self
    }

    pub fn id(&self) -> ShellId {
        self.id
    }

    pub fn view(&self) -> View {
        self.view.clone()
    }

    pub fn subtitles(&self) -> CueScheduler {
        self.subtitles.clone()
    }

    pub fn journal(&self) -> Arc<EventJournal> {
        self.journal.clone()
    }

    /// Mirrored player state
    pub async fn state(&self) -> PlayerState {
        *self.state.read().await
    }

    /// Current playback rate according to the speed ladder
    pub async fn playback_rate(&self) -> f64 {
        PLAYBACK_SPEEDS[*self.rate_index.read().await]
    }

    pub async fn current_asset(&self) -> Asset {
        self.playlist.read().await.current().clone()
    }

    pub fn set_muted(&self, muted: bool) {
        self.view.update(|v| v.muted = muted);
    }

    /// Tear down the current player handle and build a fresh one.
    ///
    /// Subtitles are fully reset, the player is stopped if active and then
    /// destroyed, the event pump is rebound to the new handle and the view
    /// returns to its initial state.
    pub async fn reset_player(&self) -> Result<()> {
        info!(shell_id = %self.id, "resetting player");
        self.subtitles.reset(true);

        if let Some(old) = self.player.write().await.take() {
            if *self.state.read().await != PlayerState::Idle {
                if let Err(e) = old.stop().await {
                    warn!(error = %e, code = e.error_code(), "stop on reset failed");
                }
            }
            if let Err(e) = old.destroy().await {
                warn!(error = %e, code = e.error_code(), "destroy on reset failed");
            }
        }
        if let Some(pump) = self.pump.lock().unwrap_or_else(|e| e.into_inner()).take() {
            pump.abort();
        }

        let player = (self.factory)();
        let events = player.subscribe();
        *self.player.write().await = Some(player);
        *self.state.write().await = PlayerState::Idle;
        *self.rate_index.write().await = normal_speed_index();
        self.view.reset();

        let shell = self.clone();
        *self.pump.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(tokio::spawn(async move { shell.pump_events(events).await }));
        self.ensure_subtitle_mirror();
        Ok(())
    }

    /// Configure and load one asset on the current handle
    pub async fn load_asset(&self, asset: &Asset) -> Result<()> {
        let player = self.current_player().await?;
        let config = asset.init_config();
        info!(asset = %asset.name, url = %asset.url, "loading asset");
        player.init_config(&config).await?;
        player.load(&asset.url).await?;
        Ok(())
    }

    /// Reset the handle and load the currently selected playlist entry
    pub async fn load_current(&self) -> Result<()> {
        let asset = self.playlist.read().await.current().clone();
        self.reset_player().await?;
        self.load_asset(&asset).await
    }

    /// Rotate to the next playlist entry and play it on a fresh handle
    pub async fn load_next_asset(&self) -> Result<()> {
        let asset = self.playlist.write().await.advance().clone();
        self.reset_player().await?;
        self.load_asset(&asset).await
    }

    async fn current_player(&self) -> Result<Arc<dyn AdaptivePlayer>> {
        self.player
            .read()
            .await
            .clone()
            .ok_or(Error::PlayerDestroyed)
    }

    fn ensure_subtitle_mirror(&self) {
        let mut mirror = self
            .subtitle_mirror
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if mirror.is_some() {
            return;
        }
        let mut lines = self.subtitles.subscribe();
        let view = self.view.clone();
        *mirror = Some(tokio::spawn(async move {
            while lines.changed().await.is_ok() {
                let line = lines.borrow_and_update().clone();
                view.update(move |v| v.subtitle_line = line);
            }
        }));
    }

    // Returns a boxed future rather than being an `async fn`: the event loop
    // is recursive (handle_event -> load_next_asset -> reset_player ->
    // pump_events), and a concrete return type here is what lets the compiler
    // resolve `Send` across the cycle of otherwise-opaque futures.
    fn pump_events(
        &self,
        mut events: broadcast::Receiver<PlayerEvent>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        self.journal.record(event.clone());
                        self.handle_event(event).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "event pump lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Dispatch one player event. Public so renderers and tests can drive the
    /// shell without a live subscription.
    pub async fn handle_event(&self, event: PlayerEvent) {
        match event {
            PlayerEvent::StateChanged { state } => self.on_state_changed(state).await,
            PlayerEvent::Completed => {
                info!("media end reached");
                let shell = self.clone();
                tokio::spawn(async move {
                    if let Err(e) = shell.load_next_asset().await {
                        warn!(error = %e, code = e.error_code(), "failed to load next asset");
                    }
                });
            }
            PlayerEvent::SpeedChanged { speed } => self.on_speed_changed(speed).await,
            PlayerEvent::BitrateChanged { bitrate, description } => {
                debug!(bitrate, %description, "bitrate changed");
            }
            PlayerEvent::Failed { code, description } => {
                error!(code, %description, "playback failed");
            }
            PlayerEvent::MediaMetadata { duration_ms, languages, bitrates } => {
                debug!(duration_ms, ?languages, ?bitrates, "media metadata parsed");
            }
            PlayerEvent::TimedMetadata(metadata) => self.on_timed_metadata(metadata).await,
            PlayerEvent::ProgressUpdate(progress) => self.on_progress(progress).await,
            PlayerEvent::Started => self.on_started().await,
            PlayerEvent::BufferingChanged { buffered } => {
                debug!(buffered, "buffering changed");
                self.view.update(|v| v.buffering_visible = !buffered);
            }
            PlayerEvent::DurationChanged { duration_ms } => {
                debug!(duration_ms, "duration changed");
            }
            PlayerEvent::DecoderAvailable { decoder_handle } => {
                info!(decoder_handle, "decoder handle available");
                if let Some(sink) = &self.decoder_sink {
                    sink.on_decoder_available(decoder_handle);
                }
                self.view.update(|v| v.decoder_handle = Some(decoder_handle));
            }
            PlayerEvent::CueData(mut cue) => {
                // single-line subtitle surface
                cue.text = cue.text.replace('\n', " ");
                self.subtitles.push(cue);
            }
            PlayerEvent::AnomalyReport { severity, description } => {
                use crate::types::AnomalySeverity;
                match severity {
                    AnomalySeverity::Error => error!(%description, "player anomaly"),
                    AnomalySeverity::Warning => warn!(%description, "player anomaly"),
                    AnomalySeverity::Trace => {}
                }
            }
            PlayerEvent::ReservationStart { reservation_id } => {
                info!(%reservation_id, "ad break started");
            }
            PlayerEvent::ReservationEnd { reservation_id } => {
                info!(%reservation_id, "ad break ended");
            }
            PlayerEvent::PlacementStart { placement_id } => {
                info!(%placement_id, "ad placement started");
            }
            PlayerEvent::PlacementProgress { placement_id, position_ms } => {
                debug!(%placement_id, position_ms, "ad placement progress");
            }
            PlayerEvent::PlacementError { placement_id, code } => {
                warn!(%placement_id, code, "ad placement error");
            }
            PlayerEvent::PlacementEnd { placement_id } => {
                info!(%placement_id, "ad placement ended");
            }
            PlayerEvent::Seeked { position_ms } => {
                debug!(position_ms, "seek completed");
            }
            PlayerEvent::AdResolved { placement_id, resolved } => {
                info!(%placement_id, resolved, "ad placement resolved");
            }
        }
    }

    async fn on_state_changed(&self, next: PlayerState) {
        let mut state = self.state.write().await;
        let prev = *state;
        // Buffered cues are stale once playback jumps: entering a seek from
        // active playback, or resuming playback out of one.
        match next {
            PlayerState::Playing if prev == PlayerState::Seeking => {
                self.subtitles.reset(true);
            }
            PlayerState::Seeking
                if matches!(prev, PlayerState::Playing | PlayerState::Paused) =>
            {
                self.subtitles.reset(true);
            }
            _ => {}
        }
        *state = next;
        info!(from = %prev, to = %next, "player state changed");
    }

    async fn on_speed_changed(&self, speed: f64) {
        let mut rate_index = self.rate_index.write().await;
        let prev = PLAYBACK_SPEEDS[*rate_index];
        info!(from = prev, to = speed, "playback speed changed");

        // Pause (speed 0) keeps the cue buffer; any other non-1x rate
        // invalidates it.
        if speed != 1.0 {
            self.subtitles.reset(speed != 0.0);
        }

        if speed == 0.0 {
            *rate_index = normal_speed_index();
        } else if let Some(index) = speed_index(speed) {
            *rate_index = index;
        } else {
            warn!(speed, "reported speed not in trick-play ladder");
        }

        self.view.update(|v| {
            v.trick_mode = (speed != 0.0 && speed != 1.0).then_some(speed);
            v.icon = if speed == 1.0 {
                TransportIcon::Pause
            } else {
                TransportIcon::Play
            };
        });
    }

    async fn on_progress(&self, progress: ProgressUpdate) {
        self.subtitles
            .on_progress(progress.position_ms, progress.playback_speed);

        let fraction = progress.position_ms / progress.end_ms;
        self.view.update(|v| {
            v.duration_label = format_clock(progress.end_ms / 1000.0);
            v.position_label = format_clock(progress.position_ms / 1000.0);
            if fraction.is_finite() {
                v.seek_fraction = Some(fraction.clamp(0.0, 1.0));
            }
        });
    }

    async fn on_started(&self) {
        self.view.update(|v| v.icon = TransportIcon::Pause);
        let Ok(player) = self.current_player().await else {
            return;
        };
        match player.get_video_bitrates().await {
            Ok(bitrates) => {
                info!(count = bitrates.len(), "video bitrates available");
                self.view.update(|v| v.bitrate_list = bitrates);
            }
            Err(e) => warn!(error = %e, code = e.error_code(), "video bitrate query failed"),
        }
    }

    async fn on_timed_metadata(&self, metadata: TimedMetadata) {
        debug!(name = %metadata.name, id = %metadata.id, "timed metadata");
        if metadata.name != AD_BREAK_TAG {
            return;
        }
        let Some(url) = self.ad_placement_url.clone() else {
            debug!("ad-break tag received but no placement configured");
            return;
        };
        // Ad server communication is out of scope: the reservation carries a
        // preconfigured placement instead of a decisioned one.
        let reservation = AdReservation {
            reservation_id: metadata.id.clone(),
            reservation_behavior: 0,
            placement_request: PlacementRequest {
                id: AD_PLACEMENT_ID.to_string(),
                pts: 0,
                url,
            },
        };
        let Ok(player) = self.current_player().await else {
            warn!("ad-break tag received without an active player");
            return;
        };
        if let Err(e) = player.set_alternate_content(reservation).await {
            warn!(error = %e, code = e.error_code(), "alternate content rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Asset, AssetDrm};
    use crate::player::{ScriptEntry, ScriptedPlayer};
    use crate::subtitles::VttCue;
    use crate::types::AnomalySeverity;
    use std::collections::HashMap;

    fn asset(name: &str) -> Asset {
        Asset::new(
            name,
            Url::parse(&format!("https://cdn.example.com/{name}/main.m3u8")).unwrap(),
        )
    }

    fn playlist() -> Playlist {
        Playlist::new(vec![asset("first"), asset("second")]).unwrap()
    }

    fn scripted_factory(script: Vec<ScriptEntry>) -> (PlayerFactory, Arc<ScriptedPlayer>) {
        let player = Arc::new(ScriptedPlayer::new(script));
        let handle = player.clone();
        let factory: PlayerFactory =
            Arc::new(move || player.clone() as Arc<dyn AdaptivePlayer>);
        (factory, handle)
    }

    fn fresh_factory() -> PlayerFactory {
        Arc::new(|| Arc::new(ScriptedPlayer::new(vec![])) as Arc<dyn AdaptivePlayer>)
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn seek_transition_drops_buffered_cues() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell.subtitles().push(VttCue::new(10_000.0, 500.0, "stale"));

        shell
            .handle_event(PlayerEvent::StateChanged { state: PlayerState::Playing })
            .await;
        assert_eq!(shell.subtitles().queued(), 1);

        shell
            .handle_event(PlayerEvent::StateChanged { state: PlayerState::Seeking })
            .await;
        assert_eq!(shell.subtitles().queued(), 0, "seek empties the cue buffer");
        assert_eq!(shell.state().await, PlayerState::Seeking);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_from_seek_drops_buffered_cues() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell
            .handle_event(PlayerEvent::StateChanged { state: PlayerState::Seeking })
            .await;
        shell.subtitles().push(VttCue::new(10_000.0, 500.0, "stale"));

        shell
            .handle_event(PlayerEvent::StateChanged { state: PlayerState::Playing })
            .await;
        assert_eq!(shell.subtitles().queued(), 0);
        assert_eq!(shell.state().await, PlayerState::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_keeps_cue_buffer_trickplay_drops_it() {
        let shell = PlayerShell::new(fresh_factory(), playlist());

        shell.subtitles().push(VttCue::new(10_000.0, 500.0, "kept"));
        shell.handle_event(PlayerEvent::SpeedChanged { speed: 0.0 }).await;
        assert_eq!(shell.subtitles().queued(), 1, "pause keeps the buffer");
        assert_eq!(shell.playback_rate().await, 1.0, "pause snaps to the 1x slot");

        shell.handle_event(PlayerEvent::SpeedChanged { speed: 16.0 }).await;
        assert_eq!(shell.subtitles().queued(), 0, "trick-play drops the buffer");
        assert_eq!(shell.playback_rate().await, 16.0);

        let view = shell.view().snapshot();
        assert_eq!(view.trick_mode, Some(16.0));
        assert_eq!(view.icon, TransportIcon::Play);
    }

    #[tokio::test(start_paused = true)]
    async fn normal_speed_restores_pause_icon() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell.handle_event(PlayerEvent::SpeedChanged { speed: 4.0 }).await;
        shell.handle_event(PlayerEvent::SpeedChanged { speed: 1.0 }).await;

        let view = shell.view().snapshot();
        assert_eq!(view.icon, TransportIcon::Pause);
        assert_eq!(view.trick_mode, None);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_updates_labels_and_seek_bar() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell
            .handle_event(PlayerEvent::ProgressUpdate(ProgressUpdate {
                start_ms: 0.0,
                end_ms: 120_000.0,
                position_ms: 30_000.0,
                playback_speed: 1.0,
            }))
            .await;

        let view = shell.view().snapshot();
        assert_eq!(view.seek_fraction, Some(0.25));
        assert_eq!(view.position_label, "0:00:30");
        assert_eq!(view.duration_label, "0:02:00");
    }

    #[tokio::test(start_paused = true)]
    async fn non_finite_progress_leaves_seek_bar_alone() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell
            .handle_event(PlayerEvent::ProgressUpdate(ProgressUpdate {
                start_ms: 0.0,
                end_ms: 0.0,
                position_ms: 0.0,
                playback_speed: 1.0,
            }))
            .await;
        assert_eq!(shell.view().snapshot().seek_fraction, None);
    }

    #[tokio::test(start_paused = true)]
    async fn started_queries_bitrates_and_flips_icon() {
        let (factory, _player) = scripted_factory(vec![]);
        let shell = PlayerShell::new(factory, playlist());
        shell.reset_player().await.unwrap();

        shell.handle_event(PlayerEvent::Started).await;

        let view = shell.view().snapshot();
        assert_eq!(view.icon, TransportIcon::Pause);
        assert_eq!(view.bitrate_list, vec![800_000, 1_600_000, 2_500_000, 5_000_000]);
    }

    #[tokio::test(start_paused = true)]
    async fn buffering_toggles_spinner() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell
            .handle_event(PlayerEvent::BufferingChanged { buffered: false })
            .await;
        assert!(shell.view().snapshot().buffering_visible);

        shell
            .handle_event(PlayerEvent::BufferingChanged { buffered: true })
            .await;
        assert!(!shell.view().snapshot().buffering_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn ad_break_tag_reserves_alternate_content() {
        let (factory, player) = scripted_factory(vec![]);
        let ad_url = Url::parse("https://ads.example.com/break/slot.mpd").unwrap();
        let shell = PlayerShell::new(factory, playlist()).with_ad_placement(ad_url.clone());
        shell.reset_player().await.unwrap();

        let metadata = TimedMetadata {
            time_ms: 62_062.0,
            duration_ms: 30_063.0,
            name: AD_BREAK_TAG.to_string(),
            content: "-X-CUE:ID=eae90713-db8e,DURATION=30.063".to_string(),
            metadata: HashMap::new(),
            id: "eae90713-db8e".to_string(),
        };
        shell.handle_event(PlayerEvent::TimedMetadata(metadata)).await;

        let reservations = player.reservations();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].reservation_id, "eae90713-db8e");
        assert_eq!(reservations[0].placement_request.id, AD_PLACEMENT_ID);
        assert_eq!(reservations[0].placement_request.url, ad_url);
    }

    #[tokio::test(start_paused = true)]
    async fn other_tags_do_not_reserve() {
        let (factory, player) = scripted_factory(vec![]);
        let shell = PlayerShell::new(factory, playlist())
            .with_ad_placement(Url::parse("https://ads.example.com/a.mpd").unwrap());
        shell.reset_player().await.unwrap();

        let metadata = TimedMetadata {
            time_ms: 0.0,
            duration_ms: 0.0,
            name: "#EXT-X-CUE".to_string(),
            content: String::new(),
            metadata: HashMap::new(),
            id: "x".to_string(),
        };
        shell.handle_event(PlayerEvent::TimedMetadata(metadata)).await;
        assert!(player.reservations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_rotates_playlist() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell.reset_player().await.unwrap();
        assert_eq!(shell.current_asset().await.name, "first");

        shell.handle_event(PlayerEvent::Completed).await;
        settle().await;
        assert_eq!(shell.current_asset().await.name, "second");

        shell.handle_event(PlayerEvent::Completed).await;
        settle().await;
        assert_eq!(shell.current_asset().await.name, "first", "playlist wraps");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_view_and_rate() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell.reset_player().await.unwrap();
        shell.set_muted(true);
        shell.handle_event(PlayerEvent::SpeedChanged { speed: 32.0 }).await;

        shell.reset_player().await.unwrap();
        assert_eq!(shell.playback_rate().await, 1.0);
        let view = shell.view().snapshot();
        assert!(!view.muted);
        assert_eq!(view.trick_mode, None);
        assert_eq!(shell.state().await, PlayerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn decoder_handle_reaches_sink_and_view() {
        struct Capture(Mutex<Vec<u64>>);
        impl DecoderSink for Capture {
            fn on_decoder_available(&self, decoder_handle: u64) {
                self.0
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(decoder_handle);
            }
        }

        let sink = Arc::new(Capture(Mutex::new(Vec::new())));
        let shell = PlayerShell::new(fresh_factory(), playlist())
            .with_decoder_sink(sink.clone());

        shell
            .handle_event(PlayerEvent::DecoderAvailable { decoder_handle: 0x4242 })
            .await;

        assert_eq!(*sink.0.lock().unwrap(), vec![0x4242]);
        assert_eq!(shell.view().snapshot().decoder_handle, Some(0x4242));
    }

    #[tokio::test(start_paused = true)]
    async fn anomalies_and_failures_do_not_disturb_state() {
        let shell = PlayerShell::new(fresh_factory(), playlist());
        shell
            .handle_event(PlayerEvent::StateChanged { state: PlayerState::Playing })
            .await;
        shell
            .handle_event(PlayerEvent::AnomalyReport {
                severity: AnomalySeverity::Error,
                description: "profile ramp-down".to_string(),
            })
            .await;
        shell
            .handle_event(PlayerEvent::Failed {
                code: 10,
                description: "fragment download failure".to_string(),
            })
            .await;
        assert_eq!(shell.state().await, PlayerState::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn drm_override_reaches_player_config() {
        let (factory, player) = scripted_factory(vec![]);
        let clear = asset("clear").with_drm(AssetDrm::Disabled);
        let shell =
            PlayerShell::new(factory, Playlist::new(vec![clear]).unwrap());
        shell.load_current().await.unwrap();

        let config = player.config().expect("init_config was called");
        assert_eq!(config.drm_config, None);
    }
}
