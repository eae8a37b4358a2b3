//! External player binding
//!
//! The adaptive player is an opaque component owning manifest parsing, ABR,
//! DRM and decoding. The shell drives it through a handful of methods and
//! observes it through a broadcast event subscription. [`ScriptedPlayer`]
//! replays a fixed timeline through the same surface for demos and tests.

use crate::config::InitConfig;
use crate::error::{Error, Result};
use crate::events::PlayerEvent;
use crate::types::AdReservation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// Capacity of the player event fan-out channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Method surface of the external adaptive player.
///
/// Implementations own all playback machinery; callers only configure, load
/// and observe.
#[async_trait]
pub trait AdaptivePlayer: Send + Sync {
    /// Begin playback of the given manifest URL
    async fn load(&self, url: &url::Url) -> Result<()>;

    /// Stop playback, retaining the handle
    async fn stop(&self) -> Result<()>;

    /// Release the underlying handle; the player is unusable afterwards
    async fn destroy(&self) -> Result<()>;

    /// Pass predefined config params ahead of `load`
    async fn init_config(&self, config: &InitConfig) -> Result<()>;

    /// Hand an ad reservation to the player's insertion session
    async fn set_alternate_content(&self, reservation: AdReservation) -> Result<()>;

    /// Available video profile bitrates for the loaded asset
    async fn get_video_bitrates(&self) -> Result<Vec<u64>>;

    /// Subscribe to the player's named-event surface
    fn subscribe(&self) -> broadcast::Receiver<PlayerEvent>;
}

/// One step of a scripted timeline: wait, then emit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Delay before the event fires, in milliseconds
    pub delay_ms: u64,
    /// The event to emit
    pub event: PlayerEvent,
}

impl ScriptEntry {
    pub fn new(delay_ms: u64, event: PlayerEvent) -> Self {
        Self { delay_ms, event }
    }
}

/// Deterministic [`AdaptivePlayer`] that replays a scripted event timeline.
///
/// `load` starts a driver task emitting the script entries in order; `stop`
/// aborts it; `destroy` additionally poisons the handle so later calls fail
/// with [`Error::PlayerDestroyed`]. Ad reservations are recorded and answered
/// with an `AdResolved` event, standing in for the player's insertion
/// session.
pub struct ScriptedPlayer {
    events_tx: broadcast::Sender<PlayerEvent>,
    script: Vec<ScriptEntry>,
    bitrates: Vec<u64>,
    driver: Mutex<Option<JoinHandle<()>>>,
    destroyed: AtomicBool,
    config: Mutex<Option<InitConfig>>,
    reservations: Mutex<Vec<AdReservation>>,
}

impl ScriptedPlayer {
    pub fn new(script: Vec<ScriptEntry>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            events_tx,
            script,
            bitrates: vec![800_000, 1_600_000, 2_500_000, 5_000_000],
            driver: Mutex::new(None),
            destroyed: AtomicBool::new(false),
            config: Mutex::new(None),
            reservations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_bitrates(mut self, bitrates: Vec<u64>) -> Self {
        self.bitrates = bitrates;
        self
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(Error::PlayerDestroyed);
        }
        Ok(())
    }

    fn abort_driver(&self) {
        if let Some(driver) = self
            .driver
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            driver.abort();
        }
    }

    /// Config last passed through `init_config`, if any
    pub fn config(&self) -> Option<InitConfig> {
        self.config.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Ad reservations received through `set_alternate_content`
    pub fn reservations(&self) -> Vec<AdReservation> {
        self.reservations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Inject a single event, bypassing the script
    pub fn emit(&self, event: PlayerEvent) {
        let _ = self.events_tx.send(event);
    }
}

#[async_trait]
impl AdaptivePlayer for ScriptedPlayer {
    async fn load(&self, url: &url::Url) -> Result<()> {
        self.ensure_alive()?;
        info!(url = %url, entries = self.script.len(), "scripted playback starting");
        self.abort_driver();

        let script = self.script.clone();
        let events_tx = self.events_tx.clone();
        let driver = tokio::spawn(async move {
            for entry in script {
                sleep(Duration::from_millis(entry.delay_ms)).await;
                debug!(event = entry.event.name(), "script emit");
                let _ = events_tx.send(entry.event);
            }
        });
        *self.driver.lock().unwrap_or_else(|e| e.into_inner()) = Some(driver);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.ensure_alive()?;
        info!("scripted playback stopped");
        self.abort_driver();
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        self.abort_driver();
        self.destroyed.store(true, Ordering::SeqCst);
        info!("scripted player destroyed");
        Ok(())
    }

    async fn init_config(&self, config: &InitConfig) -> Result<()> {
        self.ensure_alive()?;
        debug!(initial_bitrate = config.initial_bitrate, "init config received");
        *self.config.lock().unwrap_or_else(|e| e.into_inner()) = Some(config.clone());
        Ok(())
    }

    async fn set_alternate_content(&self, reservation: AdReservation) -> Result<()> {
        self.ensure_alive()?;
        info!(
            reservation_id = %reservation.reservation_id,
            placement_id = %reservation.placement_request.id,
            "alternate content reserved"
        );
        let placement_id = reservation.placement_request.id.clone();
        self.reservations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(reservation);
        let _ = self.events_tx.send(PlayerEvent::AdResolved {
            placement_id,
            resolved: true,
        });
        Ok(())
    }

    async fn get_video_bitrates(&self) -> Result<Vec<u64>> {
        self.ensure_alive()?;
        Ok(self.bitrates.clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events_tx.subscribe()
    }
}

/// Builds a fresh player handle on each asset reset
pub type PlayerFactory = Arc<dyn Fn() -> Arc<dyn AdaptivePlayer> + Send + Sync>;
