//! Player initialization config and asset playlist
//!
//! Mirrors the tunables the external player accepts through `init_config`:
//! startup bitrate, start offset, network timeouts, language preferences and
//! the DRM license endpoints. All fields are optional to the player; the
//! defaults here match the player's own.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// DRM key systems understood by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySystem {
    PlayReady,
    Widevine,
}

impl KeySystem {
    /// Registry identifier used on the player's config surface
    pub fn registry_id(&self) -> &'static str {
        match self {
            KeySystem::PlayReady => "com.microsoft.playready",
            KeySystem::Widevine => "com.widevine.alpha",
        }
    }
}

/// DRM license routing for a playback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrmConfig {
    /// PlayReady license server
    pub playready_license_server: Option<String>,
    /// Widevine license server
    pub widevine_license_server: Option<String>,
    /// Key system to prefer when the asset offers several
    pub preferred_key_system: KeySystem,
}

impl DrmConfig {
    /// License routing through a single metadata service for both systems
    pub fn shared(server: impl Into<String>, preferred: KeySystem) -> Self {
        let server = server.into();
        Self {
            playready_license_server: Some(server.clone()),
            widevine_license_server: Some(server),
            preferred_key_system: preferred,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.playready_license_server.is_some() || self.widevine_license_server.is_some()
    }
}

impl Default for DrmConfig {
    fn default() -> Self {
        DrmConfig::shared("mds.ccp.xcal.tv", KeySystem::Widevine)
    }
}

/// Predefined config params passed to the player before `load`.
///
/// All properties are optional on the player side; unset options leave the
/// player's built-in defaults in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitConfig {
    /// Max initial bitrate (bps)
    pub initial_bitrate: u64,
    /// Start position for playback (seconds)
    pub offset: f64,
    /// Network request timeout (seconds)
    pub network_timeout: f64,
    /// Offset from the live point for live assets (seconds)
    pub live_offset: f64,
    /// Preferred audio language
    pub preferred_audio_language: String,
    /// Preferred subtitle language
    pub preferred_subtitle_language: String,
    /// DRM license routing, `None` for clear content
    pub drm_config: Option<DrmConfig>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            initial_bitrate: 2_500_000,
            offset: 15.0,
            network_timeout: 10.0,
            live_offset: 15.0,
            preferred_audio_language: "en".to_string(),
            preferred_subtitle_language: "en".to_string(),
            drm_config: Some(DrmConfig::default()),
        }
    }
}

/// DRM selection for one playlist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetDrm {
    /// Use the default license routing
    Default,
    /// Asset ships its own license endpoints
    Custom(DrmConfig),
    /// Clear content, no license acquisition
    Disabled,
}

/// One entry in the demo playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Human-readable name
    pub name: String,
    /// Manifest URL handed to the player's `load`
    pub url: Url,
    /// DRM selection for this asset
    #[serde(default = "default_asset_drm")]
    pub drm: AssetDrm,
}

fn default_asset_drm() -> AssetDrm {
    AssetDrm::Default
}

impl Asset {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
            drm: AssetDrm::Default,
        }
    }

    pub fn with_drm(mut self, drm: AssetDrm) -> Self {
        self.drm = drm;
        self
    }

    /// Compose the per-asset init config from the shared defaults
    pub fn init_config(&self) -> InitConfig {
        let mut config = InitConfig::default();
        match &self.drm {
            AssetDrm::Default => {}
            AssetDrm::Custom(drm) => config.drm_config = Some(drm.clone()),
            AssetDrm::Disabled => config.drm_config = None,
        }
        config
    }
}

/// Ordered set of assets rotated round-robin on playback completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    assets: Vec<Asset>,
    index: usize,
}

impl Playlist {
    pub fn new(assets: Vec<Asset>) -> Result<Self> {
        if assets.is_empty() {
            return Err(Error::EmptyPlaylist);
        }
        Ok(Self { assets, index: 0 })
    }

    /// Currently selected asset
    pub fn current(&self) -> &Asset {
        &self.assets[self.index]
    }

    /// Advance to the next asset, wrapping at the end
    pub fn advance(&mut self) -> &Asset {
        self.index = (self.index + 1) % self.assets.len();
        &self.assets[self.index]
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }
}
