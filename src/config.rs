use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const CONFIG_KEY: &str = "streamflow.config";

/// Tunables for the player. Every field falls back to its default so a
/// partial override in local storage is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_proxy_endpoint")]
    pub proxy_endpoint: String,
    #[serde(default = "default_osd_hide_ms")]
    pub osd_hide_ms: u32,
    #[serde(default = "default_controls_hide_ms")]
    pub controls_hide_ms: u32,
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: f64,
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,
    #[serde(default = "default_speed_options")]
    pub speed_options: Vec<f64>,
    /// Substring that marks a URL as an adaptive-streaming manifest.
    #[serde(default = "default_adaptive_marker")]
    pub adaptive_marker: String,
}

fn default_proxy_endpoint() -> String {
    "http://localhost:4000/proxy".to_string()
}

fn default_osd_hide_ms() -> u32 {
    600
}

fn default_controls_hide_ms() -> u32 {
    3000
}

fn default_seek_step_secs() -> f64 {
    10.0
}

fn default_volume_step() -> f64 {
    0.1
}

fn default_speed_options() -> Vec<f64> {
    vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0]
}

fn default_adaptive_marker() -> String {
    ".m3u8".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            proxy_endpoint: default_proxy_endpoint(),
            osd_hide_ms: default_osd_hide_ms(),
            controls_hide_ms: default_controls_hide_ms(),
            seek_step_secs: default_seek_step_secs(),
            volume_step: default_volume_step(),
            speed_options: default_speed_options(),
            adaptive_marker: default_adaptive_marker(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json(raw: &str) -> Result<Self, PlayerError> {
        serde_json::from_str(raw).map_err(|e| PlayerError::Config(e.to_string()))
    }
}

/// Read overrides from local storage. A bad entry is logged and ignored.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> PlayerConfig {
    let stored = LocalStorage::raw().get_item(CONFIG_KEY).ok().flatten();
    match stored.map(|raw| PlayerConfig::from_json(&raw)) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            dioxus::logger::tracing::warn!("ignoring stored player config: {e}");
            PlayerConfig::default()
        }
        None => PlayerConfig::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> PlayerConfig {
    PlayerConfig::default()
}
