//! # Client configuration
//!
//! One `ClientConfig` exists per running application. It starts from
//! hard-coded defaults, is overlaid by a persisted snapshot at startup, and
//! is written back wholesale after every mutation. Persistence is a single
//! JSON blob at `~/.mdpolish/config.json`; a missing or corrupt file falls
//! back to defaults and is never fatal.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional writing assistant. \
    You excel at polishing and improving text, making it read more fluently, \
    accurately, and professionally.";

// ============================================================================
// ClientConfig
// ============================================================================

/// Settings for one completion client. The API key is a secret: it is sent
/// only as a bearer header and never logged or echoed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    pub provider_id: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature. Range is the caller's responsibility; no
    /// clamping happens here.
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            provider_id: "deepseek".to_string(),
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl ClientConfig {
    /// A config is usable once an API key is present and non-blank.
    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Overwrites only the fields the patch provides; everything else is
    /// retained.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(provider_id) = patch.provider_id {
            self.provider_id = provider_id;
        }
        if let Some(api_key) = patch.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = patch.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = patch.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(system_prompt) = patch.system_prompt {
            self.system_prompt = system_prompt;
        }
    }
}

/// Sparse update for [`ClientConfig`]: only the populated fields overwrite.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigPatch {
    pub provider_id: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

// ============================================================================
// Persistence
// ============================================================================

/// Durable home for the config blob. Last writer wins; there is no
/// transactional guarantee across a crash mid-write.
pub trait ConfigStore: Send + Sync {
    /// Returns the persisted config, or `None` when nothing usable exists.
    fn load(&self) -> Option<ClientConfig>;
    /// Writes the full config. Failures are logged, not propagated; a broken
    /// disk must not take the editor down.
    fn save(&self, config: &ClientConfig);
}

/// JSON-file-backed store, by default at `~/.mdpolish/config.json`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to `~/.mdpolish/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mdpolish").join("config.json"))
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Option<ClientConfig> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => {
                info!("No config file at {}, using defaults", self.path.display());
                return None;
            }
        };
        // The snapshot is parsed as a patch and overlaid onto defaults, so
        // a blob from an older version that lacks newer fields still keeps
        // the settings it does carry.
        match serde_json::from_str::<ConfigPatch>(&contents) {
            Ok(patch) => {
                info!("Loaded config from {}", self.path.display());
                let mut config = ClientConfig::default();
                config.apply(patch);
                Some(config)
            }
            Err(e) => {
                warn!("Corrupt config at {}: {e}, using defaults", self.path.display());
                None
            }
        }
    }

    fn save(&self, config: &ClientConfig) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Failed to create config directory: {e}");
            return;
        }
        let json = match serde_json::to_string_pretty(config) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize config: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!("Failed to write config to {}: {e}", self.path.display());
        }
    }
}
