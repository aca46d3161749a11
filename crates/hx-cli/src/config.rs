//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hx_core::{ParseOptions, RepairScope};
use hx_llm::{DEFAULT_API_BASE, DEFAULT_MODEL, GenerationSettings};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key.
    pub api_key: Option<String>,
    /// Model tried first.
    pub model: String,
    /// Models tried in order when the previous one is unavailable.
    pub fallback_models: Vec<String>,
    pub api_base: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    /// Timeout for API calls and result page fetches.
    pub timeout_secs: u64,
    /// Let the repair pass fill any station, not just ski erg and the sleds.
    pub repair_all_stations: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("fallback_models", &self.fallback_models)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .field("top_p", &self.top_p)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("repair_all_stations", &self.repair_all_stations)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            fallback_models: vec!["gemini-pro".to_string()],
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
            timeout_secs: 120,
            repair_all_stations: false,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // The conventional Gemini variable, overridden by HX_API_KEY.
        figment = figment.merge(
            Env::raw()
                .only(&["GEMINI_API_KEY"])
                .map(|_| "api_key".into()),
        );
        figment = figment.merge(Env::prefixed("HX_"));

        figment.extract()
    }

    /// The configured API key, if it is not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Generation settings for a plan request against `model`.
    pub fn generation_settings(&self, model: &str) -> GenerationSettings {
        GenerationSettings {
            model: model.to_string(),
            api_base: self.api_base.clone(),
            temperature: self.temperature,
            top_k: Some(self.top_k),
            top_p: Some(self.top_p),
            max_output_tokens: self.max_output_tokens,
            system_instruction: Some(hx_core::SYSTEM_INSTRUCTION.to_string()),
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::default();
        if self.repair_all_stations {
            options.reduce.repair = RepairScope::AllStations;
        }
        options
    }
}

/// Returns the platform-specific config directory for hx.
///
/// On Linux: `~/.config/hx`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hx"))
}
