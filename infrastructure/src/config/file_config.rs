//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the config file. They are
//! deserialized directly and converted into application-layer types.

use roundtable_application::config::SessionDefaults;
use roundtable_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fallback generation parameters
    pub defaults: FileDefaultsConfig,
    /// Provider endpoint settings
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Roundtable definition discovery
    pub roundtables: FileRoundtablesConfig,
    /// Structured logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Convert the `[defaults]` section into application session defaults.
    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults::default()
            .with_model(Model::new(&self.defaults.model))
            .with_temperature(self.defaults.temperature)
            .with_max_tokens(self.defaults.max_tokens)
            .with_max_tool_turns(self.defaults.max_tool_turns)
            .with_request_timeout(
                self.defaults
                    .request_timeout_secs
                    .map(Duration::from_secs),
            )
    }
}

/// `[defaults]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDefaultsConfig {
    /// Model used when a persona does not pin one
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_tool_turns: usize,
    /// Per-request timeout; absent means wait forever
    pub request_timeout_secs: Option<u64>,
}

impl Default for FileDefaultsConfig {
    fn default() -> Self {
        let defaults = SessionDefaults::default();
        Self {
            model: defaults.model.as_str().to_string(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            max_tool_turns: defaults.max_tool_turns,
            request_timeout_secs: defaults.request_timeout.map(|t| t.as_secs()),
        }
    }
}

/// `[provider]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible chat completions API
    pub api_base: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key_env: "ROUNDTABLE_API_KEY".to_string(),
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Transcript plus synthesis
    #[default]
    Full,
    /// Only the synthesized answer
    Synthesis,
    /// Machine-readable JSON
    Json,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: FileOutputFormat,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: FileOutputFormat::Full,
            color: true,
        }
    }
}

/// `[roundtables]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoundtablesConfig {
    /// Directory holding roundtable TOML files; absent means the
    /// loader's default search path.
    pub dir: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL debate log; absent disables it
    pub debate_log: Option<String>,
}
