//! Session defaults, the fallback generation parameters for persona turns.
//!
//! A persona definition may pin its own model, temperature, and token
//! budget; anything it leaves unset falls back to these values. The loop
//! limits and timeout are application-layer concerns and cannot be set
//! per persona.

use roundtable_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fallback parameters applied to persona turns, convergence checks,
/// and synthesis calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    /// Model used when neither the persona nor the orchestrator pins one.
    pub model: Model,
    /// Sampling temperature for persona turns.
    pub temperature: f32,
    /// Token budget for persona turns.
    pub max_tokens: u32,
    /// Maximum tool use turns in a single persona turn.
    pub max_tool_turns: usize,
    /// Timeout for each provider request.
    pub request_timeout: Option<Duration>,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            model: Model::new("gpt-4.1"),
            temperature: 0.7,
            max_tokens: 4096,
            max_tool_turns: 10,
            request_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl SessionDefaults {
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
