//! Model value object representing an LLM model identifier

use serde::{Deserialize, Serialize};

/// Identifier of an LLM model (Value Object)
///
/// Roundtable model names are open-ended provider strings
/// (e.g. "gpt-4.1", "claude-sonnet-4.5", "openrouter/qwen3-coder"),
/// so this is a validated newtype rather than a closed enum. Personas
/// and the orchestrator may each name their own model; empty names are
/// normalized away at construction so `Option<Model>` fallbacks work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    /// Create a model identifier, trimming surrounding whitespace.
    ///
    /// # Panics
    /// Panics if the identifier is empty or only whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        assert!(!trimmed.is_empty(), "Model identifier cannot be empty");
        Self(trimmed.to_string())
    }

    /// Try to create a model identifier, returning None if empty
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::try_new(s).ok_or_else(|| "Model identifier cannot be empty".to_string())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new("gpt-4.1");
        assert_eq!(model.as_str(), "gpt-4.1");
        assert_eq!(model.to_string(), "gpt-4.1");
    }

    #[test]
    fn test_model_trims_whitespace() {
        let model = Model::new("  claude-sonnet-4.5  ");
        assert_eq!(model.as_str(), "claude-sonnet-4.5");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Model::try_new("").is_none());
        assert!(Model::try_new("   ").is_none());
    }

    #[test]
    fn test_parse_roundtrip() {
        let model: Model = "openrouter/qwen3-coder".parse().unwrap();
        assert_eq!(model, Model::new("openrouter/qwen3-coder"));
        assert!("".parse::<Model>().is_err());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let model = Model::new("gpt-4.1");
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "\"gpt-4.1\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
