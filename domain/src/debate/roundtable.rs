//! Roundtable configuration: personas, round limits, orchestrator settings

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a roundtable may be selected for a question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// May be chosen automatically for matching questions
    #[default]
    Auto,
    /// Only runs when named explicitly by the caller
    Explicit,
}

/// Settings for the debate orchestrator (judge + synthesizer model and prompt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorSettings {
    /// Model override for convergence checks and synthesis
    pub model: Option<Model>,
    /// Instructions given to the synthesizer
    pub synthesis_prompt: String,
}

impl OrchestratorSettings {
    /// The default synthesis instructions
    pub fn default_synthesis_prompt() -> String {
        "Synthesize the debate into a clear recommendation with rationale, \
         noting points of agreement and disagreement."
            .to_string()
    }
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            model: None,
            synthesis_prompt: Self::default_synthesis_prompt(),
        }
    }
}

/// Round limits and convergence policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSettings {
    /// Maximum number of rounds
    pub max: u32,
    /// Minimum number of rounds before convergence may end the debate
    pub min: u32,
    /// Whether to run convergence checks at all
    pub convergence: bool,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            max: 3,
            min: 1,
            convergence: true,
        }
    }
}

/// Configuration for a single debate persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaDefinition {
    /// Unique name within the roundtable
    pub name: String,
    /// The persona's own system prompt
    pub system_prompt: String,
    /// Model override (falls back to the session default)
    #[serde(default)]
    pub model: Option<Model>,
    /// Temperature override
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Max-tokens override
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Tools this persona may use (intersected with the safe set)
    #[serde(default)]
    pub tools: Vec<String>,
}

impl PersonaDefinition {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            model: None,
            temperature: None,
            max_tokens: None,
            tools: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }
}

/// A named debate configuration: personas, round limits, orchestrator settings
///
/// Loaded once per debate invocation and immutable for the session's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtableDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trigger: TriggerMode,
    #[serde(default)]
    pub orchestrator: OrchestratorSettings,
    #[serde(default)]
    pub rounds: RoundSettings,
    #[serde(default)]
    pub personas: Vec<PersonaDefinition>,
}

impl RoundtableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            trigger: TriggerMode::default(),
            orchestrator: OrchestratorSettings::default(),
            rounds: RoundSettings::default(),
            personas: Vec::new(),
        }
    }

    pub fn with_personas(mut self, personas: Vec<PersonaDefinition>) -> Self {
        self.personas = personas;
        self
    }

    pub fn with_rounds(mut self, rounds: RoundSettings) -> Self {
        self.rounds = rounds;
        self
    }

    /// Persona names in declaration order
    pub fn persona_names(&self) -> Vec<String> {
        self.personas.iter().map(|p| p.name.clone()).collect()
    }

    /// Whether the convergence judge will ever be consulted.
    ///
    /// Convergence needs `min < max`: the check only happens after a round
    /// that is at least `min` and strictly before `max`, so with
    /// `min >= max` it is a no-op rather than an error.
    pub fn convergence_active(&self) -> bool {
        self.rounds.convergence && self.rounds.min < self.rounds.max
    }

    /// Validate the roundtable shape before any round starts
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.personas.is_empty() {
            return Err(DomainError::NoPersonas(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for persona in &self.personas {
            if !seen.insert(persona.name.as_str()) {
                return Err(DomainError::DuplicatePersona {
                    roundtable: self.name.clone(),
                    name: persona.name.clone(),
                });
            }
        }

        if self.rounds.min < 1 || self.rounds.max < self.rounds.min {
            return Err(DomainError::InvalidRounds {
                min: self.rounds.min,
                max: self.rounds.max,
            });
        }

        Ok(())
    }
}
