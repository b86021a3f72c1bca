//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects
//! of the multi-persona debate engine. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roundtable
//!
//! A roundtable bundles a set of personas with round limits and orchestrator
//! settings for one debate topic. Running a roundtable produces a debate:
//!
//! - **Rounds**: every persona contributes once per round, in parallel
//! - **Convergence**: a judge may end the debate early once positions align
//! - **Synthesis**: a moderator reduces the full transcript to one answer

pub mod core;
pub mod debate;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, question::Question};
pub use debate::{
    capability::{BLOCKED_PERSONA_TOOLS, PersonaCapabilities},
    roundtable::{
        OrchestratorSettings, PersonaDefinition, RoundSettings, RoundtableDefinition, TriggerMode,
    },
    session::{DebateSession, FinalResult, Synthesis},
    transcript::{
        ContributionStatus, ConvergenceDecision, PersonaContribution, Round, ToolInvocation,
        Transcript,
    },
};
pub use prompt::DebatePrompts;
pub use session::{
    entities::{Message, Role},
    response::{ContentBlock, LlmResponse, StopReason},
};
pub use tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
