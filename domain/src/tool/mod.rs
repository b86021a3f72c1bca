//! Tool model: definitions, calls, and results
//!
//! Personas may invoke tools mid-turn. The debate engine only needs the
//! shape of a tool (for advertising it to the model and gating it against
//! the persona's capability set) and the outcome of an invocation; actual
//! execution lives behind the `ToolExecutorPort` in the application layer.

pub mod entities;
pub mod value_objects;

pub use entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
