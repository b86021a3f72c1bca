//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionDefaults;
pub use ports::{
    debate_logger::{DebateEvent, DebateLogger, NoopDebateLogger},
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
    progress::{DebateProgress, NoProgress},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
