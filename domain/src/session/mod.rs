//! Chat session types exchanged with an LLM provider

pub mod entities;
pub mod response;

pub use entities::{Message, Role};
pub use response::{ContentBlock, LlmResponse, StopReason};
