//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, including configuration file loading, the provider
//! gateway, local tool execution, and structured debate logging.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat, FileProviderConfig,
    RoundtableLoadError, RoundtableLoader,
};
pub use logging::JsonlDebateLogger;
pub use providers::OpenAiCompatGateway;
pub use tools::{LocalToolExecutor, default_tool_spec, read_only_tool_spec};
