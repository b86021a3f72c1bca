pub mod debate_logger;
pub mod llm_gateway;
pub mod progress;
pub mod tool_executor;

pub use debate_logger::{DebateEvent, DebateLogger, NoopDebateLogger};
pub use llm_gateway::{ChatRequest, GatewayError, LlmGateway};
pub use progress::{DebateProgress, NoProgress};
pub use tool_executor::{NoToolExecutor, ToolExecutorPort};
