//! Shared test doubles for the use case tests.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use roundtable_domain::{
    LlmResponse, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolResult, ToolSpec,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Gateway whose responses are scripted per model name.
///
/// Keying scripts by model keeps expectations deterministic even when
/// several persona tasks hit the gateway concurrently. Every request is
/// recorded for assertions.
pub struct ScriptedGateway {
    scripts: Mutex<HashMap<String, VecDeque<Result<LlmResponse, GatewayError>>>>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            delays: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Delay every call for `model`, for exercising timeouts and ordering.
    pub fn with_delay(mut self, model: &str, delay: Duration) -> Self {
        self.delays.insert(model.to_string(), delay);
        self
    }

    pub fn script(&self, model: &str, response: LlmResponse) {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(Ok(response));
    }

    pub fn script_err(&self, model: &str, error: GatewayError) {
        self.scripts
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn chat(&self, request: ChatRequest) -> Result<LlmResponse, GatewayError> {
        let model = request.model.as_str().to_string();
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delays.get(&model) {
            tokio::time::sleep(*delay).await;
        }

        self.scripts
            .lock()
            .unwrap()
            .get_mut(&model)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(GatewayError::Other(format!(
                    "no scripted response for model '{model}'"
                )))
            })
    }
}

/// Tool executor that returns a fixed result per tool and records calls.
#[derive(Default)]
pub struct StaticToolExecutor {
    spec: ToolSpec,
    results: HashMap<String, ToolResult>,
    executed: Mutex<Vec<String>>,
}

impl StaticToolExecutor {
    pub fn with_tool(name: &str, result: ToolResult) -> Self {
        Self::default().and_tool(name, result)
    }

    pub fn and_tool(mut self, name: &str, result: ToolResult) -> Self {
        self.spec = self
            .spec
            .register(ToolDefinition::new(name, "test tool", RiskLevel::Low));
        self.results.insert(name.to_string(), result);
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutorPort for StaticToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.executed.lock().unwrap().push(call.tool_name.clone());
        self.results
            .get(&call.tool_name)
            .cloned()
            .unwrap_or_else(|| {
                ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name))
            })
    }
}
