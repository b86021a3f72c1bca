//! Local tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! Bridges the application layer's abstract tool port to actual system
//! operations: file I/O, process execution, content search, and (with the
//! `web-tools` feature) web requests.

use async_trait::async_trait;
use roundtable_application::ports::tool_executor::ToolExecutorPort;
use roundtable_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::{ToolError, ToolResult},
};

use super::{command, file, search};

/// Executor that runs tools on the local machine
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    tool_spec: ToolSpec,
    /// Working directory injected into commands (None = current directory)
    working_dir: Option<String>,
    #[cfg(feature = "web-tools")]
    http_client: reqwest::Client,
}

impl LocalToolExecutor {
    /// Executor with every available tool
    pub fn new() -> Self {
        Self::with_tools(super::default_tool_spec())
    }

    /// Executor with only low-risk (read-only) tools.
    ///
    /// Excludes `write_file` and `run_command`. The sensible default for
    /// personas whose job is analysis, not modification.
    pub fn read_only() -> Self {
        Self::with_tools(super::read_only_tool_spec())
    }

    /// Executor with a custom tool spec
    pub fn with_tools(tool_spec: ToolSpec) -> Self {
        Self {
            tool_spec,
            working_dir: None,
            #[cfg(feature = "web-tools")]
            http_client: http_client(),
        }
    }

    /// Set the working directory for commands
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn execute_builtin(&self, call: &ToolCall) -> ToolResult {
        match call.tool_name.as_str() {
            file::READ_FILE => file::execute_read_file(call),
            file::WRITE_FILE => file::execute_write_file(call),
            command::RUN_COMMAND => {
                if let Some(dir) = &self.working_dir
                    && call.get_string("working_dir").is_none()
                {
                    let call = call.clone().with_arg("working_dir", dir.as_str());
                    command::execute_run_command(&call)
                } else {
                    command::execute_run_command(call)
                }
            }
            search::GLOB_SEARCH => search::execute_glob_search(call),
            search::GREP_SEARCH => search::execute_grep_search(call),
            other => ToolResult::failure(
                other,
                ToolError::execution_failed(format!("Tool '{other}' is not implemented")),
            ),
        }
    }
}

#[cfg(feature = "web-tools")]
fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}

impl Default for LocalToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if !self.tool_spec.contains(&call.tool_name) {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("tool '{}'", call.tool_name)),
            );
        }

        #[cfg(feature = "web-tools")]
        match call.tool_name.as_str() {
            super::web::WEB_FETCH => {
                return super::web::execute_web_fetch(&self.http_client, call).await;
            }
            super::web::WEB_SEARCH => {
                return super::web::execute_web_search(&self.http_client, call).await;
            }
            _ => {}
        }

        // Built-in tools are synchronous file and process operations
        self.execute_builtin(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_executor_runs_known_tool() {
        let executor = LocalToolExecutor::new();
        let call = ToolCall::new(command::RUN_COMMAND).with_arg("command", "echo ping");
        let result = executor.execute(&call).await;
        assert!(result.is_success());
        assert!(result.output().unwrap().contains("ping"));
    }

    #[tokio::test]
    async fn test_executor_rejects_unknown_tool() {
        let executor = LocalToolExecutor::new();
        let result = executor.execute(&ToolCall::new("teleport")).await;
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_read_only_excludes_high_risk_tools() {
        let executor = LocalToolExecutor::read_only();
        assert!(executor.has_tool(file::READ_FILE));
        assert!(!executor.has_tool(file::WRITE_FILE));
        assert!(!executor.has_tool(command::RUN_COMMAND));
    }

    #[tokio::test]
    async fn test_working_dir_is_injected() {
        let dir = tempfile::tempdir().unwrap();
        let executor =
            LocalToolExecutor::new().with_working_dir(dir.path().to_str().unwrap());
        let call = ToolCall::new(command::RUN_COMMAND).with_arg("command", "pwd");
        let result = executor.execute(&call).await;
        let name = dir.path().file_name().unwrap().to_str().unwrap();
        assert!(result.output().unwrap().contains(name));
    }
}
