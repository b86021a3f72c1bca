//! Tool value objects: results and errors of tool execution

use crate::core::string;
use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
///
/// The code distinguishes argument mistakes the model can correct
/// (`INVALID_ARGUMENT`, `NOT_FOUND`) from runtime failures
/// (`EXECUTION_FAILED`, `PERMISSION_DENIED`, `TIMEOUT`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "PERMISSION_DENIED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::new(
            "PERMISSION_DENIED",
            format!("Permission denied: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
///
/// Consumed by the persona runner: the textual form goes back to the model
/// as a tool message, and a summary is recorded on the contribution for
/// traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of bytes processed/returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// For file operations: the affected path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// For command execution: exit code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// For search operations: number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.metadata.path = Some(path.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// The text fed back to the model as the tool message content
    pub fn as_message_text(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => format!("Error: {}", error),
            (None, None) => String::new(),
        }
    }

    /// One-line summary recorded on the persona contribution
    pub fn summary(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => {
                let line = output.lines().next().unwrap_or("");
                if line.len() > 120 {
                    string::truncate(line, 123)
                } else if output.lines().count() > 1 {
                    format!("{}...", line)
                } else {
                    line.to_string()
                }
            }
            (None, Some(error)) => error.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("read_file", "file contents").with_path("/tmp/a.txt");

        assert!(result.is_success());
        assert_eq!(result.output(), Some("file contents"));
        assert!(result.error().is_none());
        assert_eq!(result.metadata.path, Some("/tmp/a.txt".to_string()));
        assert_eq!(result.as_message_text(), "file contents");
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure("write_file", ToolError::permission_denied("/etc/passwd"));

        assert!(!result.is_success());
        assert!(result.output().is_none());
        assert_eq!(result.error().unwrap().code, "PERMISSION_DENIED");
        assert!(result.as_message_text().starts_with("Error: "));
    }

    #[test]
    fn test_summary_truncates() {
        let long = "x".repeat(200);
        let result = ToolResult::success("read_file", long);
        assert!(result.summary().len() <= 124);
        assert!(result.summary().ends_with("..."));

        let multi = ToolResult::success("grep_search", "line one\nline two");
        assert_eq!(multi.summary(), "line one...");
    }

    #[test]
    fn test_summary_truncates_multibyte_at_char_boundary() {
        // Byte 120 falls inside the first multibyte character
        let long = format!("{}日本語", "x".repeat(119));
        let result = ToolResult::success("read_file", long);
        let summary = result.summary();
        assert!(summary.ends_with("..."));
        assert!(summary.len() <= 123);
        assert!(summary.starts_with("xxx"));
    }
}
