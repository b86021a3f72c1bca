//! File operation tools: read_file, write_file

use roundtable_domain::tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read the contents of a file at the specified path",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("path", "Path to the file to read", true).with_type("path"))
    .with_parameter(
        ToolParameter::new("offset", "Line to start reading from (0-indexed)", false)
            .with_type("number"),
    )
    .with_parameter(
        ToolParameter::new("limit", "Maximum number of lines to read", false).with_type("number"),
    )
}

pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Write content to a file, creating or overwriting it",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new("path", "Path to the file to write", true).with_type("path"))
    .with_parameter(ToolParameter::new("content", "Content to write", true).with_type("string"))
    .with_parameter(
        ToolParameter::new("create_dirs", "Create missing parent directories", false)
            .with_type("boolean"),
    )
}

pub fn execute_read_file(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let path_str = match call.require_string("path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ_FILE, ToolError::invalid_argument(e)),
    };
    let path = Path::new(path_str);

    if !path.exists() {
        return ToolResult::failure(READ_FILE, ToolError::not_found(path_str));
    }
    if !path.is_file() {
        return ToolResult::failure(
            READ_FILE,
            ToolError::invalid_argument(format!("'{path_str}' is not a file")),
        );
    }

    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > MAX_READ_SIZE => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::invalid_argument(format!(
                    "File too large ({} bytes, limit {} bytes)",
                    metadata.len(),
                    MAX_READ_SIZE
                )),
            );
        }
        Ok(_) => {}
        Err(e) => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::execution_failed(format!("Cannot stat file: {e}")),
            );
        }
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return ToolResult::failure(READ_FILE, ToolError::permission_denied(path_str));
        }
        Err(e) => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::execution_failed(format!("Cannot read file: {e}")),
            );
        }
    };

    let offset = call.get_i64("offset").unwrap_or(0).max(0) as usize;
    let limit = call.get_i64("limit");
    let output = if offset > 0 || limit.is_some() {
        let lines: Vec<&str> = content.lines().collect();
        let end = match limit {
            Some(l) => (offset + l.max(0) as usize).min(lines.len()),
            None => lines.len(),
        };
        if offset >= lines.len() {
            String::new()
        } else {
            lines[offset..end].join("\n")
        }
    } else {
        content
    };

    let bytes = output.len();
    ToolResult::success(READ_FILE, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        bytes: Some(bytes),
        path: Some(path_str.to_string()),
        ..Default::default()
    })
}

pub fn execute_write_file(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let path_str = match call.require_string("path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(WRITE_FILE, ToolError::invalid_argument(e)),
    };
    let content = match call.require_string("content") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(WRITE_FILE, ToolError::invalid_argument(e)),
    };
    let path = Path::new(path_str);

    if call.get_bool("create_dirs").unwrap_or(false)
        && let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return ToolResult::failure(
            WRITE_FILE,
            ToolError::execution_failed(format!("Cannot create directories: {e}")),
        );
    }

    match fs::write(path, content) {
        Ok(()) => {
            let bytes = content.len();
            ToolResult::success(WRITE_FILE, format!("Wrote {bytes} bytes to {path_str}"))
                .with_metadata(ToolResultMetadata {
                    duration_ms: Some(start.elapsed().as_millis() as u64),
                    bytes: Some(bytes),
                    path: Some(path_str.to_string()),
                    ..Default::default()
                })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            ToolResult::failure(WRITE_FILE, ToolError::permission_denied(path_str))
        }
        Err(e) => ToolResult::failure(
            WRITE_FILE,
            ToolError::execution_failed(format!("Cannot write file: {e}")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "one\ntwo\nthree").unwrap();

        let call = ToolCall::new(READ_FILE).with_arg("path", path.to_str().unwrap());
        let result = execute_read_file(&call);
        assert!(result.is_success());
        assert!(result.output().unwrap().contains("two"));
        assert!(result.metadata.bytes.is_some());
    }

    #[test]
    fn test_read_file_offset_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "one\ntwo\nthree\nfour").unwrap();

        let call = ToolCall::new(READ_FILE)
            .with_arg("path", path.to_str().unwrap())
            .with_arg("offset", 1)
            .with_arg("limit", 2);
        let result = execute_read_file(&call);
        assert_eq!(result.output(), Some("two\nthree"));
    }

    #[test]
    fn test_read_file_not_found() {
        let call = ToolCall::new(READ_FILE).with_arg("path", "/no/such/file");
        let result = execute_read_file(&call);
        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "NOT_FOUND");
    }

    #[test]
    fn test_read_file_missing_path_arg() {
        let result = execute_read_file(&ToolCall::new(READ_FILE));
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_write_file_with_create_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/b.txt");

        let call = ToolCall::new(WRITE_FILE)
            .with_arg("path", path.to_str().unwrap())
            .with_arg("content", "hello")
            .with_arg("create_dirs", true);
        let result = execute_write_file(&call);

        assert!(result.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }
}
