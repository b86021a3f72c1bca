//! Command execution tool: run_command

use roundtable_domain::core::string::truncate_bytes;
use roundtable_domain::tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

pub const RUN_COMMAND: &str = "run_command";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum output size (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

pub fn run_command_definition() -> ToolDefinition {
    ToolDefinition::new(
        RUN_COMMAND,
        "Execute a shell command and return its output. Use with caution.",
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("command", "The command to execute", true).with_type("string"),
    )
    .with_parameter(
        ToolParameter::new("working_dir", "Working directory for the command", false)
            .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new("timeout_secs", "Timeout in seconds (default: 60)", false)
            .with_type("number"),
    )
}

pub fn execute_run_command(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let command_str = match call.require_string("command") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(RUN_COMMAND, ToolError::invalid_argument(e)),
    };
    let timeout_secs = call
        .get_i64("timeout_secs")
        .filter(|t| *t > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS as i64) as u64;

    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", command_str]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", command_str]);
        c
    };

    if let Some(dir) = call.get_string("working_dir") {
        let path = std::path::Path::new(dir);
        if !path.is_dir() {
            return ToolResult::failure(
                RUN_COMMAND,
                ToolError::not_found(format!("working directory {dir}")),
            );
        }
        cmd.current_dir(path);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return ToolResult::failure(
                RUN_COMMAND,
                ToolError::execution_failed(format!("Cannot spawn command: {e}")),
            );
        }
    };

    let output = match wait_with_timeout(child, Duration::from_secs(timeout_secs)) {
        Ok(output) => output,
        Err(e) => {
            return ToolResult::failure(
                RUN_COMMAND,
                ToolError::timeout(format!("command after {timeout_secs}s: {e}")),
            );
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut combined = String::new();
    combined.push_str(&stdout);
    if !stderr.is_empty() {
        if !combined.is_empty() {
            combined.push_str("\n--- stderr ---\n");
        }
        combined.push_str(&stderr);
    }
    if combined.len() > MAX_OUTPUT_SIZE {
        truncate_bytes(&mut combined, MAX_OUTPUT_SIZE);
        combined.push_str("\n... (output truncated)");
    }

    let metadata = ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        bytes: Some(combined.len()),
        exit_code: Some(exit_code),
        ..Default::default()
    };

    // A non-zero exit is still a tool success; the persona sees the code
    // and decides what to make of it
    let output_text = if output.status.success() {
        combined
    } else {
        format!("Command exited with code {exit_code}\n{combined}")
    };
    ToolResult::success(RUN_COMMAND, output_text).with_metadata(metadata)
}

fn wait_with_timeout(
    mut child: std::process::Child,
    timeout: Duration,
) -> Result<std::process::Output, String> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = read_pipe(child.stdout.take());
                let stderr = read_pipe(child.stderr.take());
                return Ok(std::process::Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err("command timed out".to_string());
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(format!("cannot wait for process: {e}")),
        }
    }
}

fn read_pipe(pipe: Option<impl std::io::Read>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = std::io::Read::read_to_end(&mut pipe, &mut buf);
    }
    buf
}
