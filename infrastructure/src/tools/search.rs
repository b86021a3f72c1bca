//! Search tools: glob_search, grep_search

use glob::glob;
use regex::RegexBuilder;
use roundtable_domain::tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use std::path::Path;
use std::time::Instant;

pub const GLOB_SEARCH: &str = "glob_search";
pub const GREP_SEARCH: &str = "grep_search";

const MAX_RESULTS: usize = 1000;

/// Maximum file size for grep (5 MB)
const MAX_GREP_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub fn glob_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        GLOB_SEARCH,
        "Search for files matching a glob pattern (e.g., '**/*.rs')",
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("pattern", "Glob pattern to match files", true).with_type("string"),
    )
    .with_parameter(
        ToolParameter::new("base_dir", "Directory to search from (default: current)", false)
            .with_type("path"),
    )
}

pub fn grep_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        GREP_SEARCH,
        "Search file contents with a regex pattern",
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("pattern", "Regex pattern to search for", true).with_type("string"),
    )
    .with_parameter(
        ToolParameter::new("path", "File or directory to search in", true).with_type("path"),
    )
    .with_parameter(
        ToolParameter::new("case_insensitive", "Ignore case when matching", false)
            .with_type("boolean"),
    )
}

pub fn execute_glob_search(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let pattern = match call.require_string("pattern") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GLOB_SEARCH, ToolError::invalid_argument(e)),
    };
    let base_dir = call.get_string("base_dir").unwrap_or(".");
    let full_pattern = if pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("{base_dir}/{pattern}")
    };

    let entries = match glob(&full_pattern) {
        Ok(entries) => entries,
        Err(e) => {
            return ToolResult::failure(
                GLOB_SEARCH,
                ToolError::invalid_argument(format!("Invalid glob pattern: {e}")),
            );
        }
    };

    let matches: Vec<String> = entries
        .flatten()
        .take(MAX_RESULTS)
        .map(|p| p.display().to_string())
        .collect();

    let mut output = matches.join("\n");
    if matches.len() >= MAX_RESULTS {
        output.push_str(&format!("\n... (limited to {MAX_RESULTS} results)"));
    }
    if matches.is_empty() {
        output = format!("No files match '{pattern}'");
    }

    let match_count = matches.len();
    ToolResult::success(GLOB_SEARCH, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        match_count: Some(match_count),
        ..Default::default()
    })
}

pub fn execute_grep_search(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let pattern = match call.require_string("pattern") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GREP_SEARCH, ToolError::invalid_argument(e)),
    };
    let path_str = match call.require_string("path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GREP_SEARCH, ToolError::invalid_argument(e)),
    };

    let regex = match RegexBuilder::new(pattern)
        .case_insensitive(call.get_bool("case_insensitive").unwrap_or(false))
        .build()
    {
        Ok(regex) => regex,
        Err(e) => {
            return ToolResult::failure(
                GREP_SEARCH,
                ToolError::invalid_argument(format!("Invalid regex: {e}")),
            );
        }
    };

    let path = Path::new(path_str);
    if !path.exists() {
        return ToolResult::failure(GREP_SEARCH, ToolError::not_found(path_str));
    }

    let mut matches = Vec::new();
    grep_path(path, &regex, &mut matches);
    matches.truncate(MAX_RESULTS);

    let match_count = matches.len();
    let output = if matches.is_empty() {
        format!("No matches for '{pattern}' in {path_str}")
    } else {
        matches.join("\n")
    };

    ToolResult::success(GREP_SEARCH, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        match_count: Some(match_count),
        ..Default::default()
    })
}

fn grep_path(path: &Path, regex: &regex::Regex, matches: &mut Vec<String>) {
    if matches.len() >= MAX_RESULTS {
        return;
    }
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            for entry in entries.flatten() {
                // Skip hidden entries (.git and friends)
                if entry.file_name().to_string_lossy().starts_with('.') {
                    continue;
                }
                grep_path(&entry.path(), regex, matches);
            }
        }
        return;
    }

    if let Ok(metadata) = path.metadata()
        && metadata.len() > MAX_GREP_FILE_SIZE
    {
        return;
    }
    let Ok(content) = std::fs::read_to_string(path) else {
        // Binary or unreadable, skip
        return;
    };
    for (number, line) in content.lines().enumerate() {
        if regex.is_match(line) {
            matches.push(format!("{}:{}: {}", path.display(), number + 1, line));
            if matches.len() >= MAX_RESULTS {
                return;
            }
        }
    }
}
