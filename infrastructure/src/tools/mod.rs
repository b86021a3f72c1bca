//! Tool implementations personas can call during their turns
//!
//! Concrete local implementations behind the application layer's
//! [`ToolExecutorPort`](roundtable_application::ports::tool_executor::ToolExecutorPort):
//! file access, command execution, and content search, plus web fetch and
//! search behind the `web-tools` feature.

pub mod command;
pub mod file;
pub mod search;
#[cfg(feature = "web-tools")]
pub mod web;

mod executor;

pub use executor::LocalToolExecutor;

use roundtable_domain::tool::entities::ToolSpec;

/// Create the default tool specification with all available tools
pub fn default_tool_spec() -> ToolSpec {
    let spec = ToolSpec::new()
        .register(file::read_file_definition())
        .register(file::write_file_definition())
        .register(command::run_command_definition())
        .register(search::glob_search_definition())
        .register(search::grep_search_definition());

    #[cfg(feature = "web-tools")]
    let spec = spec
        .register(web::web_fetch_definition())
        .register(web::web_search_definition());

    spec
}

/// Low-risk (read-only) tools only
pub fn read_only_tool_spec() -> ToolSpec {
    let spec = ToolSpec::new()
        .register(file::read_file_definition())
        .register(search::glob_search_definition())
        .register(search::grep_search_definition());

    #[cfg(feature = "web-tools")]
    let spec = spec
        .register(web::web_fetch_definition())
        .register(web::web_search_definition());

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::RiskLevel;

    #[test]
    fn test_default_spec_contains_core_tools() {
        let spec = default_tool_spec();
        for name in [
            file::READ_FILE,
            file::WRITE_FILE,
            command::RUN_COMMAND,
            search::GLOB_SEARCH,
            search::GREP_SEARCH,
        ] {
            assert!(spec.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_read_only_spec_is_low_risk() {
        let spec = read_only_tool_spec();
        assert!(spec.all().all(|t| t.risk_level == RiskLevel::Low));
    }
}
