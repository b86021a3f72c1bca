//! Persona capability boundary
//!
//! Personas may only use tools from their configured list, and certain
//! agent-level tools are blocked outright. The block list is a build-time
//! constant intersected with configuration, so a mis-edited roundtable file
//! can never escalate a persona's privileges.

use crate::debate::roundtable::PersonaDefinition;
use crate::tool::entities::{ToolDefinition, ToolSpec};
use std::collections::BTreeSet;

/// Tools personas must never have access to, regardless of configuration
pub const BLOCKED_PERSONA_TOOLS: &[&str] = &["message", "spawn", "debate", "cron"];

/// The effective tool set of one persona
#[derive(Debug, Clone, Default)]
pub struct PersonaCapabilities {
    allowed: BTreeSet<String>,
}

impl PersonaCapabilities {
    /// Build the capability set for a persona: its configured tool list
    /// minus the blocked set. Blocked entries are reported so the caller
    /// can log them.
    pub fn for_persona(persona: &PersonaDefinition) -> (Self, Vec<String>) {
        let mut allowed = BTreeSet::new();
        let mut blocked = Vec::new();

        for tool in &persona.tools {
            if BLOCKED_PERSONA_TOOLS.contains(&tool.as_str()) {
                blocked.push(tool.clone());
            } else {
                allowed.insert(tool.clone());
            }
        }

        (Self { allowed }, blocked)
    }

    /// Whether this persona may invoke the named tool
    pub fn allows(&self, tool_name: &str) -> bool {
        self.allowed.contains(tool_name)
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// The tool definitions advertised to the persona's model: the
    /// intersection of its capability set with the tools the executor
    /// actually provides, in name order.
    pub fn advertised_tools(&self, spec: &ToolSpec) -> Vec<ToolDefinition> {
        self.allowed
            .iter()
            .filter_map(|name| spec.get(name).cloned())
            .collect()
    }
}
