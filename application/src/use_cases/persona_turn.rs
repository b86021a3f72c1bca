//! Persona turn runner
//!
//! Runs one persona's contribution for one round: a bounded tool use loop
//! against the gateway, isolated so that no provider failure, timeout, or
//! runaway tool loop can escape as an error. Whatever happens, the runner
//! returns a [`PersonaContribution`] describing it.

use crate::config::SessionDefaults;
use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use roundtable_domain::{
    DebatePrompts, LlmResponse, Message, PersonaCapabilities, PersonaContribution,
    PersonaDefinition, ToolInvocation,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs persona turns against a gateway and tool executor.
///
/// One runner is shared by every persona task in a debate; all per-turn
/// state lives in the call.
pub struct PersonaTurnRunner<G, T> {
    gateway: Arc<G>,
    tools: Arc<T>,
    defaults: SessionDefaults,
}

impl<G, T> PersonaTurnRunner<G, T>
where
    G: LlmGateway + 'static,
    T: ToolExecutorPort + 'static,
{
    pub fn new(gateway: Arc<G>, tools: Arc<T>, defaults: SessionDefaults) -> Self {
        Self {
            gateway,
            tools,
            defaults,
        }
    }

    /// Run one persona's turn for the given round (1-based).
    ///
    /// `transcript` is the rendered transcript of all completed rounds,
    /// absent in round 1.
    pub async fn run(
        &self,
        persona: PersonaDefinition,
        question: String,
        transcript: Option<String>,
        round_number: u32,
    ) -> PersonaContribution {
        let (capabilities, blocked) = PersonaCapabilities::for_persona(&persona);
        if !blocked.is_empty() {
            warn!(
                persona = %persona.name,
                blocked = ?blocked,
                "ignoring blocked tools from persona configuration"
            );
        }
        let advertised = capabilities.advertised_tools(self.tools.tool_spec());

        let model = persona
            .model
            .clone()
            .unwrap_or_else(|| self.defaults.model.clone());
        let temperature = persona.temperature.unwrap_or(self.defaults.temperature);
        let max_tokens = persona.max_tokens.unwrap_or(self.defaults.max_tokens);

        let mut messages = vec![
            Message::system(DebatePrompts::persona_system(
                &persona.name,
                &persona.system_prompt,
                round_number,
            )),
            Message::user(DebatePrompts::persona_user(
                &persona.name,
                &question,
                transcript.as_deref(),
                round_number,
            )),
        ];
        let mut invocations: Vec<ToolInvocation> = Vec::new();

        for _ in 0..self.defaults.max_tool_turns {
            let request = ChatRequest::new(model.clone(), messages.clone())
                .with_tools(advertised.clone())
                .with_temperature(temperature)
                .with_max_tokens(max_tokens);

            let response = match self.send(request).await {
                Ok(response) => response,
                Err(GatewayError::Timeout) => {
                    warn!(persona = %persona.name, round = round_number, "persona turn timed out");
                    return PersonaContribution::timeout(&persona.name, "no response in time")
                        .with_tool_invocations(invocations);
                }
                Err(e) => {
                    warn!(persona = %persona.name, round = round_number, error = %e, "persona turn failed");
                    return PersonaContribution::failed(&persona.name, e.to_string())
                        .with_tool_invocations(invocations);
                }
            };

            let calls = response.tool_calls();
            if calls.is_empty() {
                let text = response.text_content();
                if text.trim().is_empty() {
                    return PersonaContribution::failed(&persona.name, "empty response")
                        .with_tool_invocations(invocations);
                }
                return PersonaContribution::ok(&persona.name, text)
                    .with_tool_invocations(invocations);
            }

            messages.push(Message::assistant_with_tool_calls(
                response.text_content(),
                calls.clone(),
            ));

            for call in calls {
                let call_id = call
                    .native_id
                    .clone()
                    .unwrap_or_else(|| call.tool_name.clone());

                let reply = if capabilities.allows(&call.tool_name) {
                    let result = self.tools.execute(&call).await;
                    debug!(
                        persona = %persona.name,
                        tool = %call.tool_name,
                        success = result.success,
                        "tool executed"
                    );
                    invocations.push(ToolInvocation::new(
                        &call.tool_name,
                        result.summary(),
                        result.success,
                    ));
                    result.as_message_text()
                } else {
                    debug!(persona = %persona.name, tool = %call.tool_name, "tool not allowed");
                    invocations.push(ToolInvocation::new(&call.tool_name, "not available", false));
                    format!("Error: tool '{}' is not available", call.tool_name)
                };

                messages.push(Message::tool(call_id, reply));
            }
        }

        warn!(persona = %persona.name, round = round_number, "tool loop did not settle");
        PersonaContribution::failed(
            &persona.name,
            format!(
                "tool loop did not produce a final answer within {} turns",
                self.defaults.max_tool_turns
            ),
        )
        .with_tool_invocations(invocations)
    }

    async fn send(&self, request: ChatRequest) -> Result<LlmResponse, GatewayError> {
        match self.defaults.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.gateway.chat(request))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => self.gateway.chat(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::{ScriptedGateway, StaticToolExecutor};
    use roundtable_domain::{ContentBlock, ContributionStatus, Model, StopReason, ToolResult};
    use std::collections::HashMap;
    use std::time::Duration;

    fn runner(
        gateway: ScriptedGateway,
        tools: StaticToolExecutor,
    ) -> PersonaTurnRunner<ScriptedGateway, StaticToolExecutor> {
        PersonaTurnRunner::new(Arc::new(gateway), Arc::new(tools), SessionDefaults::default())
    }

    fn persona(name: &str) -> PersonaDefinition {
        PersonaDefinition::new(name, "You argue.")
    }

    #[tokio::test]
    async fn test_plain_text_turn() {
        let gateway = ScriptedGateway::new();
        gateway.script("gpt-4.1", LlmResponse::from_text("my position"));

        let runner = runner(gateway, StaticToolExecutor::default());
        let contribution = runner
            .run(persona("Optimist"), "why?".into(), None, 1)
            .await;

        assert_eq!(contribution.status, ContributionStatus::Ok);
        assert_eq!(contribution.content, "my position");
        assert!(contribution.tool_invocations.is_empty());
    }

    #[tokio::test]
    async fn test_persona_overrides_take_precedence() {
        let gateway = ScriptedGateway::new();
        gateway.script("claude-sonnet-4", LlmResponse::from_text("ok"));

        let runner = runner(gateway, StaticToolExecutor::default());
        let mut persona = persona("Pessimist").with_model(Model::new("claude-sonnet-4"));
        persona.temperature = Some(0.1);
        let contribution = runner.run(persona, "why?".into(), None, 1).await;
        assert!(contribution.is_ok());

        let requests = runner.gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model.as_str(), "claude-sonnet-4");
        assert_eq!(requests[0].temperature, 0.1);
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let gateway = ScriptedGateway::new();
        gateway.script(
            "gpt-4.1",
            LlmResponse {
                content: vec![ContentBlock::ToolUse {
                    id: "call_1".into(),
                    name: "read_file".into(),
                    input: HashMap::from([("path".to_string(), "notes.md".into())]),
                }],
                stop_reason: Some(StopReason::ToolUse),
            },
        );
        gateway.script("gpt-4.1", LlmResponse::from_text("based on the file: yes"));

        let tools = StaticToolExecutor::with_tool(
            "read_file",
            ToolResult::success("read_file", "file body"),
        );

        let runner = runner(gateway, tools);
        let persona = persona("Researcher").with_tools(["read_file"]);
        let contribution = runner.run(persona, "why?".into(), None, 1).await;

        assert_eq!(contribution.status, ContributionStatus::Ok);
        assert_eq!(contribution.content, "based on the file: yes");
        assert_eq!(contribution.tool_invocations.len(), 1);
        assert!(contribution.tool_invocations[0].success);

        // Tool reply was threaded back into the conversation
        let requests = runner.gateway.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1]
            .messages
            .iter()
            .any(|m| m.tool_call_id.as_deref() == Some("call_1")));
    }

    #[tokio::test]
    async fn test_disallowed_tool_is_refused_without_executing() {
        let gateway = ScriptedGateway::new();
        gateway.script(
            "gpt-4.1",
            LlmResponse {
                content: vec![ContentBlock::ToolUse {
                    id: "call_1".into(),
                    name: "spawn".into(),
                    input: HashMap::new(),
                }],
                stop_reason: Some(StopReason::ToolUse),
            },
        );
        gateway.script("gpt-4.1", LlmResponse::from_text("fine, no tools"));

        let tools = StaticToolExecutor::with_tool("spawn", ToolResult::success("spawn", "spawned"));
        let runner = runner(gateway, tools);

        // "spawn" is on the block list even when configured
        let persona = persona("Rogue").with_tools(["spawn"]);
        let contribution = runner.run(persona, "why?".into(), None, 1).await;

        assert!(contribution.is_ok());
        assert!(runner.tools.executed().is_empty());
        assert_eq!(contribution.tool_invocations.len(), 1);
        assert!(!contribution.tool_invocations[0].success);
    }

    #[tokio::test]
    async fn test_gateway_error_becomes_failed_contribution() {
        let gateway = ScriptedGateway::new();
        gateway.script_err(
            "gpt-4.1",
            GatewayError::RequestFailed("500 from provider".into()),
        );

        let runner = runner(gateway, StaticToolExecutor::default());
        let contribution = runner.run(persona("Optimist"), "why?".into(), None, 1).await;

        assert_eq!(contribution.status, ContributionStatus::Failed);
        assert!(contribution.content.contains("500 from provider"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_gateway_becomes_timeout_contribution() {
        let gateway = ScriptedGateway::new().with_delay("gpt-4.1", Duration::from_secs(600));
        gateway.script("gpt-4.1", LlmResponse::from_text("too late"));

        let runner = runner(gateway, StaticToolExecutor::default());
        let contribution = runner.run(persona("Sloth"), "why?".into(), None, 1).await;

        assert_eq!(contribution.status, ContributionStatus::Timeout);
    }

    #[tokio::test]
    async fn test_tool_loop_exhaustion_fails() {
        let gateway = ScriptedGateway::new();
        // Scripted to ask for a tool on every turn, forever
        for i in 0..SessionDefaults::default().max_tool_turns {
            gateway.script(
                "gpt-4.1",
                LlmResponse {
                    content: vec![ContentBlock::ToolUse {
                        id: format!("call_{i}"),
                        name: "read_file".into(),
                        input: HashMap::new(),
                    }],
                    stop_reason: Some(StopReason::ToolUse),
                },
            );
        }

        let tools = StaticToolExecutor::with_tool(
            "read_file",
            ToolResult::success("read_file", "body"),
        );
        let runner = runner(gateway, tools);
        let persona = persona("Looper").with_tools(["read_file"]);
        let contribution = runner.run(persona, "why?".into(), None, 1).await;

        assert_eq!(contribution.status, ContributionStatus::Failed);
        assert!(contribution.content.contains("did not produce a final answer"));
    }
}
