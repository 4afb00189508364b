use super::dispatcher::dispatch_tool_calls;
use super::errors::AgentError;
use super::extractor::extract_tool_calls;
use super::models::{TurnOutcome, TurnPhase, TurnSettings};
use super::prompt::PromptBuilder;
use crate::application::tooling::ToolSession;
use crate::model::{ModelProvider, ModelRequest};
use crate::types::{ChatMessage, ToolDescriptor};
use std::sync::Arc;
use tracing::{debug, info};

/// Drives one query through propose, dispatch and resolve.
///
/// Every turn starts from a fresh message list; nothing carries over between
/// queries except the cached tool catalogue.
pub struct TurnController<P: ModelProvider> {
    provider: P,
    session: Arc<dyn ToolSession>,
    prompts: PromptBuilder,
    settings: TurnSettings,
    tools: Vec<ToolDescriptor>,
    /// Set by a catalogue-change notice, cleared only by a successful reload.
    catalog_stale: bool,
}

impl<P: ModelProvider> TurnController<P> {
    pub fn new(
        provider: P,
        session: Arc<dyn ToolSession>,
        prompts: PromptBuilder,
        settings: TurnSettings,
    ) -> Self {
        Self {
            provider,
            session,
            prompts,
            settings,
            tools: Vec::new(),
            catalog_stale: false,
        }
    }

    /// Builds a controller and reads the initial tool catalogue.
    pub async fn connect(
        provider: P,
        session: Arc<dyn ToolSession>,
        prompts: PromptBuilder,
        settings: TurnSettings,
    ) -> Result<Self, AgentError> {
        let mut controller = Self::new(provider, session, prompts, settings);
        controller.refresh_tools().await?;
        Ok(controller)
    }

    pub async fn refresh_tools(&mut self) -> Result<(), AgentError> {
        let tools = self
            .session
            .list_tools()
            .await
            .map_err(AgentError::Catalog)?;
        info!(count = tools.len(), "Tool catalogue loaded");
        self.tools = tools;
        self.catalog_stale = false;
        Ok(())
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn settings(&self) -> &TurnSettings {
        &self.settings
    }

    pub async fn run_turn(&mut self, query: &str) -> Result<TurnOutcome, AgentError> {
        // The session flag is one-shot; a failed reload must not lose it.
        self.catalog_stale |= self.session.take_catalog_changed();
        if self.catalog_stale || self.settings.refresh_tools_each_turn {
            debug!(stale = self.catalog_stale, "Refreshing tool catalogue before turn");
            self.refresh_tools().await?;
        }

        let prompt = self.prompts.build(&self.tools, query);
        let mut messages = vec![
            ChatMessage::system(prompt.system),
            ChatMessage::user(prompt.task),
        ];

        let proposal = self.complete(&messages).await?;
        let calls = extract_tool_calls(&proposal)?;

        if calls.is_empty() {
            debug!("Model answered without tool calls");
            let answer = if self.settings.lowercase_response {
                proposal.to_lowercase()
            } else {
                proposal
            };
            return Ok(TurnOutcome::direct(answer));
        }

        info!(count = calls.len(), "Model proposed tool calls");
        messages.push(ChatMessage::assistant(proposal));

        let results = dispatch_tool_calls(self.session.as_ref(), &calls).await?;
        messages.push(ChatMessage::user(self.prompts.result_prompt(query, &results)));

        let answer = self.complete(&messages).await?;
        Ok(TurnOutcome {
            answer,
            phase: TurnPhase::Resolve,
            tool_calls: calls,
            tool_results: results,
        })
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AgentError> {
        let request = ModelRequest {
            provider: self.settings.provider.clone(),
            model: self.settings.model.clone(),
            messages: messages.to_vec(),
            max_tokens: self.settings.max_tokens,
        };
        debug!(messages = messages.len(), model = %request.model, "Requesting completion");
        let response = self.provider.chat(request).await?;
        Ok(response.into_content())
    }
}
