use crate::llm_adapter::LlmAdapter;
use crate::types::{ConversationMessage, Result, Role, SummarizerError};
use std::sync::Arc;
use tracing::{debug, info};

pub const SUMMARIZER_INSTRUCTION: &str = "You are the Cloud Solution Architect. \
Please categorize papers after seeing their abstracts printed and create a JSON list \
with Domain, Title, Authors, Summary and Link.";

/// Message log of a single driver/summarizer exchange.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ConversationMessage::new(role, content));
    }

    /// First message stored by the summarizer, if it replied at all.
    pub fn first_reply(&self) -> Option<&ConversationMessage> {
        self.messages.iter().find(|m| m.role == Role::Summarizer)
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }
}

/// Runs exactly one turn: the driver sends the feed, the summarizer answers
/// once and the conversation ends.
pub struct Summarizer {
    adapter: Arc<dyn LlmAdapter>,
    instruction: String,
}

impl Summarizer {
    pub fn new(adapter: Arc<dyn LlmAdapter>) -> Self {
        Self::with_instruction(adapter, SUMMARIZER_INSTRUCTION)
    }

    pub fn with_instruction(adapter: Arc<dyn LlmAdapter>, instruction: impl Into<String>) -> Self {
        Self {
            adapter,
            instruction: instruction.into(),
        }
    }

    pub fn adapter_name(&self) -> String {
        self.adapter.adapter_name()
    }

    pub async fn converse(&self, feed_xml: &str) -> Result<Conversation> {
        let mut conversation = Conversation::new();
        conversation.record(Role::Driver, feed_xml);

        debug!("Driver sent {} bytes to {}", feed_xml.len(), self.adapter.adapter_name());
        if let Some(reply) = self.adapter.compose_summary(feed_xml, &self.instruction).await? {
            conversation.record(Role::Summarizer, reply);
        }

        Ok(conversation)
    }

    pub async fn summarize(&self, feed_xml: &str) -> Result<String> {
        let conversation = self.converse(feed_xml).await?;
        let reply = conversation
            .first_reply()
            .ok_or(SummarizerError::SummaryMissing)?;

        info!("Summarizer replied with {} bytes", reply.content.len());
        Ok(reply.content.clone())
    }
}
