use super::{App, Completion, InputMode};
use crate::api::ChatReply;
use crate::error::FetchResult;
use std::sync::Arc;

const CHAT_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryView {
    pub term: String,
    pub text: String,
    pub loading: bool,
}

impl App {
    pub fn start_glossary(&mut self) {
        self.input_mode = InputMode::Glossary;
        self.input_buffer.clear();
    }

    pub fn confirm_glossary(&mut self) {
        let term = std::mem::take(&mut self.input_buffer);
        self.lookup_term(&term);
    }

    pub fn lookup_term(&mut self, term: &str) -> bool {
        let term = term.trim().to_string();
        if term.is_empty() {
            return false;
        }
        self.glossary = Some(GlossaryView {
            term: term.clone(),
            text: "Looking up...".to_string(),
            loading: true,
        });
        let assistant = Arc::clone(&self.assistant);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = assistant.lookup_term(&term).await;
            let _ = tx.send(Completion::Glossary { term, result });
        });
        true
    }

    pub(crate) fn apply_glossary(&mut self, term: String, result: FetchResult<String>) {
        // A newer lookup owns the panel.
        if self.glossary.as_ref().is_some_and(|g| g.term != term) {
            return;
        }
        let text = match result {
            Ok(definition) if definition.trim().is_empty() => "Definition not found.".to_string(),
            Ok(definition) => definition,
            Err(e) => {
                tracing::warn!(%term, error = %e, "glossary lookup failed");
                "Error fetching definition".to_string()
            }
        };
        self.glossary = Some(GlossaryView {
            term,
            text,
            loading: false,
        });
    }

    pub fn start_chat(&mut self) {
        self.input_mode = InputMode::Chat;
        self.input_buffer.clear();
    }

    /// Send the input line to the assistant. The chat stays open.
    pub fn submit_chat(&mut self) -> bool {
        let message = std::mem::take(&mut self.input_buffer).trim().to_string();
        if message.is_empty() {
            return false;
        }
        self.push_chat(Speaker::User, message.clone());
        let assistant = Arc::clone(&self.assistant);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = assistant.chat(&message).await;
            let _ = tx.send(Completion::Chat { result });
        });
        true
    }

    pub(crate) fn apply_chat(&mut self, result: FetchResult<ChatReply>) {
        match result {
            Ok(reply) => {
                self.push_chat(Speaker::Assistant, reply.response);
                self.push_chat(Speaker::System, reply.sentiment.summary());
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                let text = if e.is_network() {
                    format!("Failed to reach the assistant ({}). Is the backend running?", e)
                } else {
                    format!("The assistant could not answer: {}", e)
                };
                self.push_chat(Speaker::System, text);
            }
        }
    }

    fn push_chat(&mut self, speaker: Speaker, text: String) {
        self.chat_log.push(ChatLine { speaker, text });
        if self.chat_log.len() > CHAT_HISTORY {
            let excess = self.chat_log.len() - CHAT_HISTORY;
            self.chat_log.drain(..excess);
        }
    }
}
