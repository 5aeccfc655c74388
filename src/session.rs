use crate::assistant::{ AssistantError, ExecutiveAssistant };
use crate::config::lang::{ texts, Language };
use crate::data::DataProvider;
use crate::models::chat::{ ChatMessage, Conversation };
use log::{ info, warn };
use uuid::Uuid;

/// What a failed exchange leaves behind in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Append an `AI Error: ...` assistant message.
    Placeholder,
    /// Leave the conversation as is; the caller shows the error.
    Surface,
}

/// One user's conversation and language choice. Owned by whichever front
/// end is serving that user and handed to the assistant on each question.
#[derive(Debug, Clone)]
pub struct Session {
    conversation: Conversation,
    lang: Language,
}

impl Session {
    pub fn new(lang: Language) -> Self {
        Self {
            conversation: Conversation::new(Uuid::new_v4().to_string()),
            lang,
        }
    }

    pub fn id(&self) -> &str {
        &self.conversation.id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    pub fn clear(&mut self) {
        info!("Clearing conversation {} ({} messages)", self.conversation.id, self.conversation.len());
        self.conversation.clear();
    }

    /// Records `question`, asks the assistant with a fresh snapshot and
    /// records the reply. On failure the question stays in place and
    /// `on_failure` decides whether a placeholder is recorded.
    pub async fn submit(
        &mut self,
        assistant: &ExecutiveAssistant,
        data: &dyn DataProvider,
        question: &str,
        on_failure: FailureMode
    ) -> Result<String, AssistantError> {
        self.conversation.append(ChatMessage::user(question))?;

        let outcome = match data.snapshot() {
            Ok(snapshot) => assistant.ask(self.conversation.all(), &snapshot, self.lang).await,
            Err(e) => Err(AssistantError::Data(e)),
        };

        match outcome {
            Ok(reply) => {
                self.conversation.append(ChatMessage::assistant(reply.clone()))?;
                Ok(reply)
            }
            Err(e) => {
                warn!("Exchange failed in conversation {}: {}", self.conversation.id, e);
                if on_failure == FailureMode::Placeholder {
                    self.conversation.append(ChatMessage::error_placeholder(&e))?;
                }
                Err(e)
            }
        }
    }

    /// Submits the localized quick question at `index`. Failures are
    /// recorded as placeholders.
    pub async fn quick(
        &mut self,
        assistant: &ExecutiveAssistant,
        data: &dyn DataProvider,
        index: usize
    ) -> Result<String, AssistantError> {
        let question = *texts(self.lang).quick_questions
            .get(index)
            .ok_or(AssistantError::UnknownQuickQuestion(index))?;
        self.submit(assistant, data, question, FailureMode::Placeholder).await
    }
}
