use crate::config::lang::Language;
use crate::config::prompt;
use crate::data::DataError;
use crate::llm::chat::{ ChatClient, GenerationParams };
use crate::llm::LlmError;
use crate::models::chat::{ ChatMessage, ConversationError, Role };
use crate::models::snapshot::BusinessSnapshot;

use log::{ debug, error, info };
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("there is no question to answer")]
    EmptyConversation,
    #[error("the last message must be a user question, found a {0} message")]
    NotAwaitingAnswer(Role),
    #[error("unknown quick question #{0}")]
    UnknownQuickQuestion(usize),
    #[error("business data unavailable: {0}")]
    Data(#[from] DataError),
    #[error(transparent)]
    Remote(#[from] LlmError),
    #[error(transparent)]
    Conversation(#[from] ConversationError),
}

/// Turns a conversation plus a business snapshot into one completion request.
///
/// Holds no session state: the conversation and snapshot are passed in on
/// every call, so the client can be shared between sessions.
#[derive(Clone)]
pub struct ExecutiveAssistant {
    chat_client: Arc<dyn ChatClient>,
    params: GenerationParams,
}

impl ExecutiveAssistant {
    pub fn new(chat_client: Arc<dyn ChatClient>, params: GenerationParams) -> Self {
        Self { chat_client, params }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn model(&self) -> String {
        self.chat_client.get_model()
    }

    /// The exact message list `ask` would send: the system instruction
    /// followed by the conversation. Error placeholders are left out.
    pub fn build_request(
        conversation: &[ChatMessage],
        snapshot: &BusinessSnapshot,
        lang: Language
    ) -> Result<Vec<ChatMessage>, AssistantError> {
        let last = conversation.last().ok_or(AssistantError::EmptyConversation)?;
        if last.role() != Role::User {
            return Err(AssistantError::NotAwaitingAnswer(last.role()));
        }

        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(prompt::get_executive_system_prompt(snapshot, lang)));
        messages.extend(
            conversation
                .iter()
                .filter(|m| !m.is_error_placeholder())
                .cloned()
        );
        Ok(messages)
    }

    /// Answers the trailing user question. Exactly one remote call, no retries.
    pub async fn ask(
        &self,
        conversation: &[ChatMessage],
        snapshot: &BusinessSnapshot,
        lang: Language
    ) -> Result<String, AssistantError> {
        let messages = Self::build_request(conversation, snapshot, lang)?;
        debug!(
            "Sending {} messages ({} chars of instruction) to model {}",
            messages.len(),
            messages[0].content().len(),
            self.chat_client.get_model()
        );

        match self.chat_client.complete(&messages, &self.params).await {
            Ok(resp) if resp.response.trim().is_empty() => {
                error!("Model {} returned an empty reply", self.chat_client.get_model());
                Err(AssistantError::Remote(LlmError::MalformedResponse("empty reply from model".to_string())))
            }
            Ok(resp) => {
                info!("Assistant replied with {} chars", resp.response.len());
                Ok(resp.response)
            }
            Err(e) => {
                error!("Completion request failed: {}", e);
                Err(AssistantError::Remote(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm::chat::CompletionResponse;
    use crate::models::snapshot::{ EmployeeData, FinancialData, RevenueTrend, TrendPoint };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers from a fixed script.
    pub(crate) struct ScriptedClient {
        pub requests: Mutex<Vec<Vec<ChatMessage>>>,
        pub params: Mutex<Vec<GenerationParams>>,
        replies: Mutex<Vec<Result<String, u16>>>,
    }

    impl ScriptedClient {
        /// `Err(status)` replies become `LlmError::from_status(status, ..)`.
        pub(crate) fn new(replies: Vec<Result<String, u16>>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                params: Mutex::new(Vec::new()),
                replies: Mutex::new(replies),
            })
        }

        pub(crate) fn last_request(&self) -> Vec<ChatMessage> {
            self.requests.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            params: &GenerationParams
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(messages.to_vec());
            self.params.lock().unwrap().push(*params);
            let next = self.replies.lock().unwrap().remove(0);
            match next {
                Ok(response) => Ok(CompletionResponse { response }),
                Err(status) => Err(LlmError::from_status(status, "scripted failure")),
            }
        }

        fn get_model(&self) -> String {
            "scripted".to_string()
        }

        fn get_base_url(&self) -> Option<String> {
            None
        }
    }

    pub(crate) fn small_snapshot() -> BusinessSnapshot {
        BusinessSnapshot {
            financial: FinancialData {
                revenue: 500.0,
                expenses: 300.0,
                profit: 200.0,
                profit_margin: 40.0,
            },
            employees: EmployeeData {
                total_employees: 120,
                active_employees: 111,
                attrition_rate: 7.5,
                engagement_score: 72.0,
                avg_tenure: 3.1,
            },
            revenue_trend: RevenueTrend(
                vec![
                    TrendPoint { month: "Jan".into(), revenue: 230.0 },
                    TrendPoint { month: "Feb".into(), revenue: 270.0 }
                ]
            ),
            ceo_summary: "Solid start to the year.".into(),
        }
    }

    fn joined(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| m.content())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_profit_margin_scenario() {
        let client = ScriptedClient::new(vec![Ok("Margin is 40%.".into())]);
        let assistant = ExecutiveAssistant::new(client.clone(), GenerationParams::default());
        let conversation = vec![ChatMessage::user("What is our profit margin?")];

        let reply = assistant
            .ask(&conversation, &small_snapshot(), Language::English).await
            .unwrap();
        assert_eq!(reply, "Margin is 40%.");

        let sent = client.last_request();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].role(), Role::System);
        assert_eq!(sent[1].content(), "What is our profit margin?");
        let text = joined(&sent);
        assert!(text.contains("40"));
        assert!(text.contains("English"));
        assert_eq!(client.params.lock().unwrap()[0], GenerationParams::default());
    }

    #[tokio::test]
    async fn test_request_contains_every_snapshot_value() {
        let client = ScriptedClient::new(vec![Ok("ok".into())]);
        let assistant = ExecutiveAssistant::new(client.clone(), GenerationParams::default());
        let snapshot = small_snapshot();

        assistant.ask(&[ChatMessage::user("Overview?")], &snapshot, Language::Arabic).await.unwrap();

        let instruction = client.last_request()[0].content().to_string();
        for needle in [
            "500", "300", "200", "40", "120", "111", "7.5", "72", "3.1", "Jan: 230", "Feb: 270",
        ] {
            assert!(instruction.contains(needle), "missing {}", needle);
        }
        assert!(instruction.contains("Respond in Arabic."));
    }

    #[test]
    fn test_build_request_rejects_empty_conversation() {
        let err = ExecutiveAssistant::build_request(
            &[],
            &small_snapshot(),
            Language::English
        ).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyConversation));
    }

    #[test]
    fn test_build_request_requires_trailing_user_message() {
        let conversation = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        let err = ExecutiveAssistant::build_request(
            &conversation,
            &small_snapshot(),
            Language::English
        ).unwrap_err();
        assert!(matches!(err, AssistantError::NotAwaitingAnswer(Role::Assistant)));
    }

    #[test]
    fn test_build_request_skips_error_placeholders() {
        let conversation = vec![
            ChatMessage::user("first"),
            ChatMessage::error_placeholder("network error"),
            ChatMessage::user("second")
        ];
        let request = ExecutiveAssistant::build_request(
            &conversation,
            &small_snapshot(),
            Language::English
        ).unwrap();
        let contents: Vec<&str> = request[1..]
            .iter()
            .map(|m| m.content())
            .collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[tokio::test]
    async fn test_remote_failure_is_returned_as_value() {
        let client = ScriptedClient::new(vec![Err(401)]);
        let assistant = ExecutiveAssistant::new(client.clone(), GenerationParams::default());

        let err = assistant
            .ask(&[ChatMessage::user("q")], &small_snapshot(), Language::English).await
            .unwrap_err();
        assert!(matches!(err, AssistantError::Remote(LlmError::Unauthorized { status: 401, .. })));
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_conversation_makes_no_call() {
        let client = ScriptedClient::new(vec![]);
        let assistant = ExecutiveAssistant::new(client.clone(), GenerationParams::default());

        assert!(assistant.ask(&[], &small_snapshot(), Language::English).await.is_err());
        assert!(client.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_reply_is_malformed() {
        let client = ScriptedClient::new(vec![Ok("  \n ".into())]);
        let assistant = ExecutiveAssistant::new(client.clone(), GenerationParams::default());

        let err = assistant
            .ask(&[ChatMessage::user("Anything?")], &small_snapshot(), Language::English).await
            .unwrap_err();
        assert!(matches!(err, AssistantError::Remote(LlmError::MalformedResponse(_))));
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }
}
