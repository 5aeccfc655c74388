pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use std::sync::Arc;
use super::{ LlmConfig, LlmError, LlmType };
use self::ollama::OllamaClient;
use self::openai::OpenAIChatClient;
use crate::models::chat::ChatMessage;

pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_MAX_TOKENS: u32 = 600;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// Fixed sampling settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Role/content pair as both supported chat APIs expect it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role().as_str().to_string(),
            content: msg.content().to_string(),
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the whole message list as one request and returns the first reply.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams
    ) -> Result<CompletionResponse, LlmError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::Ollama => {
            let specific_client = OllamaClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

/// Reads a response body, turning non-success statuses into classified errors.
pub(crate) async fn read_success_body(resp: reqwest::Response) -> Result<String, LlmError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(LlmError::from_status(status.as_u16(), &body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_requires_openai_key() {
        let config = LlmConfig { llm_type: LlmType::OpenAI, ..Default::default() };
        let err = new_client(&config).err().unwrap();
        assert!(matches!(err, LlmError::Config(_)));
    }

    #[test]
    fn test_new_client_ollama_defaults() {
        let config = LlmConfig { llm_type: LlmType::Ollama, ..Default::default() };
        let client = new_client(&config).unwrap();
        assert_eq!(client.get_base_url().as_deref(), Some("http://localhost:11434"));
    }

    #[test]
    fn test_wire_message_from_chat_message() {
        let wire = WireMessage::from(&ChatMessage::user("hello"));
        assert_eq!(wire, WireMessage { role: "user".into(), content: "hello".into() });
    }
}
