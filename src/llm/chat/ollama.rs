use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use async_trait::async_trait;
use super::{ read_success_body, ChatClient, CompletionResponse, GenerationParams, WireMessage };
use crate::llm::{ LlmConfig, LlmError, LlmType };
use crate::models::chat::ChatMessage;
use log::debug;

#[derive(Debug)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
    completion_model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: WireMessage,
}

impl OllamaClient {
    pub fn new(base_url: Option<String>, completion_model: Option<String>) -> Self {
        let model = completion_model.unwrap_or_else(|| "llama3.1".to_string());
        let url = base_url.unwrap_or_else(|| "http://localhost:11434".into());

        Self {
            http: HttpClient::new(),
            base_url: url,
            completion_model: model,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if config.llm_type != LlmType::Ollama {
            return Err(LlmError::Config("Invalid config type for OllamaClient".into()));
        }

        Ok(Self::new(config.base_url.clone(), config.completion_model.clone()))
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams
    ) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let req = ChatRequest {
            model: self.completion_model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            stream: false,
            options: ChatOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        };
        debug!("POST {} ({} messages, model {})", url, req.messages.len(), req.model);

        let resp = self.http.post(&url).json(&req).send().await?;
        let body = read_success_body(resp).await?;
        let data: ChatResponse = serde_json
            ::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        Ok(CompletionResponse { response: data.message.content })
    }

    fn get_model(&self) -> String {
        self.completion_model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_complete_posts_non_streaming_chat() {
        let server = MockServer::start_async().await;
        let mock = server.mock_async(|when, then| {
            when.method(POST)
                .path("/api/chat")
                .json_body(
                    serde_json::json!({
                    "model": "llama3.1",
                    "messages": [{"role": "user", "content": "margin?"}],
                    "stream": false,
                    "options": {"temperature": 0.4, "num_predict": 600}
                })
                );
            then.status(200).json_body(
                serde_json::json!({
                    "model": "llama3.1",
                    "message": {"role": "assistant", "content": "29.3%"},
                    "done": true
                })
            );
        }).await;

        let client = OllamaClient::new(Some(server.base_url()), None);
        let resp = client
            .complete(&[ChatMessage::user("margin?")], &GenerationParams::default()).await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.response, "29.3%");
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).body("not json");
        }).await;

        let client = OllamaClient::new(Some(server.base_url()), None);
        let err = client
            .complete(&[ChatMessage::user("x")], &GenerationParams::default()).await
            .unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }
}
