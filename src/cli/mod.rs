use clap::{ Parser, ValueEnum };
use thiserror::Error;
use crate::config::lang::Language;
use crate::llm::chat::GenerationParams;
use crate::llm::{ LlmConfig, LlmType };

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Interactive terminal session
    Repl,
    /// WebSocket server, one conversation per connection
    Serve,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (openai, ollama)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "openai")]
    pub chat_llm_type: String,

    /// Base URL for the Chat LLM provider API (e.g., https://api.openai.com or http://localhost:11434)
    #[arg(long, env = "CHAT_BASE_URL")] // No default, let adapters handle defaults if None
    pub chat_base_url: Option<String>,

    /// API Key for the Chat LLM provider. Required for openai.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub chat_api_key: String,

    /// Model name for chat completion
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4o-mini")]
    pub chat_model: String,

    /// Sampling temperature. Low values keep answers focused.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.4")]
    pub chat_temperature: f32,

    /// Maximum number of tokens in one reply.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value = "600")]
    pub chat_max_tokens: u32,

    // --- Session Args ---
    /// Display and answer language (English, Arabic)
    #[arg(long, env = "APP_LANG", default_value = "English")]
    pub lang: Language,

    /// Optional JSON file holding the business snapshot. Built-in demo data is used when unset.
    #[arg(long, env = "DATA_PATH")]
    pub data_path: Option<String>,

    /// How to serve the assistant.
    #[arg(long, env = "APP_MODE", value_enum, default_value = "repl")]
    pub mode: Mode,

    // --- Server Args ---
    /// Host address and port for the WebSocket server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Port for the HTTP dashboard API. Disabled when unset.
    #[arg(long, env = "HTTP_PORT")]
    pub http_port: Option<u16>,

    /// Optional path to the TLS certificate file (PEM format) for enabling WSS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling WSS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    InvalidLlmType(#[from] crate::llm::ParseLlmTypeError),
    #[error("OpenAI API key not found. Set OPENAI_API_KEY in the environment or .env file.")]
    MissingApiKey,
    #[error("temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),
    #[error("max tokens must be greater than zero")]
    InvalidMaxTokens,
}

impl Args {
    /// Startup checks. Any error here stops the process before a session starts.
    pub fn llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let llm_type: LlmType = self.chat_llm_type.parse()?;
        let api_key = Some(self.chat_api_key.trim().to_string()).filter(|k| !k.is_empty());
        if llm_type.requires_api_key() && api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(LlmConfig {
            llm_type,
            api_key,
            completion_model: Some(self.chat_model.clone()).filter(|m| !m.trim().is_empty()),
            base_url: self.chat_base_url.clone(),
        })
    }

    pub fn generation_params(&self) -> Result<GenerationParams, ConfigError> {
        if !(0.0..=2.0).contains(&self.chat_temperature) {
            return Err(ConfigError::InvalidTemperature(self.chat_temperature));
        }
        if self.chat_max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        Ok(GenerationParams {
            temperature: self.chat_temperature,
            max_tokens: self.chat_max_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["ceo-assistant"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_missing_key_is_fatal_for_openai() {
        let args = parse(&["--chat-llm-type", "openai", "--chat-api-key", "  "]);
        assert!(matches!(args.llm_config(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let args = parse(&["--chat-llm-type", "ollama", "--chat-api-key", ""]);
        let config = args.llm_config().unwrap();
        assert_eq!(config.llm_type, LlmType::Ollama);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_defaults_match_assistant_settings() {
        let args = parse(&["--chat-api-key", "sk-test"]);
        assert_eq!(args.lang, Language::English);
        assert_eq!(args.mode, Mode::Repl);
        assert_eq!(args.generation_params().unwrap(), GenerationParams::default());
        assert_eq!(args.llm_config().unwrap().completion_model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_language_and_mode_flags() {
        let args = parse(&["--chat-api-key", "k", "--lang", "arabic", "--mode", "serve"]);
        assert_eq!(args.lang, Language::Arabic);
        assert_eq!(args.mode, Mode::Serve);
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let args = parse(&["--chat-api-key", "k", "--chat-temperature", "3.5"]);
        assert!(matches!(args.generation_params(), Err(ConfigError::InvalidTemperature(_))));
    }
}
