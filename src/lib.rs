pub mod assistant;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod llm;
pub mod models;
pub mod repl;
pub mod server;
pub mod session;

use assistant::ExecutiveAssistant;
use cli::{ Args, Mode };
use config::lang::Language;
use data::{ create_data_provider, DataProvider };
use llm::chat::new_client as new_chat_client;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

/// Everything a front end needs to serve sessions. Shared read-only.
pub struct AppContext {
    pub assistant: ExecutiveAssistant,
    pub data: Arc<dyn DataProvider>,
    pub default_lang: Language,
}

impl AppContext {
    /// Validates configuration and builds the chat client. Fails before any
    /// session starts when the credential is missing.
    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let llm_config = args.llm_config()?;
        let params = args.generation_params()?;
        let chat_client = new_chat_client(&llm_config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={:?}",
            llm_config.llm_type,
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );

        Ok(Self {
            assistant: ExecutiveAssistant::new(chat_client, params),
            data: create_data_provider(args),
            default_lang: args.lang,
        })
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Mode: {:?}", args.mode);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model);
    info!("Temperature: {}", args.chat_temperature);
    info!("Max Tokens: {}", args.chat_max_tokens);
    info!("Language: {}", args.lang);
    info!("Data Path: {}", args.data_path.as_deref().unwrap_or("(built-in)"));
    if args.mode == Mode::Serve {
        info!("Server Address: {}", args.server_addr);
        info!("HTTP Port: {:?}", args.http_port);
        info!("TLS Enabled: {}", args.enable_tls);
    }
    info!("-------------------------");

    let ctx = Arc::new(AppContext::from_args(&args)?);

    match args.mode {
        Mode::Repl => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl::run_repl(&ctx, stdin, tokio::io::stdout()).await
        }
        Mode::Serve => {
            let server = Server::new(args.server_addr.clone(), ctx, args.clone());
            server.run().await
        }
    }
}
