use serde::{ Serialize, Deserialize };
use crate::config::lang::Language;
use crate::models::chat::ChatMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "chat")] Chat {
        content: String,
    },
    #[serde(rename = "quick")] Quick {
        index: usize,
    },
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "history")]
    History,
    #[serde(rename = "language")] SetLanguage {
        lang: Language,
    },
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "response")] Response {
        content: String,
        timestamp: i64,
    },
    #[serde(rename = "error")] Error {
        message: String,
    },
    #[serde(rename = "processing")]
    Processing,
    #[serde(rename = "history")] History {
        messages: Vec<ChatMessage>,
    },
    #[serde(rename = "cleared")]
    Cleared,
    #[serde(rename = "language")] Language {
        lang: Language,
    },
}
