pub mod chat;
pub mod snapshot;
pub mod websocket;
