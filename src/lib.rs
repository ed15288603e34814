pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod message;
pub mod models;
pub mod response;
pub mod server;
pub mod tools;
