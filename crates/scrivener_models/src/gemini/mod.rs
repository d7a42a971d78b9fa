//! Gemini streaming provider.

mod client;
mod config;

pub use client::GeminiClient;
pub use config::{GeminiConfig, GeminiConfigBuilder};
