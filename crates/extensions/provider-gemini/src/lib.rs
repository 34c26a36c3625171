//! # Pagequill Provider - Gemini
//!
//! Google Gemini text generation provider for Pagequill.

mod client;
mod provider;
mod types;

pub use client::GeminiClient;
pub use provider::GeminiProvider;
pub use types::*;
