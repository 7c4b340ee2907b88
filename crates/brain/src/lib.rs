//! The Lifeline Brain: AI-assisted question answering with a scripted
//! fallback path.
//!
//! The brain picks one chat provider from an ordered configuration table at
//! startup and answers free-text questions through it. When the provider
//! call fails for any reason the question is classified against a fixed
//! keyword rule table and answered with a canned response instead — a caller
//! asking for help never sees a raw provider error, only an answer tagged
//! with its origin (`ai` or `fallback`).

pub mod brain;
pub mod client;
pub mod config;
pub mod fallback;
pub mod openai;

pub use brain::{Answer, AnswerOrigin, Brain};
pub use client::{ChatClient, ChatMessage, ChatRequest, ChatResponse, Role};
pub use config::{select_provider, ActiveProvider, BrainConfig, ProviderConfig};
pub use fallback::{classify, FallbackCategory};
pub use openai::OpenAiCompatClient;
