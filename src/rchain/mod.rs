//! Lightweight LLM integration helpers.
//!
//! Typed wrappers for chat messages, tool schemas and the OpenAI
//! chat-completions client used by the conversation loop.

/// Assistant reply structures.
pub mod ai;
/// Chat model trait and message types.
pub mod chat_models;
/// OpenAI chat-completions client.
pub mod openai;
/// Endpoint defaults and provider errors.
pub mod provider;
/// Tool schema and invocation payload helpers.
pub mod tools;
