//! ToneyBot: a music-theory chat assistant backed by an OpenAI-compatible
//! chat API and a small set of deterministic theory tools.

pub mod commands;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod puns;
pub mod rchain;
pub mod registry;
pub mod session;
pub mod theory;

#[cfg(test)]
pub(crate) mod testing;
