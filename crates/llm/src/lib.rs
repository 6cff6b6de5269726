//! Generative text backend integration
//!
//! The rest of the workspace talks to the text-generation backend through
//! the `TextGenerator` trait: one prompt in, one text out, no guaranteed
//! latency (callers impose their own deadlines). The bundled backend speaks
//! the OpenAI-compatible chat completions API with bounded retries.

pub mod backend;
pub mod json;

pub use backend::{GeneratorConfig, OpenAiBackend, TextGenerator};
pub use json::extract_json_object;

use thiserror::Error;

/// Generation errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for waypoint_core::Error {
    fn from(err: LlmError) -> Self {
        waypoint_core::Error::Generation(err.to_string())
    }
}
