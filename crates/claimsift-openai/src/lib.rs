//! # claimsift-openai: OpenAI-compatible backends
//!
//! Production implementations of the claimsift capability traits:
//! Whisper-style audio transcription and forced-function chat completion,
//! against `api.openai.com` or any API-compatible endpoint.

pub mod completion;
pub mod transcription;

pub use completion::OpenAiCompletion;
pub use transcription::OpenAiTranscription;

use claimsift_core::{SiftError, SiftResult};

/// Read the API key from the environment: `OPENAI_API_KEY`, with
/// `CLAIMSIFT_API_KEY` as a fallback.
pub fn api_key_from_env() -> SiftResult<String> {
    let key = std::env::var("OPENAI_API_KEY")
        .or_else(|_| std::env::var("CLAIMSIFT_API_KEY"))
        .map_err(|_| {
            SiftError::Config(
                "the OpenAI-compatible API requires OPENAI_API_KEY or CLAIMSIFT_API_KEY"
                    .to_string(),
            )
        })?;
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(SiftError::Config("API key is set but empty".to_string()));
    }
    Ok(key)
}
