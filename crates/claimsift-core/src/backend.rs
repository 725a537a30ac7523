//! Capability seams for the two external model boundaries.
//!
//! Implement `TranscriptionBackend` for any service that turns call audio
//! into timed segments, and `CompletionBackend` for any chat API that can be
//! forced through a structured function call. The pipeline only ever talks
//! to these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SiftResult;
use crate::schema::ResponseContract;
use crate::transcript::TranscriptSegment;

/// One role-tagged message in the completion prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Backend for converting call audio into ordered transcript segments.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Transcribe one recording. `file_name` names the uploaded part so the
    /// service can infer the container format. An empty segment list is a
    /// valid result for a silent call.
    async fn transcribe(&self, audio: &[u8], file_name: &str)
        -> SiftResult<Vec<TranscriptSegment>>;
}

/// Backend for one forced-contract completion. Returns the raw argument
/// string of the forced function call, unparsed.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        contract: &ResponseContract,
    ) -> SiftResult<String>;
}

/// Placeholder transcription: returns fixed segments. Use for exercising the
/// pipeline without audio files or network access.
#[derive(Debug, Default)]
pub struct PlaceholderTranscription {
    segments: Vec<TranscriptSegment>,
}

impl PlaceholderTranscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segments(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }
}

#[async_trait]
impl TranscriptionBackend for PlaceholderTranscription {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _file_name: &str,
    ) -> SiftResult<Vec<TranscriptSegment>> {
        Ok(self.segments.clone())
    }
}
