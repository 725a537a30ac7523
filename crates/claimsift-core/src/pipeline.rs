//! Review pipeline for one recorded call: validate the checklist, then
//! transcribe, flatten, and extract, strictly in that order.

use tracing::info;

use crate::backend::{CompletionBackend, TranscriptionBackend};
use crate::error::SiftResult;
use crate::extract::{extract, ExtractionResult};
use crate::questions::QuestionSet;
use crate::schema::ResponseContract;
use crate::transcript::flatten_transcript;

/// Sequential driver for a single (recording, question set) review. Holds no
/// state between requests; every run is independent.
pub struct ReviewPipeline<'a> {
    transcription: &'a dyn TranscriptionBackend,
    completion: &'a dyn CompletionBackend,
}

impl<'a> ReviewPipeline<'a> {
    pub fn new(
        transcription: &'a dyn TranscriptionBackend,
        completion: &'a dyn CompletionBackend,
    ) -> Self {
        Self {
            transcription,
            completion,
        }
    }

    /// Review one call. The contract is built first, so an invalid question
    /// set fails the request before any network traffic.
    pub async fn review(
        &self,
        audio: &[u8],
        file_name: &str,
        questions: &QuestionSet,
    ) -> SiftResult<ExtractionResult> {
        let contract = ResponseContract::build(questions)?;
        info!(fields = contract.len(), "response contract built");

        let segments = self.transcription.transcribe(audio, file_name).await?;
        info!(segments = segments.len(), "call transcribed");

        let transcript = flatten_transcript(&segments);
        extract(self.completion, &transcript, &contract).await
    }
}
