//! Transcription backend for OpenAI-compatible audio APIs.
//!
//! Uploads the recording as multipart form data and requests
//! `verbose_json`, which is the response format that carries per-segment
//! timings alongside the plain text.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use claimsift_core::{SiftError, SiftResult, TranscriptSegment, TranscriptionBackend};

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Verbose transcription payload. Only the segment list matters here; the
/// flattened transcript is rebuilt from it downstream.
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    segments: Option<Vec<VerboseSegment>>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Convert the wire payload into pipeline segments. A payload without a
/// segment list (e.g. a server that ignored `response_format`) is an error,
/// not an empty transcript.
fn into_segments(payload: VerboseTranscription) -> SiftResult<Vec<TranscriptSegment>> {
    let segments = payload.segments.ok_or_else(|| {
        SiftError::Transcription("response carries no segment list".to_string())
    })?;
    Ok(segments
        .into_iter()
        .map(|segment| TranscriptSegment {
            start: segment.start,
            end: segment.end,
            text: segment.text,
        })
        .collect())
}

/// Transcription over the OpenAI audio API (OpenAI Whisper or any
/// compatible endpoint).
pub struct OpenAiTranscription {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiTranscription {
    /// Create with explicit endpoint, key, and model.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> SiftResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| SiftError::Transcription(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

#[async_trait]
impl TranscriptionBackend for OpenAiTranscription {
    async fn transcribe(
        &self,
        audio: &[u8],
        file_name: &str,
    ) -> SiftResult<Vec<TranscriptSegment>> {
        if audio.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/audio/transcriptions", self.base_url);
        let part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|err| SiftError::Transcription(format!("request failed: {err}")))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!("transcription API error {}: {}", status, body);
            return Err(SiftError::Transcription(format!(
                "API error {status}: {body}"
            )));
        }
        let payload: VerboseTranscription = res
            .json()
            .await
            .map_err(|err| SiftError::Transcription(format!("response parse failed: {err}")))?;

        let segments = into_segments(payload)?;
        info!(file = %file_name, segments = segments.len(), "call transcribed");
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_payload_maps_to_timed_segments() {
        let payload: VerboseTranscription = serde_json::from_str(
            r#"{
                "task": "transcribe",
                "language": "english",
                "duration": 4.5,
                "text": "Hello. A hailstorm cracked my windshield.",
                "segments": [
                    {"id": 0, "start": 0.0, "end": 1.0, "text": "Hello."},
                    {"id": 1, "start": 1.0, "end": 4.5, "text": "A hailstorm cracked my windshield."}
                ]
            }"#,
        )
        .unwrap();
        let segments = into_segments(payload).unwrap();
        assert_eq!(
            segments,
            vec![
                TranscriptSegment::new(0.0, 1.0, "Hello."),
                TranscriptSegment::new(1.0, 4.5, "A hailstorm cracked my windshield."),
            ]
        );
    }

    #[test]
    fn payload_without_segments_is_a_transcription_error() {
        let payload: VerboseTranscription =
            serde_json::from_str(r#"{"text": "Hello."}"#).unwrap();
        let err = into_segments(payload).unwrap_err();
        assert!(matches!(err, SiftError::Transcription(_)));
    }

    #[test]
    fn empty_segment_list_is_a_valid_silent_call() {
        let payload: VerboseTranscription =
            serde_json::from_str(r#"{"text": "", "segments": []}"#).unwrap();
        assert_eq!(into_segments(payload).unwrap(), vec![]);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend =
            OpenAiTranscription::new("https://api.openai.com/v1/", "sk-test", "whisper-1")
                .unwrap();
        assert_eq!(backend.base_url, "https://api.openai.com/v1");
    }
}
