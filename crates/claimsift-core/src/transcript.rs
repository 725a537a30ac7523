//! Transcript segments and the flattened text block handed to the model.

use serde::{Deserialize, Serialize};

/// A single timed utterance from the transcription service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Seconds from the start of the call to the start of the utterance.
    pub start: f64,
    /// Seconds from the start of the call to the end of the utterance.
    pub end: f64,
    /// Transcribed text, exactly as the service returned it.
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Flatten ordered segments into the single text block the model reads.
///
/// Each segment becomes a `Timestamp: {start}s - {end}` header followed by
/// the segment text on its own line. Start offsets render with one decimal,
/// end offsets with up to two (never fewer than one). Segment text is not
/// trimmed or normalized.
pub fn flatten_transcript(segments: &[TranscriptSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(&format!(
            "Timestamp: {:.1}s - {}\n{}\n",
            segment.start,
            format_end(segment.end),
            segment.text
        ));
    }
    out
}

/// Render an end offset rounded to two decimals, trailing zeros trimmed,
/// keeping at least one decimal place.
fn format_end(end: f64) -> String {
    let fixed = format!("{:.2}", end);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}
