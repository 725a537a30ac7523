//! # claimsift-core: claims-call answer extraction
//!
//! Reviews one recorded claims call against an operator's question
//! checklist: flatten the timed transcript, derive a structured-output
//! contract from the questions, force one completion through it, and
//! normalize the model's answers back to display form.

pub mod backend;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompts;
pub mod questions;
pub mod schema;
pub mod staging;
pub mod transcript;

pub use backend::{ChatMessage, CompletionBackend, PlaceholderTranscription, TranscriptionBackend};
pub use config::SiftConfig;
pub use error::{SiftError, SiftResult};
pub use extract::{extract, normalize, ExtractedAnswer, ExtractionResult};
pub use pipeline::ReviewPipeline;
pub use questions::{question_key, question_label, QuestionSet, QUESTION_COLUMN};
pub use schema::{answer_record_schema, AnswerRecord, ContractField, ResponseContract};
pub use staging::{stage_audio, StagedAudio};
pub use transcript::{flatten_transcript, TranscriptSegment};
