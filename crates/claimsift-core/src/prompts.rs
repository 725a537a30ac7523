//! Extraction prompt: a claims-adjuster persona working through a
//! timestamp-tagged transcript.
//!
//! The forced function's name and description live here too, since they are
//! part of the text surface the model reasons over.

/// System instruction for the answer-extraction model.
pub const EXTRACTION_SYSTEM: &str = "You are a claims adjuster. You have a list of questions that \
need to be filled out. Use the provided transcript to answer the questions, and take each \
answer's timestamp from the transcript. Return the answers as a JSON object.";

/// Name of the forced function the model must answer through.
pub const RESPONSE_FUNCTION_NAME: &str = "record_answers";

/// Description attached to the forced function.
pub const RESPONSE_FUNCTION_DESCRIPTION: &str = "Requested answers to the questions";
