//! Response contracts: a JSON Schema derived from the question checklist
//! that the completion model must answer through.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{SiftError, SiftResult};
use crate::questions::{question_key, QuestionSet};

/// The fixed shape every answered question resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Answer text drawn from the transcript.
    pub answer: String,
    /// Transcript time range the answer was taken from.
    pub timestamp: String,
}

/// JSON Schema document for [`AnswerRecord`]. Embedded in each field's
/// description so the model sees the sub-shape it must fill.
pub fn answer_record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "answer": { "type": "string" },
            "timestamp": { "type": "string" }
        },
        "required": ["answer", "timestamp"]
    })
}

/// One field of a response contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractField {
    /// Schema-safe key the model answers under.
    pub key: String,
    /// The question as the operator wrote it.
    pub question: String,
}

/// Structured-output contract for one question set. Field order follows
/// question order, so equal question sets always produce the same schema
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseContract {
    fields: Vec<ContractField>,
}

impl ResponseContract {
    /// Derive one field per question. Two questions reducing to the same key
    /// would silently overwrite each other in the model's output, so the
    /// collision aborts the request instead.
    pub fn build(questions: &QuestionSet) -> SiftResult<Self> {
        let mut fields: Vec<ContractField> = Vec::with_capacity(questions.len());
        for question in questions.iter() {
            let key = question_key(question);
            if let Some(existing) = fields.iter().find(|field| field.key == key) {
                return Err(SiftError::DuplicateQuestionKey {
                    key,
                    first: existing.question.clone(),
                    second: question.to_string(),
                });
            }
            fields.push(ContractField {
                key,
                question: question.to_string(),
            });
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[ContractField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the contract as the JSON Schema document sent to the
    /// completion boundary. Every field is nullable and defaults to null, so
    /// the model can leave questions the transcript never answers unfilled.
    pub fn json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for field in &self.fields {
            properties.insert(
                field.key.clone(),
                json!({
                    "type": ["object", "null"],
                    "description": format!(
                        "Provide an answer to this question based only on the provided transcript. \
                         Must be a dictionary of the form {}. \
                         Use null if the transcript does not answer it.",
                        answer_record_schema()
                    ),
                    "properties": {
                        "answer": { "type": "string" },
                        "timestamp": { "type": "string" }
                    },
                    "required": ["answer", "timestamp"],
                    "default": null
                }),
            );
        }
        json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false
        })
    }
}
