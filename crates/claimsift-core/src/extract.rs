//! Extraction orchestration: compose the prompt, invoke the forced
//! completion, and normalize the model's answers for display.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::info;

use crate::backend::{ChatMessage, CompletionBackend};
use crate::error::{SiftError, SiftResult};
use crate::prompts;
use crate::questions::question_label;
use crate::schema::{AnswerRecord, ResponseContract};

/// One normalized entry: the question restored to display form, and the
/// model's answer when it gave one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedAnswer {
    pub question: String,
    pub record: Option<AnswerRecord>,
}

/// The final mapping from question to answer, in the order the model
/// returned its fields. Serializes as a single JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionResult {
    entries: Vec<ExtractedAnswer>,
}

impl ExtractionResult {
    pub fn entries(&self) -> &[ExtractedAnswer] {
        &self.entries
    }

    /// Look up the answer for a question by its display form.
    pub fn get(&self, question: &str) -> Option<&Option<AnswerRecord>> {
        self.entries
            .iter()
            .find(|entry| entry.question == question)
            .map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.question, &entry.record)?;
        }
        map.end()
    }
}

/// Run one extraction: transcript and contract in, normalized answers out.
///
/// The prompt is always two messages, the adjuster system instruction and
/// the flattened transcript verbatim. The backend's raw function arguments
/// are parsed and relabeled here.
pub async fn extract(
    completion: &dyn CompletionBackend,
    transcript: &str,
    contract: &ResponseContract,
) -> SiftResult<ExtractionResult> {
    let messages = [
        ChatMessage::system(prompts::EXTRACTION_SYSTEM),
        ChatMessage::user(transcript),
    ];
    let raw = completion.complete(&messages, contract).await?;
    info!(bytes = raw.len(), "model returned contract output");
    normalize(&raw)
}

/// Parse the forced call's argument string and restore display labels.
/// Null-valued fields survive as unanswered entries; anything that is not an
/// object of optional answer records is malformed output.
pub fn normalize(raw: &str) -> SiftResult<ExtractionResult> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        SiftError::MalformedOutput(format!("arguments are not valid JSON: {err}"))
    })?;
    let object = match value {
        Value::Object(map) => map,
        other => {
            return Err(SiftError::MalformedOutput(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };

    let mut entries = Vec::with_capacity(object.len());
    for (key, field) in object {
        let record = match field {
            Value::Null => None,
            answered => Some(serde_json::from_value::<AnswerRecord>(answered).map_err(
                |err| {
                    SiftError::MalformedOutput(format!(
                        "field '{key}' does not fit the answer shape: {err}"
                    ))
                },
            )?),
        };
        entries.push(ExtractedAnswer {
            question: question_label(&key),
            record,
        });
    }
    Ok(ExtractionResult { entries })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Completion that returns a canned argument string and records the
    /// messages it was asked with.
    struct ScriptedCompletion {
        arguments: String,
        seen_messages: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedCompletion {
        fn returning(arguments: &str) -> Self {
            Self {
                arguments: arguments.to_string(),
                seen_messages: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedCompletion {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _contract: &ResponseContract,
        ) -> SiftResult<String> {
            self.seen_messages.lock().unwrap().extend_from_slice(messages);
            Ok(self.arguments.clone())
        }
    }

    fn contract(items: &[&str]) -> ResponseContract {
        let set = QuestionSet::new(items.iter().map(|q| q.to_string()).collect()).unwrap();
        ResponseContract::build(&set).unwrap()
    }

    #[test]
    fn normalize_restores_spaces_and_keeps_records() {
        let raw = r#"{
            "What_is_your_name": {"answer": "Jane Doe", "timestamp": "0.0-1.0"},
            "What_happened": null
        }"#;
        let result = normalize(raw).unwrap();
        assert_eq!(
            result.get("What is your name"),
            Some(&Some(AnswerRecord {
                answer: "Jane Doe".to_string(),
                timestamp: "0.0-1.0".to_string(),
            }))
        );
        assert_eq!(result.get("What happened"), Some(&None));
        assert_eq!(result.get("Never asked"), None);
    }

    #[test]
    fn normalize_keeps_model_field_order() {
        let raw = r#"{"B_first": null, "A_second": null}"#;
        let result = normalize(raw).unwrap();
        let questions: Vec<&str> = result
            .entries()
            .iter()
            .map(|entry| entry.question.as_str())
            .collect();
        assert_eq!(questions, vec!["B first", "A second"]);
    }

    #[test]
    fn non_json_arguments_are_malformed_output() {
        let err = normalize("not json at all").unwrap_err();
        assert!(matches!(err, SiftError::MalformedOutput(_)));
    }

    #[test]
    fn non_object_arguments_are_malformed_output() {
        let err = normalize(r#"["just", "a", "list"]"#).unwrap_err();
        match err {
            SiftError::MalformedOutput(msg) => assert!(msg.contains("an array")),
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn answer_missing_its_timestamp_is_malformed_output() {
        let raw = r#"{"What_happened": {"answer": "A crash"}}"#;
        let err = normalize(raw).unwrap_err();
        match err {
            SiftError::MalformedOutput(msg) => assert!(msg.contains("What_happened")),
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn empty_object_normalizes_to_an_empty_result() {
        let result = normalize("{}").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn result_serializes_as_one_json_object() {
        let raw = r#"{
            "What_is_your_name": {"answer": "John", "timestamp": "0.0s - 1.0"},
            "What_happened": null
        }"#;
        let result = normalize(raw).unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "What is your name": {"answer": "John", "timestamp": "0.0s - 1.0"},
                "What happened": null
            })
        );
    }

    #[tokio::test]
    async fn extract_sends_the_adjuster_prompt_and_the_transcript_verbatim() {
        let backend = ScriptedCompletion::returning("{}");
        let transcript = "Timestamp: 0.0s - 1.0\nHello\n";
        extract(&backend, transcript, &contract(&["What happened?"]))
            .await
            .unwrap();

        let seen = backend.seen_messages.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, "system");
        assert!(seen[0].content.contains("claims adjuster"));
        assert_eq!(seen[1].role, "user");
        assert_eq!(seen[1].content, transcript);
    }

    #[tokio::test]
    async fn extract_surfaces_backend_failures_unchanged() {
        struct FailingCompletion;

        #[async_trait]
        impl CompletionBackend for FailingCompletion {
            async fn complete(
                &self,
                _messages: &[ChatMessage],
                _contract: &ResponseContract,
            ) -> SiftResult<String> {
                Err(SiftError::Completion("upstream 500".to_string()))
            }
        }

        let err = extract(&FailingCompletion, "", &contract(&["What happened?"]))
            .await
            .unwrap_err();
        assert!(matches!(err, SiftError::Completion(_)));
    }
}
