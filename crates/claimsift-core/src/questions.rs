//! Question checklists and the schema-safe keys derived from them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{SiftError, SiftResult};

/// Required column in the operator's question table.
pub const QUESTION_COLUMN: &str = "questions";

/// Separator substituted for spaces when deriving keys.
const KEY_SEPARATOR: &str = "_";

/// Ordered list of questions for one extraction request. Construction
/// rejects empty entries; order is preserved everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    questions: Vec<String>,
}

impl QuestionSet {
    /// Build from already-parsed question strings.
    pub fn new(questions: Vec<String>) -> SiftResult<Self> {
        for (idx, question) in questions.iter().enumerate() {
            if question.trim().is_empty() {
                return Err(SiftError::EmptyQuestion { row: idx + 1 });
            }
        }
        Ok(Self { questions })
    }

    /// Read the question table from CSV. The header row must contain a
    /// `questions` column; any other columns are ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> SiftResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|header| header == QUESTION_COLUMN)
            .ok_or(SiftError::MissingQuestionColumn {
                column: QUESTION_COLUMN,
            })?;

        let mut questions = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            questions.push(record.get(column).unwrap_or("").to_string());
        }
        Self::new(questions)
    }

    /// Read the question table from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> SiftResult<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Derive the schema-safe key for a question: spaces become `_`, trailing
/// `?` characters are dropped. `question_label` undoes the space
/// substitution.
pub fn question_key(question: &str) -> String {
    question
        .replace(' ', KEY_SEPARATOR)
        .trim_end_matches('?')
        .to_string()
}

/// Restore the display label for a key by turning separators back into
/// spaces.
pub fn question_label(key: &str) -> String {
    key.replace(KEY_SEPARATOR, " ")
}
