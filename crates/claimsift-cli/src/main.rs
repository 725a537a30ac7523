//! claimsift CLI: fill out a question checklist from a recorded claims call.
//!
//! Usage:
//!   cargo run -p claimsift-cli -- --audio call.mp3 --questions checklist.csv [--model gpt-4] [--json]
//!
//! Stages the recording, transcribes it into timed segments, forces the
//! completion model through a contract derived from the CSV's `questions`
//! column, and prints each question with the answer and the transcript
//! timestamp it was taken from.

use std::path::{Path, PathBuf};

use claimsift_core::{
    stage_audio, ExtractionResult, QuestionSet, ReviewPipeline, SiftConfig, SiftResult,
};
use claimsift_openai::{api_key_from_env, OpenAiCompletion, OpenAiTranscription};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut audio: Option<PathBuf> = None;
    let mut questions: Option<PathBuf> = None;
    let mut model: Option<String> = None;
    let mut json_output = false;

    let mut args = std::env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--audio" => audio = args.next().map(PathBuf::from),
            "--questions" => questions = args.next().map(PathBuf::from),
            "--model" => model = args.next(),
            "--json" => json_output = true,
            _ => {}
        }
    }

    let (audio, questions) = match (audio, questions) {
        (Some(audio), Some(questions)) => (audio, questions),
        _ => {
            eprintln!("claimsift: answer a question checklist from a recorded claims call");
            eprintln!("  --audio FILE        Recording of the claims call (e.g. call.mp3)");
            eprintln!("  --questions FILE    CSV checklist with a 'questions' column");
            eprintln!("  --model NAME        Completion model (default from config: gpt-4)");
            eprintln!("  --json              Print the answers as one JSON report");
            eprintln!();
            eprintln!("Requires OPENAI_API_KEY (or CLAIMSIFT_API_KEY) in the environment or .env.");
            eprintln!("Config: config/claimsift.toml or CLAIMSIFT_* variables (CLAIMSIFT_API_BASE_URL, ...).");
            return Ok(());
        }
    };

    let result = review_call(&audio, &questions, model).await?;
    render(&result, json_output);
    Ok(())
}

/// Load config and questions, stage the recording, and run the pipeline.
async fn review_call(
    audio: &Path,
    questions_path: &Path,
    model: Option<String>,
) -> SiftResult<ExtractionResult> {
    let config = SiftConfig::load()?;
    let completion_model = model.unwrap_or_else(|| config.completion_model.clone());

    let question_set = QuestionSet::from_csv_path(questions_path)?;
    info!(
        questions = question_set.len(),
        file = %questions_path.display(),
        "checklist loaded"
    );

    let staged = stage_audio(&config, audio)?;
    let audio_bytes = staged.read()?;

    let api_key = api_key_from_env()?;
    let transcription = OpenAiTranscription::new(
        &config.api_base_url,
        &api_key,
        &config.transcription_model,
    )?;
    let completion = OpenAiCompletion::new(&config.api_base_url, &api_key, &completion_model)?;

    let pipeline = ReviewPipeline::new(&transcription, &completion);
    pipeline
        .review(&audio_bytes, &staged.file_name, &question_set)
        .await
}

/// Print the answers, either line by line or as one JSON report.
fn render(result: &ExtractionResult, json_output: bool) {
    if json_output {
        let report = serde_json::json!({
            "reviewed_at": chrono::Utc::now().to_rfc3339(),
            "answers": result,
        });
        println!("{report:#}");
        return;
    }
    for entry in result.entries() {
        match &entry.record {
            Some(record) => {
                println!("{}: {} (at {})", entry.question, record.answer, record.timestamp)
            }
            None => println!("{}: no answer in the call", entry.question),
        }
    }
}
