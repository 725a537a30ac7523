//! Forced-function completion backend for OpenAI-compatible chat APIs.
//!
//! Every request carries exactly one tool, named by
//! `prompts::RESPONSE_FUNCTION_NAME`, whose parameters are the response
//! contract's schema document, and `tool_choice` forces the model to call
//! it. The raw argument string comes back unparsed; normalization happens
//! in claimsift-core.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use claimsift_core::{
    prompts, ChatMessage, CompletionBackend, ResponseContract, SiftError, SiftResult,
};

const REQUEST_TIMEOUT_SECS: u64 = 60;

// OpenAI-compatible response shape, reduced to the forced-call path.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

/// Build the request body: messages, the single contract-bearing tool, and
/// the tool choice that forces it.
fn chat_request_body(model: &str, messages: &[ChatMessage], contract: &ResponseContract) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "tools": [
            {
                "type": "function",
                "function": {
                    "name": prompts::RESPONSE_FUNCTION_NAME,
                    "description": prompts::RESPONSE_FUNCTION_DESCRIPTION,
                    "parameters": contract.json_schema()
                }
            }
        ],
        "tool_choice": {
            "type": "function",
            "function": { "name": prompts::RESPONSE_FUNCTION_NAME }
        }
    })
}

/// Pull the forced call's argument string out of the first choice. A reply
/// with no tool call at all means the model dodged the contract.
fn forced_call_arguments(response: ChatResponse) -> SiftResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.tool_calls.unwrap_or_default().into_iter().next())
        .map(|call| call.function.arguments)
        .ok_or_else(|| {
            SiftError::MalformedOutput("completion returned no forced function call".to_string())
        })
}

/// Completion over the OpenAI chat API (or any compatible endpoint).
pub struct OpenAiCompletion {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompletion {
    /// Create with explicit endpoint, key, and model.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> SiftResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| SiftError::Completion(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletion {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        contract: &ResponseContract,
    ) -> SiftResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = chat_request_body(&self.model, messages, contract);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| SiftError::Completion(format!("request failed: {err}")))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!("completion API error {}: {}", status, body);
            return Err(SiftError::Completion(format!("API error {status}: {body}")));
        }
        let parsed: ChatResponse = res
            .json()
            .await
            .map_err(|err| SiftError::Completion(format!("response parse failed: {err}")))?;

        info!(model = %self.model, "forced completion answered");
        forced_call_arguments(parsed)
    }
}
