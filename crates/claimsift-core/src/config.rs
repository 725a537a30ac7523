//! Runtime configuration: staging directories, API endpoint, model names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SiftResult;

/// Configuration for a review run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Directory uploaded call recordings are staged into.
    pub upload_dir: PathBuf,
    /// Directory working audio copies are written to before transcription.
    pub download_dir: PathBuf,
    /// Base URL of the OpenAI-compatible API, without a trailing slash.
    pub api_base_url: String,
    /// Model used for audio transcription.
    pub transcription_model: String,
    /// Model used for the forced-contract completion.
    pub completion_model: String,
}

impl SiftConfig {
    /// Load config from file and environment. Precedence: env
    /// `CLAIMSIFT_CONFIG` path > `config/claimsift.toml` > defaults, with
    /// `CLAIMSIFT_*` variables overriding any of them.
    pub fn load() -> SiftResult<Self> {
        let config_path = std::env::var("CLAIMSIFT_CONFIG")
            .unwrap_or_else(|_| "config/claimsift.toml".to_string());
        let builder = config::Config::builder()
            .set_default("upload_dir", "./uploads")?
            .set_default("download_dir", "./downloads")?
            .set_default("api_base_url", "https://api.openai.com/v1")?
            .set_default("transcription_model", "whisper-1")?
            .set_default("completion_model", "gpt-4")?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("CLAIMSIFT"))
            .build()?;

        Ok(built.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openai_and_local_staging_dirs() {
        let config = SiftConfig::load().unwrap();
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.download_dir, PathBuf::from("./downloads"));
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.transcription_model, "whisper-1");
        assert_eq!(config.completion_model, "gpt-4");
    }
}
