//! Request-scoped staging of the uploaded call recording.
//!
//! The operator's file is copied under the upload directory, then a working
//! copy is written under the download directory and read back for
//! transcription. Each request gets a fresh id, so concurrent or repeated
//! runs with the same file name never collide.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::config::SiftConfig;
use crate::error::{SiftError, SiftResult};

/// Staged audio for one review request.
#[derive(Debug, Clone)]
pub struct StagedAudio {
    /// Id scoping this request's staged copies.
    pub request_id: String,
    /// Copy of the operator's upload.
    pub upload_path: PathBuf,
    /// Working copy the pipeline reads.
    pub working_path: PathBuf,
    /// File name passed through to the transcription upload.
    pub file_name: String,
}

impl StagedAudio {
    /// Read the working copy back for transcription.
    pub fn read(&self) -> SiftResult<Vec<u8>> {
        Ok(fs::read(&self.working_path)?)
    }
}

/// Stage one uploaded recording under a fresh request id.
pub fn stage_audio(config: &SiftConfig, source: &Path) -> SiftResult<StagedAudio> {
    let file_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            SiftError::Config(format!(
                "audio path has no usable file name: {}",
                source.display()
            ))
        })?
        .to_string();

    let request_id = Uuid::new_v4().to_string();
    let upload_dir = config.upload_dir.join(&request_id);
    let download_dir = config.download_dir.join(&request_id);
    fs::create_dir_all(&upload_dir)?;
    fs::create_dir_all(&download_dir)?;

    let upload_path = upload_dir.join(&file_name);
    fs::copy(source, &upload_path)?;

    let working_path = download_dir.join(&file_name);
    fs::copy(&upload_path, &working_path)?;

    info!(request = %request_id, file = %file_name, "staged call recording");

    Ok(StagedAudio {
        request_id,
        upload_path,
        working_path,
        file_name,
    })
}
