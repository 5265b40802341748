//! Persistence/export gateway: remote save plus local JSON export.
//!
//! Save is advisory — on failure the caller informs the user and moves on; no
//! retry, no durable local fallback. Export never touches the network.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::document::ResumeDocument;

const SAVE_PATH: &str = "/save-resume";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fixed name of the local export artifact.
pub const EXPORT_FILE_NAME: &str = "resume.json";

/// What the save endpoint returns on success.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
    pub resume_id: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no backend configured")]
    NoBackend,

    #[error("save request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("save rejected by server (status {0})")]
    Rejected(u16),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Gateway to the remote save endpoint and the local export path.
#[derive(Debug, Clone)]
pub struct PersistGateway {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl PersistGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: build_http(),
            base_url: Some(base_url.into()),
        }
    }

    pub fn offline() -> Self {
        Self {
            http: build_http(),
            base_url: None,
        }
    }

    /// POSTs the full document to the save endpoint. Any failure is reported
    /// back as-is; the document in memory is unaffected either way.
    pub async fn save(&self, doc: &ResumeDocument) -> Result<SaveReceipt, SaveError> {
        let base = self.base_url.as_deref().ok_or(SaveError::NoBackend)?;

        let response = self
            .http
            .post(format!("{base}{SAVE_PATH}"))
            .json(doc)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SaveError::Rejected(status.as_u16()));
        }

        let receipt: SaveReceipt = response.json().await?;
        info!(resume_id = %receipt.resume_id, "resume saved remotely");
        Ok(receipt)
    }
}

/// Pretty-prints the document to `dir/resume.json` and returns the written
/// path. Parsing the file back yields an identical document.
pub fn export_local(doc: &ResumeDocument, dir: &Path) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string_pretty(doc)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "resume exported locally");
    Ok(path)
}

fn build_http() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}
