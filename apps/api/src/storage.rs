//! Flat resume storage: an in-memory map fronting one JSON file per saved
//! resume, plus the handlers for the save/fetch/list/delete endpoints.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;

use editor::document::ResumeDocument;

use crate::errors::AppError;
use crate::state::AppState;

/// One saved resume as stored and as returned by GET /resume/:id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResume {
    pub resume_id: String,
    pub timestamp: String,
    pub data: ResumeDocument,
}

/// In-memory store mirrored to disk. The file copy is best-effort durability
/// across restarts; the map is the source of truth while the process lives.
#[derive(Clone)]
pub struct ResumeStore {
    resumes: Arc<Mutex<HashMap<String, SavedResume>>>,
    save_dir: PathBuf,
}

impl ResumeStore {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            resumes: Arc::new(Mutex::new(HashMap::new())),
            save_dir: save_dir.into(),
        }
    }

    /// Stores a document under a freshly generated id and writes the JSON
    /// mirror file.
    pub async fn save(&self, data: ResumeDocument) -> Result<SavedResume, std::io::Error> {
        let now = Utc::now();
        let resume_id = format!(
            "resume_{}_{}",
            now.format("%Y%m%d_%H%M%S"),
            rand::thread_rng().gen_range(1000..10000)
        );
        let record = SavedResume {
            resume_id: resume_id.clone(),
            timestamp: now.to_rfc3339(),
            data,
        };

        tokio::fs::create_dir_all(&self.save_dir).await?;
        let pretty = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(self.path_for(&resume_id), pretty).await?;

        self.resumes.lock().await.insert(resume_id, record.clone());
        Ok(record)
    }

    pub async fn get(&self, resume_id: &str) -> Option<SavedResume> {
        self.resumes.lock().await.get(resume_id).cloned()
    }

    pub async fn list(&self) -> Vec<String> {
        self.resumes.lock().await.keys().cloned().collect()
    }

    /// Removes the record and its mirror file. Returns false if the id was
    /// unknown. The file goes first so an I/O failure leaves the record
    /// intact rather than half-deleted; a missing mirror file is fine.
    pub async fn delete(&self, resume_id: &str) -> Result<bool, std::io::Error> {
        if !self.resumes.lock().await.contains_key(resume_id) {
            return Ok(false);
        }
        match tokio::fs::remove_file(self.path_for(resume_id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        self.resumes.lock().await.remove(resume_id);
        Ok(true)
    }

    fn path_for(&self, resume_id: &str) -> PathBuf {
        self.save_dir.join(format!("{resume_id}.json"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SaveResumeResponse {
    pub message: String,
    pub resume_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ListResumesResponse {
    pub resumes: Vec<String>,
    pub count: usize,
}

/// POST /save-resume
pub async fn handle_save(
    State(state): State<AppState>,
    Json(document): Json<ResumeDocument>,
) -> Result<Json<SaveResumeResponse>, AppError> {
    let record = state.store.save(document).await?;
    info!(resume_id = %record.resume_id, "resume saved");

    Ok(Json(SaveResumeResponse {
        message: "Resume saved successfully".to_string(),
        resume_id: record.resume_id,
        timestamp: record.timestamp,
    }))
}

/// GET /resume/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<SavedResume>, AppError> {
    let record = state
        .store
        .get(&resume_id)
        .await
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    Ok(Json(record))
}

/// GET /resumes
pub async fn handle_list(State(state): State<AppState>) -> Json<ListResumesResponse> {
    let resumes = state.store.list().await;
    let count = resumes.len();
    Json(ListResumesResponse { resumes, count })
}

/// DELETE /resume/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete(&resume_id).await? {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    Ok(Json(json!({
        "message": format!("Resume {resume_id} deleted successfully")
    })))
}
