use std::path::PathBuf;

use anyhow::Result;

/// Editor configuration loaded from environment variables. Everything is
/// optional: with no backend configured the editor runs fully offline.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Base URL of the backend (enhancement + save endpoints), e.g.
    /// `http://localhost:8000`. Absent means offline mode.
    pub backend_url: Option<String>,
    /// Directory the local JSON export is written to.
    pub export_dir: PathBuf,
    pub rust_log: String,
}

impl EditorConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(EditorConfig {
            backend_url: std::env::var("BACKEND_URL").ok().filter(|s| !s.is_empty()),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
