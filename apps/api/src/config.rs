use std::path::PathBuf;

use anyhow::{Context, Result};

/// API configuration loaded from environment variables. Everything has a
/// sensible default so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory saved resumes are mirrored to, one JSON file per resume.
    pub save_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            save_dir: std::env::var("SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("saved_resumes")),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
