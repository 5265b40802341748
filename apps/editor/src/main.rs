//! Scripted demo session: import the sample resume, run a few edits and
//! enhancements, export locally, and attempt a remote save.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use editor::config::EditorConfig;
use editor::document::{PersonalField, SkillField};
use editor::session::EditorSession;
use editor::upload::MockParser;

#[tokio::main]
async fn main() -> Result<()> {
    let config = EditorConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume editor v{}", env!("CARGO_PKG_VERSION"));
    match &config.backend_url {
        Some(url) => info!("Backend: {url}"),
        None => info!("No backend configured, running offline"),
    }

    let mut session = EditorSession::from_config(&config);

    // Upload flow (stub parser) populates the document.
    session.import(&MockParser, &[])?;
    info!("Imported resume for {}", session.document().personal_info.name);

    // A few edits plus section-scoped enhancements running concurrently.
    session.set_personal_field(PersonalField::Location, "Brooklyn, NY");
    let rust = session.add_skill();
    session.update_skill_field(rust, SkillField::Name, "Rust");
    session.update_skill_field(rust, SkillField::Level, "Advanced");

    session.enhance_summary();
    for id in session
        .document()
        .experience
        .iter()
        .map(|e| e.id)
        .collect::<Vec<_>>()
    {
        session.enhance_experience(id);
    }
    session.drain().await;
    info!("Enhanced summary: {}", session.document().personal_info.summary);

    let path = session.export_local(&config.export_dir)?;
    info!("Exported to {}", path.display());

    match session.save().await {
        Ok(receipt) => info!("Saved remotely as {} at {}", receipt.resume_id, receipt.timestamp),
        Err(err) => warn!("Resume was not saved remotely: {err}"),
    }

    Ok(())
}
