//! Outbound enhancement calls with a deterministic local fallback.
//!
//! The public surface is infallible by contract: if the backend is absent,
//! unreachable, slow, or returns anything other than a well-formed success
//! body, the caller still gets a string back — the section-keyed local
//! transform applied to the original content.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::SectionKind;

const ENHANCE_PATH: &str = "/ai-enhance";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct EnhanceRequest<'a> {
    section: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct EnhanceResponse {
    enhanced_content: String,
}

#[derive(Debug, Error)]
enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),
}

/// HTTP client for the enhancement endpoint. Cheap to clone; one instance is
/// shared by every spawned enhancement task in a session.
#[derive(Debug, Clone)]
pub struct EnhanceClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl EnhanceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: build_http(),
            base_url: Some(base_url.into()),
        }
    }

    /// Client with no backend configured: every call resolves through the
    /// local fallback. Used when the editor runs disconnected and in tests.
    pub fn offline() -> Self {
        Self {
            http: build_http(),
            base_url: None,
        }
    }

    /// Enhances `content` for `section`. Never fails: any remote problem
    /// degrades to [`fallback`].
    pub async fn enhance(&self, section: &SectionKind, content: &str) -> String {
        if let Some(base) = &self.base_url {
            match self.call_remote(base, section, content).await {
                Ok(text) => return text,
                Err(err) => {
                    debug!(section = %section, "remote enhancement unavailable ({err}), using local fallback");
                }
            }
        }
        fallback(section, content)
    }

    async fn call_remote(
        &self,
        base: &str,
        section: &SectionKind,
        content: &str,
    ) -> Result<String, RemoteError> {
        let response = self
            .http
            .post(format!("{base}{ENHANCE_PATH}"))
            .json(&EnhanceRequest {
                section: section.as_str(),
                content,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        // A malformed body counts as failure, same as a transport error.
        let body: EnhanceResponse = response.json().await?;
        Ok(body.enhanced_content)
    }
}

fn build_http() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}

/// The deterministic local transform keyed by section. Applied verbatim —
/// callers (and tests) rely on these exact strings.
pub fn fallback(section: &SectionKind, content: &str) -> String {
    match section {
        SectionKind::Summary => format!(
            "{content} Proven track record of delivering scalable solutions and mentoring junior developers. Passionate about emerging technologies and continuous learning."
        ),
        SectionKind::Experience => format!(
            "{content} Collaborated with cross-functional teams to deliver high-quality software solutions on time and within budget."
        ),
        SectionKind::Education => format!(
            "{content} Relevant coursework included Data Structures, Algorithms, and Software Engineering principles."
        ),
        SectionKind::Skills => {
            format!("{content} - Advanced proficiency with hands-on project experience")
        }
        SectionKind::Other(_) => format!("Enhanced: {content}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_fallback_is_the_documented_fixed_sentence() {
        assert_eq!(
            fallback(&SectionKind::Summary, "X"),
            "X Proven track record of delivering scalable solutions and mentoring junior developers. Passionate about emerging technologies and continuous learning."
        );
    }

    #[test]
    fn unknown_section_fallback_prefixes_content() {
        let section = SectionKind::Other("unknown-section".into());
        assert_eq!(fallback(&section, "X"), "Enhanced: X");
    }

    #[test]
    fn fallback_is_deterministic_per_section() {
        for section in [
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
        ] {
            assert_eq!(
                fallback(&section, "same input"),
                fallback(&section, "same input")
            );
        }
    }

    #[tokio::test]
    async fn offline_client_resolves_through_fallback() {
        let client = EnhanceClient::offline();
        let text = client
            .enhance(&SectionKind::Experience, "Led the migration.")
            .await;
        assert_eq!(text, fallback(&SectionKind::Experience, "Led the migration."));
    }

    #[tokio::test]
    async fn unreachable_backend_resolves_through_fallback() {
        // Nothing listens on this port; connection is refused immediately.
        let client = EnhanceClient::new("http://127.0.0.1:1");
        let text = client.enhance(&SectionKind::Summary, "X").await;
        assert_eq!(text, fallback(&SectionKind::Summary, "X"));
    }
}
