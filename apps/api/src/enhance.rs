//! Section enhancement endpoint.
//!
//! Enhancement is template-based: each known section carries three canned
//! augmentations that splice the submitted content in. The choice between
//! them is random per request; summary templates additionally substitute
//! role/domain words keyed on what the content mentions.

use axum::Json;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

pub const VALID_SECTIONS: [&str; 4] = ["summary", "experience", "education", "skills"];

const SUMMARY_TEMPLATES: [&str; 3] = [
    "Results-driven professional with proven expertise in {domain}. {original} Demonstrated ability to lead cross-functional teams and deliver innovative solutions that drive business growth.",
    "Accomplished {role} with extensive experience in {field}. {original} Known for exceptional problem-solving skills and commitment to excellence in all endeavors.",
    "Dynamic professional with a track record of success in {industry}. {original} Passionate about leveraging cutting-edge technologies to create impactful solutions.",
];

const EXPERIENCE_TEMPLATES: [&str; 3] = [
    "{original} Successfully collaborated with diverse stakeholders to ensure project alignment with business objectives and user requirements.",
    "{original} Implemented industry best practices and mentored junior team members, contributing to overall team productivity and knowledge sharing.",
    "{original} Utilized agile methodologies to streamline processes, resulting in improved efficiency and faster time-to-market for key initiatives.",
];

const EDUCATION_TEMPLATES: [&str; 3] = [
    "{original} Completed rigorous coursework in advanced topics including data structures, algorithms, and software engineering principles.",
    "{original} Participated in research projects and maintained academic excellence while developing practical skills through hands-on learning experiences.",
    "{original} Engaged in collaborative learning environments and contributed to academic community through peer tutoring and study groups.",
];

const SKILLS_TEMPLATES: [&str; 3] = [
    "{original} - Demonstrated through successful implementation in multiple high-impact projects and continuous professional development.",
    "{original} - Applied in real-world scenarios with measurable results and positive feedback from stakeholders and team members.",
    "{original} - Continuously expanding knowledge through ongoing training, certifications, and hands-on practice in emerging technologies.",
];

fn templates_for(section: &str) -> &'static [&'static str] {
    match section {
        "summary" => &SUMMARY_TEMPLATES,
        "education" => &EDUCATION_TEMPLATES,
        "skills" => &SKILLS_TEMPLATES,
        // Experience doubles as the catch-all, matching historical behavior.
        _ => &EXPERIENCE_TEMPLATES,
    }
}

/// Produces the enhanced text for one section. Total: bad input degrades to a
/// canned message rather than an error.
pub fn mock_enhance(section: &str, content: &str) -> String {
    if content.trim().is_empty() {
        return "Please provide content to enhance.".to_string();
    }

    let templates = templates_for(section);
    let template = templates
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(templates[0]);

    let mut enhanced = template.replace("{original}", content);

    if section == "summary" {
        let lower = content.to_lowercase();
        let (domain, role, field, industry) = if lower.contains("developer") {
            ("software development", "developer", "technology", "technology")
        } else if lower.contains("manager") {
            ("project management", "manager", "leadership", "business")
        } else {
            (
                "their field",
                "professional",
                "their area of expertise",
                "their industry",
            )
        };
        enhanced = enhanced
            .replace("{domain}", domain)
            .replace("{role}", role)
            .replace("{field}", field)
            .replace("{industry}", industry);
    }

    // Non-summary templates never carry these, but scrub any stragglers.
    enhanced = enhanced
        .replace("{domain}", "")
        .replace("{role}", "")
        .replace("{field}", "")
        .replace("{industry}", "");

    enhanced.trim().to_string()
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub section: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced_content: String,
    pub original_content: String,
    pub section: String,
}

/// POST /ai-enhance
///
/// Enhances one section's content. 400 on empty content or unknown section;
/// clients treat any non-success as a signal to use their local fallback.
pub async fn handle_enhance(
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("Content cannot be empty".to_string()));
    }
    if !VALID_SECTIONS.contains(&request.section.as_str()) {
        return Err(AppError::Validation(format!(
            "Invalid section '{}'. Must be one of: {}",
            request.section,
            VALID_SECTIONS.join(", ")
        )));
    }

    debug!(section = %request.section, "enhancing content");
    let enhanced_content = mock_enhance(&request.section, &request.content);

    Ok(Json(EnhanceResponse {
        enhanced_content,
        original_content: request.content,
        section: request.section,
    }))
}
