//! Pluggable upload capability.
//!
//! The core never depends on a concrete parser; anything that can turn file
//! bytes into a [`ResumeDocument`] can back the upload flow. The shipped
//! implementation is a stub that returns a fixed sample document.

use thiserror::Error;

use crate::document::{
    EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument, SkillEntry, SkillLevel,
};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported resume file format")]
    UnsupportedFormat,

    #[error("failed to read resume file: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns uploaded file bytes into a full document. Implementations replace
/// the session's document wholesale on success.
pub trait ResumeParser {
    fn parse(&self, bytes: &[u8]) -> Result<ResumeDocument, ParseError>;
}

/// Stub parser: ignores the bytes and returns the demo fixture. Real PDF or
/// DOCX parsing is deliberately out of scope.
pub struct MockParser;

impl ResumeParser for MockParser {
    fn parse(&self, _bytes: &[u8]) -> Result<ResumeDocument, ParseError> {
        Ok(sample_document())
    }
}

/// The populated sample resume used by the upload stub and demos.
pub fn sample_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            name: "John Doe".into(),
            email: "john.doe@email.com".into(),
            phone: "+1 (555) 123-4567".into(),
            location: "New York, NY".into(),
            summary: "Experienced software developer with 5+ years in web development and cloud technologies.".into(),
        },
        experience: vec![
            ExperienceEntry {
                id: 1,
                title: "Senior Software Engineer".into(),
                company: "Tech Corp".into(),
                duration: "2022 - Present".into(),
                description: "Led development of microservices architecture, improved system performance by 40%.".into(),
            },
            ExperienceEntry {
                id: 2,
                title: "Software Developer".into(),
                company: "StartUp Inc".into(),
                duration: "2020 - 2022".into(),
                description: "Developed full-stack web applications using React and Node.js.".into(),
            },
        ],
        education: vec![EducationEntry {
            id: 1,
            degree: "Bachelor of Science in Computer Science".into(),
            school: "University of Technology".into(),
            year: "2020".into(),
            gpa: "3.8".into(),
        }],
        skills: vec![
            SkillEntry { id: 1, name: "JavaScript".into(), level: SkillLevel::Expert },
            SkillEntry { id: 2, name: "React".into(), level: SkillLevel::Expert },
            SkillEntry { id: 3, name: "Python".into(), level: SkillLevel::Intermediate },
            SkillEntry { id: 4, name: "AWS".into(), level: SkillLevel::Intermediate },
        ],
    }
}
