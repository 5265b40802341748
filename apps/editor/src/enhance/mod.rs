//! Section-scoped AI enhancement: the outbound client ([`client`]) and the
//! per-field request coordinator ([`coordinator`]).

pub mod client;
pub mod coordinator;

pub use client::EnhanceClient;
pub use coordinator::{Coordinator, EnhanceOutcome};

use std::fmt;

use crate::document::EntryId;

/// The enhancement category sent to the backend. `Other` carries an arbitrary
/// tag and only ever resolves through the generic local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Other(String),
}

impl SectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Summary => "summary",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress tracking key. Per-entry keys carry the entry id so busy state
/// is entry-specific, never global per section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnhanceKey {
    /// The personal summary; a single fixed key.
    Summary,
    /// An experience entry's description.
    Experience(EntryId),
    /// An education entry's degree line.
    Education(EntryId),
    /// A skill entry's name.
    Skill(EntryId),
}

impl EnhanceKey {
    pub fn section(&self) -> SectionKind {
        match self {
            Self::Summary => SectionKind::Summary,
            Self::Experience(_) => SectionKind::Experience,
            Self::Education(_) => SectionKind::Education,
            Self::Skill(_) => SectionKind::Skills,
        }
    }
}

impl fmt::Display for EnhanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Experience(id) => write!(f, "exp-{id}"),
            Self::Education(id) => write!(f, "edu-{id}"),
            Self::Skill(id) => write!(f, "skill-{id}"),
        }
    }
}
