//! The canonical in-memory resume structure and its field-scoped update
//! operations.
//!
//! Every update is total over well-formed input: addressing an entry that no
//! longer exists (e.g. it was deleted while an async enhancement was in
//! flight) is a silent no-op, never an error. Updates touch exactly the named
//! field and leave ids and unrelated fields alone, so concurrent completions
//! against different fields can never clobber each other. Two completions
//! against the *same* field race last-write-wins by completion order; that is
//! an accepted, documented weak guarantee.

use serde::{Deserialize, Serialize};

use crate::identity::IdAllocator;

/// Entry ids are plain integers on the wire (historically wall-clock millis).
pub type EntryId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    pub school: String,
    pub year: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Parses the display label. Returns `None` for anything unrecognized so
    /// callers can treat a bad label as "leave the field unchanged".
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            "Expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: EntryId,
    pub name: String,
    pub level: SkillLevel,
}

/// The whole resume. Serializes in the camelCase wire form the save endpoint
/// and the JSON export both use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Field addresses
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Title,
    Company,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Degree,
    School,
    Year,
    Gpa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillField {
    Name,
    Level,
}

// ────────────────────────────────────────────────────────────────────────────
// Update operations
// ────────────────────────────────────────────────────────────────────────────

impl ResumeDocument {
    pub fn set_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonalField::Name => self.personal_info.name = value,
            PersonalField::Email => self.personal_info.email = value,
            PersonalField::Phone => self.personal_info.phone = value,
            PersonalField::Location => self.personal_info.location = value,
            PersonalField::Summary => self.personal_info.summary = value,
        }
    }

    /// Appends an empty experience entry and returns its freshly allocated id
    /// so the caller can target it for follow-up edits or enhancement.
    pub fn add_experience(&mut self, ids: &mut IdAllocator) -> EntryId {
        let id = ids.allocate();
        self.experience.push(ExperienceEntry {
            id,
            title: String::new(),
            company: String::new(),
            duration: String::new(),
            description: String::new(),
        });
        id
    }

    pub fn add_education(&mut self, ids: &mut IdAllocator) -> EntryId {
        let id = ids.allocate();
        self.education.push(EducationEntry {
            id,
            degree: String::new(),
            school: String::new(),
            year: String::new(),
            gpa: String::new(),
        });
        id
    }

    pub fn add_skill(&mut self, ids: &mut IdAllocator) -> EntryId {
        let id = ids.allocate();
        self.skills.push(SkillEntry {
            id,
            name: String::new(),
            level: SkillLevel::default(),
        });
        id
    }

    /// No-op if `id` is absent — the entry may have been deleted while an
    /// async enhancement for it was still in flight.
    pub fn update_experience_field(&mut self, id: EntryId, field: ExperienceField, value: &str) {
        if let Some(entry) = self.experience.iter_mut().find(|e| e.id == id) {
            match field {
                ExperienceField::Title => entry.title = value.to_string(),
                ExperienceField::Company => entry.company = value.to_string(),
                ExperienceField::Duration => entry.duration = value.to_string(),
                ExperienceField::Description => entry.description = value.to_string(),
            }
        }
    }

    pub fn update_education_field(&mut self, id: EntryId, field: EducationField, value: &str) {
        if let Some(entry) = self.education.iter_mut().find(|e| e.id == id) {
            match field {
                EducationField::Degree => entry.degree = value.to_string(),
                EducationField::School => entry.school = value.to_string(),
                EducationField::Year => entry.year = value.to_string(),
                EducationField::Gpa => entry.gpa = value.to_string(),
            }
        }
    }

    /// Skill levels arrive as display labels; an unrecognized label leaves
    /// the level unchanged rather than erroring.
    pub fn update_skill_field(&mut self, id: EntryId, field: SkillField, value: &str) {
        if let Some(entry) = self.skills.iter_mut().find(|e| e.id == id) {
            match field {
                SkillField::Name => entry.name = value.to_string(),
                SkillField::Level => {
                    if let Some(level) = SkillLevel::parse(value) {
                        entry.level = level;
                    }
                }
            }
        }
    }

    pub fn delete_experience(&mut self, id: EntryId) {
        self.experience.retain(|e| e.id != id);
    }

    pub fn delete_education(&mut self, id: EntryId) {
        self.education.retain(|e| e.id != id);
    }

    pub fn delete_skill(&mut self, id: EntryId) {
        self.skills.retain(|e| e.id != id);
    }

    /// Largest id present in any list, used to re-floor the id allocator
    /// after an import.
    pub fn max_entry_id(&self) -> EntryId {
        let exp = self.experience.iter().map(|e| e.id);
        let edu = self.education.iter().map(|e| e.id);
        let skl = self.skills.iter().map(|e| e.id);
        exp.chain(edu).chain(skl).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_two_experiences(ids: &mut IdAllocator) -> (ResumeDocument, EntryId, EntryId) {
        let mut doc = ResumeDocument::default();
        let a = doc.add_experience(ids);
        let b = doc.add_experience(ids);
        doc.update_experience_field(a, ExperienceField::Title, "Engineer");
        doc.update_experience_field(b, ExperienceField::Title, "Manager");
        (doc, a, b)
    }

    #[test]
    fn added_entries_get_distinct_ids_across_sections() {
        let mut ids = IdAllocator::new();
        let mut doc = ResumeDocument::default();
        let mut all = std::collections::HashSet::new();
        for _ in 0..50 {
            assert!(all.insert(doc.add_experience(&mut ids)));
            assert!(all.insert(doc.add_education(&mut ids)));
            assert!(all.insert(doc.add_skill(&mut ids)));
        }
    }

    #[test]
    fn update_touches_exactly_the_named_field() {
        let mut ids = IdAllocator::new();
        let (mut doc, a, b) = doc_with_two_experiences(&mut ids);

        doc.update_experience_field(a, ExperienceField::Description, "Shipped things");

        let first = &doc.experience[0];
        assert_eq!(first.id, a);
        assert_eq!(first.title, "Engineer", "other fields must be untouched");
        assert_eq!(first.description, "Shipped things");
        assert_eq!(
            doc.experience[1].title, "Manager",
            "sibling entries must be untouched"
        );
        assert_eq!(doc.experience[1].id, b);
    }

    #[test]
    fn update_after_delete_is_a_silent_noop() {
        let mut ids = IdAllocator::new();
        let (mut doc, a, _b) = doc_with_two_experiences(&mut ids);

        doc.delete_experience(a);
        doc.update_experience_field(a, ExperienceField::Description, "stale write");

        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.experience[0].title, "Manager");
        assert!(doc
            .experience
            .iter()
            .all(|e| e.description != "stale write"));
    }

    #[test]
    fn delete_of_unknown_id_is_a_noop() {
        let mut ids = IdAllocator::new();
        let (mut doc, _a, _b) = doc_with_two_experiences(&mut ids);
        doc.delete_experience(-1);
        assert_eq!(doc.experience.len(), 2);
    }

    #[test]
    fn add_three_skills_delete_middle_preserves_order_and_ids() {
        let mut ids = IdAllocator::new();
        let mut doc = ResumeDocument::default();
        let first = doc.add_skill(&mut ids);
        let second = doc.add_skill(&mut ids);
        let third = doc.add_skill(&mut ids);

        doc.delete_skill(second);

        assert_eq!(doc.skills.len(), 2);
        assert_eq!(doc.skills[0].id, first);
        assert_eq!(doc.skills[1].id, third);
    }

    #[test]
    fn unknown_skill_level_label_leaves_level_unchanged() {
        let mut ids = IdAllocator::new();
        let mut doc = ResumeDocument::default();
        let id = doc.add_skill(&mut ids);
        doc.update_skill_field(id, SkillField::Level, "Expert");
        doc.update_skill_field(id, SkillField::Level, "Wizard");
        assert_eq!(doc.skills[0].level, SkillLevel::Expert);
    }

    #[test]
    fn document_serializes_in_camel_case_wire_form() {
        let doc = ResumeDocument::default();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("experience").is_some());
        assert!(json.get("skills").is_some());
    }

    #[test]
    fn skill_level_labels_round_trip() {
        for label in ["Beginner", "Intermediate", "Advanced", "Expert"] {
            let level = SkillLevel::parse(label).expect("known label");
            assert_eq!(level.as_str(), label);
        }
        assert_eq!(SkillLevel::parse("expert"), None);
    }
}
