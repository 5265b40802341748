//! The editor session: one context object owning the document, the id
//! allocator, and all ephemeral enhancement state. No ambient globals.
//!
//! The session is the single writer of the document. Spawned enhancement
//! tasks never touch it; their results come back as messages which the
//! session applies one at a time via [`EditorSession::apply_next`].

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::config::EditorConfig;
use crate::document::{
    EducationField, EntryId, ExperienceField, PersonalField, ResumeDocument, SkillField,
};
use crate::enhance::{Coordinator, EnhanceClient, EnhanceKey, EnhanceOutcome};
use crate::identity::IdAllocator;
use crate::persist::{self, ExportError, PersistGateway, SaveError, SaveReceipt};
use crate::upload::{ParseError, ResumeParser};

pub struct EditorSession {
    document: ResumeDocument,
    ids: IdAllocator,
    coordinator: Coordinator,
    outcomes: mpsc::UnboundedReceiver<EnhanceOutcome>,
    persist: PersistGateway,
    /// Outstanding task count. Unlike the per-key busy flags this counts
    /// duplicate requests for the same key, so draining waits for all of them.
    pending: usize,
}

impl EditorSession {
    pub fn new(client: EnhanceClient, persist: PersistGateway) -> Self {
        let (coordinator, outcomes) = Coordinator::new(client);
        Self {
            document: ResumeDocument::default(),
            ids: IdAllocator::new(),
            coordinator,
            outcomes,
            persist,
            pending: 0,
        }
    }

    /// Session with no backend: enhancement always takes the local fallback
    /// and remote save reports `NoBackend`.
    pub fn offline() -> Self {
        Self::new(EnhanceClient::offline(), PersistGateway::offline())
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        match &config.backend_url {
            Some(base) => Self::new(EnhanceClient::new(base), PersistGateway::new(base)),
            None => Self::offline(),
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    // ── Document operations ─────────────────────────────────────────────────

    pub fn set_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        self.document.set_personal_field(field, value);
    }

    pub fn add_experience(&mut self) -> EntryId {
        self.document.add_experience(&mut self.ids)
    }

    pub fn add_education(&mut self) -> EntryId {
        self.document.add_education(&mut self.ids)
    }

    pub fn add_skill(&mut self) -> EntryId {
        self.document.add_skill(&mut self.ids)
    }

    pub fn update_experience_field(&mut self, id: EntryId, field: ExperienceField, value: &str) {
        self.document.update_experience_field(id, field, value);
    }

    pub fn update_education_field(&mut self, id: EntryId, field: EducationField, value: &str) {
        self.document.update_education_field(id, field, value);
    }

    pub fn update_skill_field(&mut self, id: EntryId, field: SkillField, value: &str) {
        self.document.update_skill_field(id, field, value);
    }

    pub fn delete_experience(&mut self, id: EntryId) {
        self.document.delete_experience(id);
    }

    pub fn delete_education(&mut self, id: EntryId) {
        self.document.delete_education(id);
    }

    pub fn delete_skill(&mut self, id: EntryId) {
        self.document.delete_skill(id);
    }

    /// Wholesale replacement, used by import. The id allocator is re-floored
    /// so fresh ids can never collide with imported ones.
    pub fn replace_document(&mut self, new_doc: ResumeDocument) {
        self.ids.ensure_above(new_doc.max_entry_id());
        self.document = new_doc;
    }

    pub fn import(&mut self, parser: &dyn ResumeParser, bytes: &[u8]) -> Result<(), ParseError> {
        let doc = parser.parse(bytes)?;
        self.replace_document(doc);
        Ok(())
    }

    // ── Enhancement ─────────────────────────────────────────────────────────

    /// Starts enhancement of the personal summary.
    pub fn enhance_summary(&mut self) {
        let content = self.document.personal_info.summary.clone();
        self.spawn(EnhanceKey::Summary, content);
    }

    /// Starts enhancement of an experience entry's description. Returns false
    /// (and starts nothing) if the entry no longer exists.
    pub fn enhance_experience(&mut self, id: EntryId) -> bool {
        let Some(entry) = self.document.experience.iter().find(|e| e.id == id) else {
            return false;
        };
        let content = entry.description.clone();
        self.spawn(EnhanceKey::Experience(id), content);
        true
    }

    /// Starts enhancement of an education entry. The request content is the
    /// "degree from school" line; the result lands in the degree field.
    pub fn enhance_education(&mut self, id: EntryId) -> bool {
        let Some(entry) = self.document.education.iter().find(|e| e.id == id) else {
            return false;
        };
        let content = format!("{} from {}", entry.degree, entry.school);
        self.spawn(EnhanceKey::Education(id), content);
        true
    }

    /// Starts enhancement of a skill entry's name.
    pub fn enhance_skill(&mut self, id: EntryId) -> bool {
        let Some(entry) = self.document.skills.iter().find(|e| e.id == id) else {
            return false;
        };
        let content = entry.name.clone();
        self.spawn(EnhanceKey::Skill(id), content);
        true
    }

    fn spawn(&mut self, key: EnhanceKey, content: String) {
        self.pending += 1;
        self.coordinator.spawn(key, content);
    }

    /// Per-key busy state for the UI (disables exactly the one button).
    pub fn is_enhancing(&self, key: &EnhanceKey) -> bool {
        self.coordinator.is_in_flight(key)
    }

    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// Waits for the next completed enhancement, clears its busy flag, and
    /// writes the result into the document. If the target entry was deleted
    /// while the request was in flight the write is a silent no-op, but the
    /// flag still clears. Returns the applied outcome, or `None` when nothing
    /// is outstanding.
    pub async fn apply_next(&mut self) -> Option<EnhanceOutcome> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.outcomes.recv().await?;
        self.pending -= 1;
        self.coordinator.complete(&outcome.key);

        match outcome.key {
            EnhanceKey::Summary => {
                self.document
                    .set_personal_field(PersonalField::Summary, outcome.text.clone());
            }
            EnhanceKey::Experience(id) => {
                self.document
                    .update_experience_field(id, ExperienceField::Description, &outcome.text);
            }
            EnhanceKey::Education(id) => {
                self.document
                    .update_education_field(id, EducationField::Degree, &outcome.text);
            }
            EnhanceKey::Skill(id) => {
                self.document
                    .update_skill_field(id, SkillField::Name, &outcome.text);
            }
        }
        Some(outcome)
    }

    /// Applies completions until nothing is outstanding.
    pub async fn drain(&mut self) {
        while self.apply_next().await.is_some() {}
    }

    // ── Persistence ─────────────────────────────────────────────────────────

    pub async fn save(&self) -> Result<SaveReceipt, SaveError> {
        self.persist.save(&self.document).await
    }

    pub fn export_local(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        persist::export_local(&self.document, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::client::fallback;
    use crate::enhance::SectionKind;
    use crate::upload::MockParser;

    #[test]
    fn add_three_skills_delete_middle_keeps_first_and_third_in_order() {
        let mut session = EditorSession::offline();
        let first = session.add_skill();
        let second = session.add_skill();
        let third = session.add_skill();

        session.delete_skill(second);

        let skills = &session.document().skills;
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].id, first);
        assert_eq!(skills[1].id, third);
    }

    #[tokio::test]
    async fn summary_enhancement_applies_the_fallback_offline() {
        let mut session = EditorSession::offline();
        session.set_personal_field(PersonalField::Summary, "X");

        session.enhance_summary();
        session.drain().await;

        assert_eq!(
            session.document().personal_info.summary,
            fallback(&SectionKind::Summary, "X")
        );
        assert!(!session.is_enhancing(&EnhanceKey::Summary));
    }

    #[tokio::test]
    async fn duplicate_same_key_requests_both_apply_last_write_wins() {
        let mut session = EditorSession::offline();
        session.set_personal_field(PersonalField::Summary, "X");

        // Not deduplicated: two overlapping requests for the same key.
        session.enhance_summary();
        session.enhance_summary();
        assert!(session.is_enhancing(&EnhanceKey::Summary));

        // The busy flag is a boolean per key: the first completion clears it
        // even though the second request is still outstanding.
        let first = session.apply_next().await.expect("first outcome");
        assert_eq!(first.key, EnhanceKey::Summary);
        assert!(!session.is_enhancing(&EnhanceKey::Summary));
        assert!(
            session.has_pending(),
            "second request must still be outstanding after the first applies"
        );

        let second = session.apply_next().await.expect("second outcome");
        assert_eq!(second.key, EnhanceKey::Summary);
        assert!(!session.has_pending());

        // Both captured "X" at issuance; whichever completes last wins.
        assert_eq!(
            session.document().personal_info.summary,
            fallback(&SectionKind::Summary, "X")
        );
        assert_eq!(session.document().personal_info.summary, second.text);
    }

    #[tokio::test]
    async fn busy_state_is_isolated_per_entry() {
        let mut session = EditorSession::offline();
        let a = session.add_experience();
        let b = session.add_experience();

        assert!(session.enhance_experience(a));

        assert!(session.is_enhancing(&EnhanceKey::Experience(a)));
        assert!(
            !session.is_enhancing(&EnhanceKey::Experience(b)),
            "entry B must not be busy when only A is enhancing"
        );

        session.drain().await;
        assert!(!session.is_enhancing(&EnhanceKey::Experience(a)));
    }

    #[tokio::test]
    async fn deleting_the_target_mid_flight_is_absorbed_as_a_noop() {
        let mut session = EditorSession::offline();
        let doomed = session.add_experience();
        let survivor = session.add_experience();
        session.update_experience_field(survivor, ExperienceField::Description, "untouched");

        assert!(session.enhance_experience(doomed));
        session.delete_experience(doomed);
        session.drain().await;

        let doc = session.document();
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.experience[0].id, survivor);
        assert_eq!(doc.experience[0].description, "untouched");
        assert!(
            !session.is_enhancing(&EnhanceKey::Experience(doomed)),
            "flag must clear even for a stale target"
        );
    }

    #[tokio::test]
    async fn enhancing_a_deleted_entry_starts_nothing() {
        let mut session = EditorSession::offline();
        let id = session.add_education();
        session.delete_education(id);

        assert!(!session.enhance_education(id));
        assert!(!session.has_pending());
    }

    #[tokio::test]
    async fn concurrent_enhancements_land_on_their_own_fields() {
        let mut session = EditorSession::offline();
        session.set_personal_field(PersonalField::Summary, "S");
        let exp = session.add_experience();
        session.update_experience_field(exp, ExperienceField::Description, "D");
        let skill = session.add_skill();
        session.update_skill_field(skill, SkillField::Name, "Rust");

        session.enhance_summary();
        session.enhance_experience(exp);
        session.enhance_skill(skill);
        session.drain().await;

        let doc = session.document();
        assert_eq!(
            doc.personal_info.summary,
            fallback(&SectionKind::Summary, "S")
        );
        assert_eq!(
            doc.experience[0].description,
            fallback(&SectionKind::Experience, "D")
        );
        assert_eq!(doc.skills[0].name, fallback(&SectionKind::Skills, "Rust"));
    }

    #[tokio::test]
    async fn education_enhancement_sends_degree_from_school_and_updates_degree() {
        let mut session = EditorSession::offline();
        let id = session.add_education();
        session.update_education_field(id, EducationField::Degree, "BSc");
        session.update_education_field(id, EducationField::School, "MIT");

        assert!(session.enhance_education(id));
        session.drain().await;

        assert_eq!(
            session.document().education[0].degree,
            fallback(&SectionKind::Education, "BSc from MIT")
        );
        assert_eq!(
            session.document().education[0].school, "MIT",
            "school field must be untouched"
        );
    }

    #[test]
    fn import_replaces_the_document_and_refloors_the_allocator() {
        let mut session = EditorSession::offline();
        session.add_skill();

        session.import(&MockParser, b"upload").expect("import");
        assert_eq!(session.document().personal_info.name, "John Doe");

        // Fresh ids must not collide with imported ones (1..=4).
        let fresh = session.add_skill();
        assert!(session
            .document()
            .skills
            .iter()
            .filter(|s| s.id == fresh)
            .count()
            == 1);
        let mut ids: Vec<_> = session.document().skills.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), session.document().skills.len());
    }
}
