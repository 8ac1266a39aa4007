//! Session Orchestrator — the single interactive session and its analysis cycle.
//!
//! `SessionState` is an explicit context object. It lives behind a mutex in
//! `AppState`, and handlers hold the lock for a whole action so user actions
//! run one at a time.

pub mod credential;
pub mod handlers;
pub mod orchestrator;
pub mod validation;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::result::AnalysisResult;
use crate::documents::{DocumentSlot, DocumentText};

/// The most recent successful analysis. Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub analysis: AnalysisResult,
    pub resume_keywords: Vec<String>,
    pub jd_keywords: Vec<String>,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(
        analysis: AnalysisResult,
        resume_keywords: Vec<String>,
        jd_keywords: Vec<String>,
        model: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            analysis,
            resume_keywords,
            jd_keywords,
            model,
            analyzed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    /// Manually entered key, used only when no secret-store key is configured.
    manual_api_key: Option<String>,
    uploads: HashMap<DocumentSlot, DocumentText>,
    used_model: Option<String>,
    latest: Option<SessionSnapshot>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manual_api_key(&self) -> Option<&str> {
        self.manual_api_key.as_deref()
    }

    pub fn set_manual_api_key(&mut self, key: String) {
        self.manual_api_key = Some(key);
    }

    pub fn upload(&self, slot: DocumentSlot) -> Option<&DocumentText> {
        self.uploads.get(&slot)
    }

    pub fn store_upload(&mut self, slot: DocumentSlot, document: DocumentText) {
        self.uploads.insert(slot, document);
    }

    pub fn clear_upload(&mut self, slot: DocumentSlot) -> Option<DocumentText> {
        self.uploads.remove(&slot)
    }

    pub fn used_model(&self) -> Option<&str> {
        self.used_model.as_deref()
    }

    pub fn latest(&self) -> Option<&SessionSnapshot> {
        self.latest.as_ref()
    }

    /// Replaces the previous analysis wholesale; no history is kept.
    pub(crate) fn record(&mut self, snapshot: SessionSnapshot) -> &SessionSnapshot {
        self.used_model = Some(snapshot.model.clone());
        self.latest.insert(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert!(session.latest().is_none());
        assert!(session.used_model().is_none());
        assert!(session.manual_api_key().is_none());
        assert!(session.upload(DocumentSlot::Resume).is_none());
    }

    #[test]
    fn test_record_overwrites_previous_snapshot() {
        let mut session = SessionState::new();
        session.record(SessionSnapshot::new(
            AnalysisResult::default(),
            vec!["first".into()],
            vec![],
            "gemini-pro".into(),
        ));
        let second = session
            .record(SessionSnapshot::new(
                AnalysisResult::default(),
                vec!["second".into()],
                vec![],
                "gemini-1.5-flash".into(),
            ))
            .id;

        let latest = session.latest().unwrap();
        assert_eq!(latest.id, second);
        assert_eq!(latest.resume_keywords, vec!["second"]);
        assert_eq!(session.used_model(), Some("gemini-1.5-flash"));
    }

    #[test]
    fn test_uploads_are_per_slot() {
        let mut session = SessionState::new();
        session.store_upload(DocumentSlot::Resume, DocumentText::pasted("resume"));
        assert!(session.upload(DocumentSlot::JobDescription).is_none());
        assert_eq!(session.upload(DocumentSlot::Resume).unwrap().text, "resume");
        assert!(session.clear_upload(DocumentSlot::Resume).is_some());
        assert!(session.upload(DocumentSlot::Resume).is_none());
    }
}
