use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::AnalysisClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::session::credential::{self, Credential};
use crate::session::SessionState;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analysis: AnalysisClient,
    pub keywords: Arc<KeywordExtractor>,
    /// The single interactive session. Handlers hold the lock for a whole action.
    pub session: Arc<Mutex<SessionState>>,
}

impl AppState {
    pub fn new(config: Config, analysis: AnalysisClient) -> Self {
        let keywords = Arc::new(KeywordExtractor::new(&config.stop_words));
        Self {
            config,
            analysis,
            keywords,
            session: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    /// Resolves the API key against an already-locked session.
    pub fn require_credential(&self, session: &SessionState) -> Result<Credential, AppError> {
        credential::require(
            self.config.gemini_api_key.as_deref(),
            session.manual_api_key(),
        )
    }
}
