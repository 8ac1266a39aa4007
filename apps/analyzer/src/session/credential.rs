//! API key resolution: deployment secret first, then the manually entered key.

use serde::Serialize;

use crate::errors::AppError;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Google Gemini API key not found. \
    Set GEMINI_API_KEY in the deployment secrets (or .env), \
    or enter a key via POST /api/v1/session/credential.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    Secret,
    Manual,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub source: CredentialSource,
    key: String,
}

impl Credential {
    pub fn key(&self) -> &str {
        &self.key
    }
}

// Never print the key itself.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Blank values count as absent.
pub fn resolve(secret: Option<&str>, manual: Option<&str>) -> Option<Credential> {
    let usable = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from);

    usable(secret)
        .map(|key| Credential {
            source: CredentialSource::Secret,
            key,
        })
        .or_else(|| {
            usable(manual).map(|key| Credential {
                source: CredentialSource::Manual,
                key,
            })
        })
}

/// Like [`resolve`], but halts the interaction when no key is available.
pub fn require(secret: Option<&str>, manual: Option<&str>) -> Result<Credential, AppError> {
    resolve(secret, manual).ok_or_else(|| AppError::Configuration(MISSING_CREDENTIAL_MESSAGE.into()))
}
