use std::path::Path;

use anyhow::{bail, Context, Result};

/// Default Gemini REST base. Overridable for proxies and tests.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Candidate models, newest experimental variant first.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.0-pro-exp",
    "gemini-2.0-flash-exp",
    "gemini-2.0-pro",
    "gemini-2.5-pro",
    "gemini-1.5-flash",
    "gemini-pro",
];

/// Bundled English stop-word list, one word per line.
const DEFAULT_STOPWORDS: &str = include_str!("../config/stopwords_en.txt");

/// Application configuration loaded from environment variables.
/// Fails at startup if an override is present but unusable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret-store credential. `None` means the user must enter one manually.
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub model_candidates: Vec<String>,
    pub stop_words: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let model_candidates = match optional_env("GEMINI_MODELS") {
            Some(raw) => parse_model_list(&raw),
            None => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };
        if model_candidates.is_empty() {
            bail!("GEMINI_MODELS must name at least one model");
        }

        let stop_words = match optional_env("STOPWORDS_FILE") {
            Some(path) => load_stop_words(Path::new(&path))
                .with_context(|| format!("STOPWORDS_FILE '{path}' could not be loaded"))?,
            None => parse_stop_words(DEFAULT_STOPWORDS),
        };

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model_candidates,
            stop_words,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a comma-separated model list, preserving order and dropping blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a newline-separated stop-word list. Blank lines and `#` comments are skipped.
pub fn parse_stop_words(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

pub fn load_stop_words(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let words = parse_stop_words(&raw);
    if words.is_empty() {
        bail!("{} contains no stop words", path.display());
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_stop_words_are_the_english_set() {
        let words = parse_stop_words(DEFAULT_STOPWORDS);
        assert_eq!(words.len(), 179);
        assert_eq!(words[0], "i");
        assert!(words.contains(&"the".to_string()));
        assert!(words.contains(&"wouldn't".to_string()));
    }

    #[test]
    fn test_parse_model_list_preserves_order() {
        let models = parse_model_list(" gemini-2.5-pro, ,gemini-1.5-flash ,");
        assert_eq!(models, vec!["gemini-2.5-pro", "gemini-1.5-flash"]);
    }

    #[test]
    fn test_parse_stop_words_skips_comments_and_blanks() {
        let words = parse_stop_words("# header\nThe\n\n  and \n#tail");
        assert_eq!(words, vec!["the", "and"]);
    }

    #[test]
    fn test_load_stop_words_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();
        let words = load_stop_words(file.path()).unwrap();
        assert_eq!(words, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_load_stop_words_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_stop_words(file.path()).is_err());
    }

    #[test]
    fn test_default_models_start_with_experimental() {
        assert_eq!(DEFAULT_MODELS[0], "gemini-2.0-pro-exp");
        assert_eq!(DEFAULT_MODELS.last(), Some(&"gemini-pro"));
    }
}
