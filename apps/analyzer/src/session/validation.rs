use thiserror::Error;

/// Minimum trimmed length for both the résumé and the job description.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API Key Error: Please enter your Gemini API key")]
    MissingCredential,

    #[error("Please provide a resume (paste text or upload a file)")]
    MissingResume,

    #[error("Resume is too short (at least {MIN_TEXT_CHARS} characters required)")]
    ResumeTooShort,

    #[error("Please provide a job description (paste text or upload a file)")]
    MissingJobDescription,

    #[error("Job description is too short (at least {MIN_TEXT_CHARS} characters required)")]
    JobDescriptionTooShort,
}

/// Checks every input and returns all violations, not just the first.
pub fn validate_inputs(
    credential: Option<&str>,
    resume: Option<&str>,
    job_description: Option<&str>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if credential.map_or(true, |c| c.trim().is_empty()) {
        errors.push(ValidationError::MissingCredential);
    }

    match trimmed_len(resume) {
        None => errors.push(ValidationError::MissingResume),
        Some(len) if len < MIN_TEXT_CHARS => errors.push(ValidationError::ResumeTooShort),
        Some(_) => {}
    }

    match trimmed_len(job_description) {
        None => errors.push(ValidationError::MissingJobDescription),
        Some(len) if len < MIN_TEXT_CHARS => {
            errors.push(ValidationError::JobDescriptionTooShort)
        }
        Some(_) => {}
    }

    errors
}

/// Character count after trimming; `None` for absent or blank text.
fn trimmed_len(text: Option<&str>) -> Option<usize> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().count())
}
