// Analysis prompt template and prompt-building utilities.

/// Leading characters of the résumé embedded in the prompt.
pub const RESUME_PROMPT_CHARS: usize = 2000;
/// Leading characters of the job description embedded in the prompt.
pub const JD_PROMPT_CHARS: usize = 1500;

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert resume analyst and recruiter. Analyze the following resume against the job description and provide a detailed analysis.

RESUME:
{resume_text}...

JOB DESCRIPTION:
{jd_text}...

RESUME KEYWORDS EXTRACTED: {resume_keywords}
JOB DESCRIPTION KEYWORDS: {jd_keywords}

Please provide your analysis in the following JSON format:
{
    "match_score": <0-100>,
    "skills_match": <0-100>,
    "experience_match": <0-100>,
    "strengths": ["strength 1", "strength 2", "strength 3"],
    "weaknesses": ["weakness 1", "weakness 2", "weakness 3"],
    "suggestions": ["suggestion 1", "suggestion 2", "suggestion 3"],
    "missing_skills": ["skill 1", "skill 2"],
    "summary": "Brief 2-3 sentence summary of the match"
}

IMPORTANT: Return ONLY valid JSON, no markdown or extra text. Be critical but fair. The match score should reflect how well the resume matches the job description."#;

/// Fills the analysis template.
///
/// Placeholders are substituted in a single pass so user text containing
/// `{jd_text}` or similar is never re-expanded.
pub fn build_analysis_prompt(
    resume_text: &str,
    jd_text: &str,
    resume_keywords: &[String],
    jd_keywords: &[String],
) -> String {
    let resume = truncate_chars(resume_text, RESUME_PROMPT_CHARS);
    let jd = truncate_chars(jd_text, JD_PROMPT_CHARS);
    let resume_kw = resume_keywords.join(", ");
    let jd_kw = jd_keywords.join(", ");

    let substitutions: [(&str, &str); 4] = [
        ("{resume_text}", resume),
        ("{jd_text}", jd),
        ("{resume_keywords}", &resume_kw),
        ("{jd_keywords}", &jd_kw),
    ];

    let mut prompt = String::with_capacity(ANALYSIS_PROMPT_TEMPLATE.len() + resume.len() + jd.len());
    let mut rest = ANALYSIS_PROMPT_TEMPLATE;
    'outer: while !rest.is_empty() {
        if let Some(open) = rest.find('{') {
            for (placeholder, value) in substitutions {
                if rest[open..].starts_with(placeholder) {
                    prompt.push_str(&rest[..open]);
                    prompt.push_str(value);
                    rest = &rest[open + placeholder.len()..];
                    continue 'outer;
                }
            }
            prompt.push_str(&rest[..=open]);
            rest = &rest[open + 1..];
        } else {
            prompt.push_str(rest);
            break;
        }
    }
    prompt
}

/// Returns at most `max` leading characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
