//! Plain-text export of the stored analysis.

use chrono::NaiveDateTime;

use crate::report::numbered;
use crate::session::SessionSnapshot;

/// `resume_analysis_<YYYYMMDD_HHMMSS>.txt`
pub fn export_filename(generated_at: NaiveDateTime) -> String {
    format!(
        "resume_analysis_{}.txt",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Assembles every field of the analysis into one text report.
/// Empty lists produce empty sections.
pub fn export_text(snapshot: &SessionSnapshot, generated_at: NaiveDateTime) -> String {
    let analysis = &snapshot.analysis;
    format!(
        "
RESUME ANALYSIS REPORT
Generated: {generated}

SCORES:
- Overall Match: {overall}/100
- Skills Match: {skills}/100
- Experience Match: {experience}/100

SUMMARY:
{summary}

STRENGTHS:
{strengths}

WEAKNESSES:
{weaknesses}

MISSING SKILLS:
{missing}

RECOMMENDATIONS:
{recommendations}

RESUME KEYWORDS: {resume_keywords}
JOB KEYWORDS: {jd_keywords}
",
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        overall = analysis.match_score.value(),
        skills = analysis.skills_match.value(),
        experience = analysis.experience_match.value(),
        summary = analysis.summary.as_deref().unwrap_or("N/A"),
        strengths = bullets(&analysis.strengths),
        weaknesses = bullets(&analysis.weaknesses),
        missing = analysis.missing_skills.join(", "),
        recommendations = numbered(&analysis.suggestions).join("\n"),
        resume_keywords = snapshot.resume_keywords.join(", "),
        jd_keywords = snapshot.jd_keywords.join(", "),
    )
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("• {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}
