//! Report Presenter — maps a stored analysis to a display view and a text export.

pub mod export;
pub mod handlers;

use serde::Serialize;

use crate::analysis::result::Score;
use crate::session::SessionSnapshot;

const BAR_WIDTH: usize = 20;
const NO_GAPS_NOTICE: &str = "No major missing skills identified!";
const NO_SUMMARY: &str = "No summary available";

/// Display tier shared by all three scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    /// 80, 60 and 40 are inclusive lower bounds.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            40..=59 => ScoreTier::Fair,
            _ => ScoreTier::Poor,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "🟢",
            ScoreTier::Good => "🟡",
            ScoreTier::Fair => "🟠",
            ScoreTier::Poor => "🔴",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "#28a745",
            ScoreTier::Good => "#ffc107",
            ScoreTier::Fair => "#fd7e14",
            ScoreTier::Poor => "#dc3545",
        }
    }
}

/// Fixed-width bar, e.g. `██████████████░░░░░░ 72/100`.
pub fn score_bar(score: u8) -> String {
    let filled = (score as usize / 5).min(BAR_WIDTH);
    format!(
        "{}{} {}/100",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        score
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    pub label: &'static str,
    pub score: u8,
    pub tier: ScoreTier,
    pub marker: &'static str,
    pub color: &'static str,
    pub bar: String,
}

impl ScoreCard {
    fn new(label: &'static str, score: Score) -> Self {
        let score = score.value();
        let tier = ScoreTier::from_score(score);
        Self {
            label,
            score,
            tier,
            marker: tier.marker(),
            color: tier.color(),
            bar: score_bar(score),
        }
    }
}

/// Missing skills render side by side, or as a single positive notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissingSkillsView {
    Gaps { skills: Vec<String> },
    NoGaps { notice: &'static str },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub analysis_id: uuid::Uuid,
    pub model: String,
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
    pub scores: [ScoreCard; 3],
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_skills: MissingSkillsView,
    /// Suggestions numbered from 1.
    pub recommendations: Vec<String>,
    pub resume_keywords: Vec<String>,
    pub jd_keywords: Vec<String>,
}

impl ReportView {
    pub fn overall(&self) -> &ScoreCard {
        &self.scores[0]
    }
}

pub fn render_report(snapshot: &SessionSnapshot) -> ReportView {
    let analysis = &snapshot.analysis;

    let missing_skills = if analysis.missing_skills.is_empty() {
        MissingSkillsView::NoGaps {
            notice: NO_GAPS_NOTICE,
        }
    } else {
        MissingSkillsView::Gaps {
            skills: analysis.missing_skills.clone(),
        }
    };

    ReportView {
        analysis_id: snapshot.id,
        model: snapshot.model.clone(),
        analyzed_at: snapshot.analyzed_at,
        scores: [
            ScoreCard::new("Overall Match", analysis.match_score),
            ScoreCard::new("Skills Match", analysis.skills_match),
            ScoreCard::new("Experience Match", analysis.experience_match),
        ],
        summary: analysis
            .summary
            .clone()
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        strengths: analysis.strengths.clone(),
        weaknesses: analysis.weaknesses.clone(),
        missing_skills,
        recommendations: numbered(&analysis.suggestions),
        resume_keywords: snapshot.resume_keywords.clone(),
        jd_keywords: snapshot.jd_keywords.clone(),
    }
}

pub(crate) fn numbered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect()
}
