//! The structured analysis returned by the model.
//!
//! Scores are only 0–100 by prompt contract, so decoding is lenient: a score
//! that is missing or not numeric decodes to `None`, and list fields accept any
//! JSON array. Range enforcement happens when rendering via [`Score::value`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A model-reported score. Out-of-range and missing values render as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(#[serde(deserialize_with = "lenient_score")] pub Option<i64>);

impl Score {
    pub fn new(value: i64) -> Self {
        Score(Some(value))
    }

    /// The displayable 0–100 value.
    pub fn value(self) -> u8 {
        match self.0 {
            Some(v) if (0..=100).contains(&v) => v as u8,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub match_score: Score,
    #[serde(default)]
    pub skills_match: Score,
    #[serde(default)]
    pub experience_match: Score,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_summary")]
    pub summary: Option<String>,
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64)),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

fn lenient_summary<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reply_deserializes() {
        let json = r#"{
            "match_score": 72,
            "skills_match": 65,
            "experience_match": 80,
            "strengths": ["Rust", "Leadership"],
            "weaknesses": ["No cloud"],
            "suggestions": ["Add metrics"],
            "missing_skills": ["Kubernetes"],
            "summary": "Solid fit."
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.match_score.value(), 72);
        assert_eq!(result.skills_match.value(), 65);
        assert_eq!(result.experience_match.value(), 80);
        assert_eq!(result.strengths, vec!["Rust", "Leadership"]);
        assert_eq!(result.missing_skills, vec!["Kubernetes"]);
        assert_eq!(result.summary.as_deref(), Some("Solid fit."));
    }

    #[test]
    fn test_missing_fields_default() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.match_score.value(), 0);
        assert!(result.strengths.is_empty());
        assert!(result.summary.is_none());
    }

    #[test]
    fn test_out_of_range_scores_render_as_zero() {
        let json = r#"{"match_score": 140, "skills_match": -3, "experience_match": "n/a"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.match_score.value(), 0);
        assert_eq!(result.skills_match.value(), 0);
        assert_eq!(result.experience_match.value(), 0);
    }

    #[test]
    fn test_float_and_string_scores_are_accepted() {
        let json = r#"{"match_score": 72.9, "skills_match": "65", "experience_match": null}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.match_score.value(), 72);
        assert_eq!(result.skills_match.value(), 65);
        assert_eq!(result.experience_match.value(), 0);
    }

    #[test]
    fn test_list_items_are_stringified() {
        let json = r#"{"strengths": ["ok", 3, null, true]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.strengths, vec!["ok", "3", "true"]);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_str::<AnalysisResult>("[1, 2]").is_err());
    }
}
