use serde::{Deserialize, Serialize};

use crate::interview::models::clean_list;

pub const MAX_ATS_SCORE: f64 = 100.0;

/// ATS evaluation of a resume. Every key is always present on the wire;
/// keys the model leaves out take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    #[serde(default)]
    pub ats_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

impl AtsReport {
    pub fn normalized(self) -> Self {
        let ats_score = if self.ats_score.is_finite() {
            self.ats_score.clamp(0.0, MAX_ATS_SCORE).round()
        } else {
            0.0
        };
        let mut missing_keywords = clean_list(self.missing_keywords);
        dedup_case_insensitive(&mut missing_keywords);
        Self {
            ats_score,
            strengths: clean_list(self.strengths),
            weaknesses: clean_list(self.weaknesses),
            improvements: clean_list(self.improvements),
            missing_keywords,
        }
    }
}

fn dedup_case_insensitive(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|k| seen.insert(k.to_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let report: AtsReport = serde_json::from_str(r#"{"atsScore": 72}"#).unwrap();
        let json = serde_json::to_value(report.normalized()).unwrap();
        assert_eq!(json["atsScore"], 72.0);
        for key in ["strengths", "weaknesses", "improvements", "missingKeywords"] {
            assert_eq!(json[key], serde_json::json!([]), "key {key}");
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let report: AtsReport =
            serde_json::from_str(r#"{"atsScore": 50, "verdict": "fine"}"#).unwrap();
        assert_eq!(report.ats_score, 50.0);
    }

    #[test]
    fn test_score_clamped_and_rounded() {
        let high = AtsReport {
            ats_score: 130.0,
            ..Default::default()
        };
        assert_eq!(high.normalized().ats_score, 100.0);

        let fractional = AtsReport {
            ats_score: 67.6,
            ..Default::default()
        };
        assert_eq!(fractional.normalized().ats_score, 68.0);
    }

    #[test]
    fn test_missing_keywords_deduplicated() {
        let report = AtsReport {
            missing_keywords: vec!["Docker".into(), "docker".into(), " ".into(), "CI/CD".into()],
            ..Default::default()
        }
        .normalized();
        assert_eq!(report.missing_keywords, vec!["Docker", "CI/CD"]);
    }
}
