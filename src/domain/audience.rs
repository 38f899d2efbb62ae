//! Target audiences and audience-fit results

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::error::InvalidAudienceError;

/// Audience an analysis can be re-scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Audience {
    #[default]
    General,
    Students,
    Professionals,
    Interviews,
    Marketing,
}

impl Audience {
    pub const ALL: [Audience; 5] = [
        Self::General,
        Self::Students,
        Self::Professionals,
        Self::Interviews,
        Self::Marketing,
    ];

    /// Stable key used in API query strings and config files
    pub const fn key(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Students => "students",
            Self::Professionals => "professionals",
            Self::Interviews => "interviews",
            Self::Marketing => "marketing",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Students => "Students",
            Self::Professionals => "Professionals",
            Self::Interviews => "Interviews",
            Self::Marketing => "Marketing / Sales",
        }
    }

    /// Whether this audience is available without a pro entitlement
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::General)
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Audience {
    type Err = InvalidAudienceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "students" => Ok(Self::Students),
            "professionals" => Ok(Self::Professionals),
            "interviews" => Ok(Self::Interviews),
            "marketing" => Ok(Self::Marketing),
            _ => Err(InvalidAudienceError { input: s.into() }),
        }
    }
}

/// Structural-insight value, numeric or preformatted
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n:.1}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Audience-fit result returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudienceFit {
    #[serde(default)]
    pub audience: String,
    #[serde(default, deserialize_with = "clamp_score")]
    pub fit_score: u8,
    #[serde(default)]
    pub mismatches: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub structural_insights: BTreeMap<String, MetricValue>,
}

fn clamp_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() || raw < 0.0 {
        return Ok(0);
    }
    Ok(raw.min(100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_general_is_free() {
        for audience in Audience::ALL {
            assert_eq!(audience.is_free(), audience == Audience::General);
        }
    }

    #[test]
    fn key_round_trips_through_from_str() {
        for audience in Audience::ALL {
            assert_eq!(audience.key().parse::<Audience>().unwrap(), audience);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("Marketing".parse::<Audience>().unwrap(), Audience::Marketing);
        assert_eq!("STUDENTS".parse::<Audience>().unwrap(), Audience::Students);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "toddlers".parse::<Audience>().unwrap_err();
        assert!(err.to_string().contains("toddlers"));
    }

    #[test]
    fn fit_deserializes_full_payload() {
        let fit: AudienceFit = serde_json::from_str(
            r#"{
                "audience": "students",
                "fit_score": 72,
                "mismatches": ["Assumes prior statistics knowledge"],
                "suggestions": ["Define terms before using them"],
                "structural_insights": {"avg_sentence_length": 19.4, "tone": "formal"}
            }"#,
        )
        .unwrap();
        assert_eq!(fit.audience, "students");
        assert_eq!(fit.fit_score, 72);
        assert_eq!(fit.mismatches.len(), 1);
        assert_eq!(
            fit.structural_insights["avg_sentence_length"].to_string(),
            "19.4"
        );
        assert_eq!(fit.structural_insights["tone"].to_string(), "formal");
    }

    #[test]
    fn fit_lists_default_to_empty() {
        let fit: AudienceFit = serde_json::from_str(r#"{"fit_score": 50}"#).unwrap();
        assert!(fit.mismatches.is_empty());
        assert!(fit.suggestions.is_empty());
        assert!(fit.structural_insights.is_empty());
        assert!(fit.audience.is_empty());
    }

    #[test]
    fn fit_score_clamps() {
        let over: AudienceFit = serde_json::from_str(r#"{"fit_score": 180.5}"#).unwrap();
        assert_eq!(over.fit_score, 100);
        let under: AudienceFit = serde_json::from_str(r#"{"fit_score": -4}"#).unwrap();
        assert_eq!(under.fit_score, 0);
    }
}
