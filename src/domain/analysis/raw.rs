//! Wire-shape analysis payloads
//!
//! Every field is optional because the backend omits sections it could not
//! compute. Normalization into a displayable model happens in
//! [`super::normalize`]; nothing here applies defaults.

use serde::Deserialize;

/// A metric that arrives either as a number or a preformatted string
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Render for display. Whole numbers drop the decimal point.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Self::Number(n) => format!("{n:.1}"),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Top-level analysis result as returned by the result endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default)]
    pub drop_risks: Option<Vec<RawDropRisk>>,
    #[serde(default)]
    pub timeline: Option<Vec<RawTimelinePoint>>,
    #[serde(default)]
    pub summary: Option<RawSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDropRisk {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub risk: Option<Scalar>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimelinePoint {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub risk: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSummary {
    #[serde(default)]
    pub drop_risk: Option<Scalar>,
    #[serde(default)]
    pub jargon_density: Option<Scalar>,
    #[serde(default)]
    pub filler_words: Option<Scalar>,
    /// Older responses nest the same stats under a camelCase object
    #[serde(default)]
    pub stats: Option<RawNestedStats>,
    #[serde(default)]
    pub suggestions: Option<Vec<RawSuggestion>>,
    #[serde(default)]
    pub insights: Option<RawInsights>,
    #[serde(default)]
    pub problematic_section: Option<RawProblematicSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNestedStats {
    #[serde(default)]
    pub drop_risk: Option<Scalar>,
    #[serde(default)]
    pub jargon_density: Option<Scalar>,
    #[serde(default)]
    pub filler_words: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSuggestion {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind_hint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInsights {
    #[serde(default)]
    pub jargon: Option<RawInsight>,
    #[serde(default)]
    pub explanation: Option<RawInsight>,
    #[serde(default)]
    pub monotone: Option<RawInsight>,
    #[serde(default)]
    pub fillers: Option<RawInsight>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInsight {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProblematicSection {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_deserializes() {
        let raw: RawAnalysis = serde_json::from_str("{}").unwrap();
        assert!(raw.drop_risks.is_none());
        assert!(raw.timeline.is_none());
        assert!(raw.summary.is_none());
    }

    #[test]
    fn scalar_accepts_number_and_string() {
        let n: Scalar = serde_json::from_str("42").unwrap();
        assert_eq!(n.to_display_string(), "42");

        let f: Scalar = serde_json::from_str("3.25").unwrap();
        assert_eq!(f.to_display_string(), "3.2");

        let s: Scalar = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(s.to_display_string(), "High");
    }

    #[test]
    fn nested_stats_use_camel_case() {
        let json = r#"{"stats": {"dropRisk": 55, "jargonDensity": "Low"}}"#;
        let summary: RawSummary = serde_json::from_str(json).unwrap();
        let stats = summary.stats.unwrap();
        assert_eq!(stats.drop_risk, Some(Scalar::Number(55.0)));
        assert_eq!(stats.jargon_density, Some(Scalar::Text("Low".into())));
        assert!(stats.filler_words.is_none());
    }

    #[test]
    fn suggestion_type_field_maps_to_kind_hint() {
        let json = r#"{"title": "Slow down", "type": "pacing"}"#;
        let suggestion: RawSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.kind_hint.as_deref(), Some("pacing"));
        assert!(suggestion.description.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"timeline": [], "model_version": "v3"}"#;
        assert!(serde_json::from_str::<RawAnalysis>(json).is_ok());
    }
}
