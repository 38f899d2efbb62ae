//! Raw-to-view-model normalization
//!
//! Conversion never fails. Anything missing or malformed falls back to a
//! documented default:
//! - timeline point: time "0:00", risk clamped to 0..=100, label dropped
//! - critical section: first drop risk, or the zero section
//! - stats: flat summary fields win over the nested camelCase object;
//!   drop_risk and jargon_density default to "N/A", filler_words to "0"
//! - suggestion: title "Suggestion", empty description
//! - problematic section: per-field fallback to the all-clear text
//! - insights: per-category placeholder with "No data available"

use super::raw::{RawAnalysis, RawInsight, RawSummary, Scalar};
use super::view_model::{
    AnalysisViewModel, CriticalSection, Insight, InsightSet, ProblematicSection, SummaryStats,
    Suggestion, SuggestionKind, TimelinePoint,
};

impl AnalysisViewModel {
    /// Build a fully-renderable model from whatever the backend returned
    pub fn from_raw(raw: RawAnalysis) -> Self {
        let timeline = raw
            .timeline
            .unwrap_or_default()
            .into_iter()
            .map(|point| TimelinePoint {
                time: point.time.unwrap_or_else(|| "0:00".into()),
                risk: clamp_risk(point.risk),
                label: point.label,
            })
            .collect();

        let critical_section = raw
            .drop_risks
            .as_ref()
            .and_then(|risks| risks.first())
            .map(|first| CriticalSection {
                start: first.start.clone().unwrap_or_else(|| "0:00".into()),
                end: first.end.clone().unwrap_or_else(|| "0:00".into()),
                risk: first
                    .risk
                    .as_ref()
                    .map(Scalar::to_display_string)
                    .unwrap_or_else(|| "0%".into()),
            })
            .unwrap_or_else(CriticalSection::zero);

        let summary = raw.summary.unwrap_or_default();

        Self {
            timeline,
            critical_section,
            stats: normalize_stats(&summary),
            suggestions: normalize_suggestions(&summary),
            problematic_section: normalize_problematic(&summary),
            insights: normalize_insights(&summary),
        }
    }
}

fn clamp_risk(risk: Option<f64>) -> u8 {
    match risk {
        Some(r) if r.is_finite() && r > 0.0 => r.floor().min(100.0) as u8,
        _ => 0,
    }
}

fn normalize_stats(summary: &RawSummary) -> SummaryStats {
    let nested = summary.stats.clone().unwrap_or_default();
    let pick = |flat: &Option<Scalar>, nested: Option<Scalar>, default: &str| {
        flat.clone()
            .or(nested)
            .map(|s| s.to_display_string())
            .unwrap_or_else(|| default.into())
    };
    SummaryStats {
        drop_risk: pick(&summary.drop_risk, nested.drop_risk, "N/A"),
        jargon_density: pick(&summary.jargon_density, nested.jargon_density, "N/A"),
        filler_words: pick(&summary.filler_words, nested.filler_words, "0"),
    }
}

fn normalize_suggestions(summary: &RawSummary) -> Vec<Suggestion> {
    summary
        .suggestions
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|raw| Suggestion {
            kind: SuggestionKind::from_hint(raw.kind_hint.as_deref()),
            title: raw.title.unwrap_or_else(|| "Suggestion".into()),
            description: raw.description.unwrap_or_default(),
        })
        .collect()
}

fn normalize_problematic(summary: &RawSummary) -> ProblematicSection {
    let ok = ProblematicSection::default_ok();
    match &summary.problematic_section {
        Some(raw) => ProblematicSection {
            range: raw.range.clone().unwrap_or(ok.range),
            title: raw.title.clone().unwrap_or(ok.title),
            description: raw.description.clone().unwrap_or(ok.description),
        },
        None => ok,
    }
}

fn normalize_insights(summary: &RawSummary) -> InsightSet {
    let placeholders = InsightSet::placeholders();
    let fill = |raw: &Option<RawInsight>, placeholder: Insight| match raw {
        Some(insight) => Insight {
            title: insight.title.clone().unwrap_or(placeholder.title),
            desc: insight.desc.clone().unwrap_or(placeholder.desc),
        },
        None => placeholder,
    };
    match &summary.insights {
        Some(raw) => InsightSet {
            jargon: fill(&raw.jargon, placeholders.jargon),
            explanation: fill(&raw.explanation, placeholders.explanation),
            monotone: fill(&raw.monotone, placeholders.monotone),
            fillers: fill(&raw.fillers, placeholders.fillers),
        },
        None => placeholders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> AnalysisViewModel {
        AnalysisViewModel::from_raw(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn empty_payload_yields_all_defaults() {
        let model = from_json("{}");
        assert!(model.timeline.is_empty());
        assert_eq!(model.critical_section, CriticalSection::zero());
        assert_eq!(model.stats.drop_risk, "N/A");
        assert_eq!(model.stats.jargon_density, "N/A");
        assert_eq!(model.stats.filler_words, "0");
        assert!(model.suggestions.is_empty());
        assert_eq!(model.problematic_section, ProblematicSection::default_ok());
        assert_eq!(model.insights, InsightSet::placeholders());
    }

    #[test]
    fn full_payload_maps_through() {
        let model = from_json(
            r#"{
                "drop_risks": [
                    {"start": "1:10", "end": "1:40", "risk": 82, "description": "dense"}
                ],
                "timeline": [
                    {"time": "0:30", "risk": 41.7, "label": "intro"}
                ],
                "summary": {
                    "drop_risk": "70%",
                    "jargon_density": "High",
                    "filler_words": 12,
                    "suggestions": [
                        {"title": "Slow down", "description": "Pause more", "type": "pacing"}
                    ],
                    "insights": {
                        "jargon": {"title": "Jargon", "desc": "Heavy in the middle"}
                    },
                    "problematic_section": {
                        "range": "1:10-1:40",
                        "title": "Dense passage",
                        "description": "Too many terms at once."
                    }
                }
            }"#,
        );

        assert_eq!(model.timeline[0].time, "0:30");
        assert_eq!(model.timeline[0].risk, 41);
        assert_eq!(model.critical_section.start, "1:10");
        assert_eq!(model.critical_section.risk, "82");
        assert_eq!(model.stats.drop_risk, "70%");
        assert_eq!(model.stats.filler_words, "12");
        assert_eq!(model.suggestions[0].kind, SuggestionKind::Pacing);
        assert_eq!(model.insights.jargon.desc, "Heavy in the middle");
        assert_eq!(model.insights.monotone.desc, "No data available");
        assert_eq!(model.problematic_section.range, "1:10-1:40");
    }

    #[test]
    fn nested_stats_shape_is_accepted() {
        let model = from_json(
            r#"{"summary": {"stats": {"dropRisk": 64, "fillerWords": 3}}}"#,
        );
        assert_eq!(model.stats.drop_risk, "64");
        assert_eq!(model.stats.filler_words, "3");
        assert_eq!(model.stats.jargon_density, "N/A");
    }

    #[test]
    fn flat_stats_win_over_nested() {
        let model = from_json(
            r#"{"summary": {
                "drop_risk": "70%",
                "stats": {"dropRisk": 10, "jargonDensity": "Low"}
            }}"#,
        );
        assert_eq!(model.stats.drop_risk, "70%");
        assert_eq!(model.stats.jargon_density, "Low");
    }

    #[test]
    fn timeline_points_fill_per_field_defaults() {
        let model = from_json(
            r#"{"timeline": [{"risk": 140.9}, {"time": "2:00", "risk": -3}]}"#,
        );
        assert_eq!(model.timeline[0].time, "0:00");
        assert_eq!(model.timeline[0].risk, 100);
        assert_eq!(model.timeline[1].risk, 0);
        assert!(model.timeline[1].label.is_none());
    }

    #[test]
    fn first_drop_risk_becomes_critical_section() {
        let model = from_json(
            r#"{"drop_risks": [{"start": "0:45", "risk": 82}, {"start": "3:00", "risk": 95}]}"#,
        );
        assert_eq!(model.critical_section.start, "0:45");
        assert_eq!(model.critical_section.end, "0:00");
        assert_eq!(model.critical_section.risk, "82");
    }

    #[test]
    fn suggestion_fields_default_individually() {
        let model = from_json(r#"{"summary": {"suggestions": [{"type": "clarity"}]}}"#);
        assert_eq!(model.suggestions[0].title, "Suggestion");
        assert_eq!(model.suggestions[0].description, "");
        assert_eq!(model.suggestions[0].kind, SuggestionKind::Simplify);
    }
}
