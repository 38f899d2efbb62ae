//! Display-ready analysis model
//!
//! Every field is guaranteed renderable: no options, no missing sections.
//! The zero model is what a dashboard shows before any analysis has run.

/// One point on the engagement-risk timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    pub time: String,
    /// Risk percentage, 0 to 100
    pub risk: u8,
    pub label: Option<String>,
}

/// The highest-risk span of the recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalSection {
    pub start: String,
    pub end: String,
    pub risk: String,
}

impl CriticalSection {
    pub fn zero() -> Self {
        Self {
            start: "0:00".into(),
            end: "0:00".into(),
            risk: "0%".into(),
        }
    }
}

/// Headline stats for the summary panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    pub drop_risk: String,
    pub jargon_density: String,
    pub filler_words: String,
}

impl SummaryStats {
    pub fn zero() -> Self {
        Self {
            drop_risk: "0%".into(),
            jargon_density: "0".into(),
            filler_words: "0".into(),
        }
    }
}

/// Category a suggestion falls under, derived from the backend's free-form
/// type hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestionKind {
    Simplify,
    Example,
    Delivery,
    Pacing,
    #[default]
    Other,
}

impl SuggestionKind {
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(str::to_ascii_lowercase).as_deref() {
            Some("simplify" | "clarity" | "jargon") => Self::Simplify,
            Some("example" | "analogy" | "engagement") => Self::Example,
            Some("delivery" | "tone" | "energy" | "monotone" | "pause") => Self::Delivery,
            Some("pacing" | "speed" | "rate") => Self::Pacing,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblematicSection {
    pub range: String,
    pub title: String,
    pub description: String,
}

impl ProblematicSection {
    /// Shown when the analysis found nothing problematic
    pub fn default_ok() -> Self {
        Self {
            range: "N/A".into(),
            title: "No critical section detected".into(),
            description: "Your speech flow looks good.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub title: String,
    pub desc: String,
}

impl Insight {
    fn placeholder(title: &str) -> Self {
        Self {
            title: title.into(),
            desc: "No data available".into(),
        }
    }
}

/// The four fixed insight categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightSet {
    pub jargon: Insight,
    pub explanation: Insight,
    pub monotone: Insight,
    pub fillers: Insight,
}

impl InsightSet {
    pub fn placeholders() -> Self {
        Self {
            jargon: Insight::placeholder("Jargon"),
            explanation: Insight::placeholder("Explanation"),
            monotone: Insight::placeholder("Monotone"),
            fillers: Insight::placeholder("Fillers"),
        }
    }
}

/// Complete renderable analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisViewModel {
    pub timeline: Vec<TimelinePoint>,
    pub critical_section: CriticalSection,
    pub stats: SummaryStats,
    pub suggestions: Vec<Suggestion>,
    pub problematic_section: ProblematicSection,
    pub insights: InsightSet,
}

impl AnalysisViewModel {
    /// The pre-analysis model
    pub fn zero() -> Self {
        Self {
            timeline: Vec::new(),
            critical_section: CriticalSection::zero(),
            stats: SummaryStats::zero(),
            suggestions: Vec::new(),
            problematic_section: ProblematicSection {
                range: "N/A".into(),
                title: "No analysis yet".into(),
                description: "Upload an audio file to see analysis.".into(),
            },
            insights: InsightSet::placeholders(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_model_has_safe_fields() {
        let model = AnalysisViewModel::zero();
        assert!(model.timeline.is_empty());
        assert!(model.suggestions.is_empty());
        assert_eq!(model.critical_section.risk, "0%");
        assert_eq!(model.stats.drop_risk, "0%");
        assert_eq!(model.insights.jargon.desc, "No data available");
        assert_eq!(model.problematic_section.title, "No analysis yet");
    }

    #[test]
    fn kind_from_known_hints() {
        assert_eq!(
            SuggestionKind::from_hint(Some("jargon")),
            SuggestionKind::Simplify
        );
        assert_eq!(
            SuggestionKind::from_hint(Some("Analogy")),
            SuggestionKind::Example
        );
        assert_eq!(
            SuggestionKind::from_hint(Some("MONOTONE")),
            SuggestionKind::Delivery
        );
        assert_eq!(
            SuggestionKind::from_hint(Some("speed")),
            SuggestionKind::Pacing
        );
    }

    #[test]
    fn kind_from_unknown_or_missing_hint() {
        assert_eq!(
            SuggestionKind::from_hint(Some("interpretive-dance")),
            SuggestionKind::Other
        );
        assert_eq!(SuggestionKind::from_hint(None), SuggestionKind::Other);
    }
}
