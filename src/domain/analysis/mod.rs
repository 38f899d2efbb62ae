//! Analysis results: wire shapes and the normalized display model

pub mod normalize;
pub mod raw;
pub mod view_model;

pub use raw::RawAnalysis;
pub use view_model::{
    AnalysisViewModel, CriticalSection, Insight, InsightSet, ProblematicSection, SummaryStats,
    Suggestion, SuggestionKind, TimelinePoint,
};
