//! Narrative commentary over analysis results.
//!
//! Prompts are built from an [`AnalysisResult`](crate::models::AnalysisResult)
//! and handed to a caller-supplied [`TextGenerator`]. The engine never calls a
//! text service itself.

mod prompt;
mod report;

pub use prompt::{
    COST_EFFICIENCY_ROW_LIMIT, CRITICAL_DAYS_ROW_LIMIT, NarrativePrompt, NarrativeTable,
    NarrativeTopic, OVERTIME_RATIO_MONTH_LIMIT, WORKLOAD_ROW_LIMIT,
};
pub use report::{GenerationError, NarrativeReport, NarrativeSection, SectionOutcome, TextGenerator};
