//! Narrative report assembly.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::prompt::{NarrativePrompt, NarrativeTopic};
use crate::models::AnalysisResult;

/// Errors a [`TextGenerator`] can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The text service could not be reached.
    #[error("Text generation unavailable: {message}")]
    Unavailable {
        /// Details from the transport.
        message: String,
    },

    /// The text service answered with a failure status.
    #[error("Text generation rejected with status {status}: {message}")]
    Rejected {
        /// The status code returned by the service.
        status: u16,
        /// Details returned by the service.
        message: String,
    },

    /// The text service answered without any text.
    #[error("Text generation returned no text")]
    EmptyResponse,
}

/// Turns a prompt into narrative text.
///
/// Implementations talk to whatever text service the application uses; the
/// engine itself performs no network calls.
pub trait TextGenerator {
    /// Generates text for one prompt.
    fn generate(&self, prompt: &NarrativePrompt) -> Result<String, GenerationError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, prompt: &NarrativePrompt) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

/// The result of generating one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    /// Text was generated.
    Generated {
        /// The generated text.
        text: String,
    },
    /// Generation failed.
    Failed {
        /// The generator's error message.
        error: String,
    },
}

/// One section of a [`NarrativeReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSection {
    /// The prompt sent to the generator.
    pub prompt: NarrativePrompt,
    /// What came back.
    pub outcome: SectionOutcome,
}

/// Narrative commentary for an analysis, one section per topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeReport {
    /// Sections in [`NarrativeTopic::ALL`] order.
    pub sections: Vec<NarrativeSection>,
}

impl NarrativeReport {
    /// Generates every section of the report.
    ///
    /// Each topic is attempted exactly once. A failed section is recorded as
    /// [`SectionOutcome::Failed`] and the remaining sections still run.
    pub fn generate<G: TextGenerator>(generator: &G, analysis: &AnalysisResult) -> Self {
        let sections = NarrativeTopic::ALL
            .iter()
            .map(|&topic| {
                let prompt = NarrativePrompt::build(topic, analysis);
                let outcome = match generator.generate(&prompt) {
                    Ok(text) => {
                        debug!(topic = %topic, chars = text.len(), "Narrative section generated");
                        SectionOutcome::Generated { text }
                    }
                    Err(err) => {
                        warn!(topic = %topic, error = %err, "Narrative section failed");
                        SectionOutcome::Failed {
                            error: err.to_string(),
                        }
                    }
                };
                NarrativeSection { prompt, outcome }
            })
            .collect();

        Self { sections }
    }

    /// Returns the section for `topic`.
    pub fn section(&self, topic: NarrativeTopic) -> Option<&NarrativeSection> {
        self.sections.iter().find(|s| s.prompt.topic == topic)
    }

    /// Number of sections whose generation failed.
    pub fn failure_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::Failed { .. }))
            .count()
    }
}
