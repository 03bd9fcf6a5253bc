use thiserror::Error;

pub const NO_INGREDIENTS_MESSAGE: &str = "No ingredients found.";
pub const TRANSPORT_MESSAGE: &str = "Error analyzing ingredients.";
pub const EMPTY_ANALYSIS_MESSAGE: &str = "No analysis available.";
pub const CANCELLED_MESSAGE: &str = "Analysis superseded by a newer request.";

/// Why an analysis attempt ended without a report. Every variant is terminal for the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no ingredient text found")]
    Scrape,
    #[error("analysis api returned errors: {message}")]
    Api { message: String },
    #[error("analysis request failed: {message}")]
    Transport { message: String },
    #[error("analysis contained no highlights")]
    EmptyAnalysis,
    #[error("analysis request cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn transport(message: impl Into<String>) -> Self {
        AnalysisError::Transport {
            message: message.into(),
        }
    }

    /// Text shown to the user in place of a report.
    pub fn status_message(&self) -> String {
        match self {
            AnalysisError::Scrape => NO_INGREDIENTS_MESSAGE.to_string(),
            AnalysisError::Api { message } => {
                format!("Error analyzing ingredients: {message}")
            }
            AnalysisError::Transport { .. } => TRANSPORT_MESSAGE.to_string(),
            AnalysisError::EmptyAnalysis => EMPTY_ANALYSIS_MESSAGE.to_string(),
            AnalysisError::Cancelled => CANCELLED_MESSAGE.to_string(),
        }
    }
}
