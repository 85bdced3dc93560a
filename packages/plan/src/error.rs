// ABOUTME: Error types for the plan package
// ABOUTME: Every failure maps to a fixed message suitable for end users

use thiserror::Error;

use archiai_ai::AIServiceError;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Project description is empty")]
    EmptyDescription,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Blocked by safety settings: {0}")]
    SafetyBlocked(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

impl PlanError {
    /// Message shown to the user; never contains raw provider output
    pub fn user_message(&self) -> &'static str {
        match self {
            PlanError::EmptyDescription => "Please provide a project description.",
            PlanError::Transport(_) => {
                "There was a problem communicating with the AI service. Please check your connection and try again."
            }
            PlanError::SafetyBlocked(_) => {
                "The request was blocked due to safety settings. Please modify your project description."
            }
            PlanError::Provider(_) => "Failed to get a valid response from the AI. Please try again.",
            PlanError::MalformedOutput(_) => {
                "Failed to parse the AI's response. The output was not in the expected format. Please try again."
            }
        }
    }
}

impl From<AIServiceError> for PlanError {
    fn from(err: AIServiceError) -> Self {
        match err {
            AIServiceError::SafetyBlocked(reason) => PlanError::SafetyBlocked(reason),
            err if err.is_transport() => PlanError::Transport(err.to_string()),
            err => PlanError::Provider(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_are_classified() {
        assert!(matches!(
            PlanError::from(AIServiceError::Timeout(120)),
            PlanError::Transport(_)
        ));
        assert!(matches!(
            PlanError::from(AIServiceError::SafetyBlocked("SAFETY".into())),
            PlanError::SafetyBlocked(_)
        ));
        assert!(matches!(
            PlanError::from(AIServiceError::InvalidResponse("no candidates".into())),
            PlanError::Provider(_)
        ));
        assert!(matches!(
            PlanError::from(AIServiceError::ApiError {
                status: 503,
                message: "overloaded".into()
            }),
            PlanError::Provider(_)
        ));
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = PlanError::MalformedOutput("expected value at line 1 column 1".into());
        assert!(!err.user_message().contains("line 1"));
        assert_eq!(
            PlanError::EmptyDescription.user_message(),
            "Please provide a project description."
        );
    }
}
