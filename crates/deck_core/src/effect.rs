use crate::{AttemptId, ErrorKind, GenerationRequest, Handoff};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the generation request to the backend.
    StartGeneration {
        attempt: AttemptId,
        request: GenerationRequest,
    },
    /// Stage the retrieved payload, save it under `filename`, revoke the reference.
    DeliverImmediately {
        file_ref: AttemptId,
        filename: String,
    },
    /// Navigate to the delivery screen, carrying the hand-off.
    OpenDelivery { handoff: Handoff },
    /// Save the staged payload under `filename`. May fire more than once.
    SaveArtifact {
        file_ref: AttemptId,
        filename: String,
    },
    /// Release the staged payload reference without saving.
    RevokeHandle { file_ref: AttemptId },
    /// Show a status notification to the user.
    Notify { notice: Notice },
}

/// One user-visible status per completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Failure(ErrorKind),
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Success => {
                "Deck generated successfully. Your download should begin automatically."
            }
            Notice::Failure(ErrorKind::Validation) => {
                "Please enter a topic for your presentation."
            }
            Notice::Failure(ErrorKind::Timeout) => {
                "Request timed out. Please try again with a simpler topic."
            }
            Notice::Failure(ErrorKind::Server) => {
                "Server error. Please check if the backend is running."
            }
            Notice::Failure(ErrorKind::NetworkUnreachable) => {
                "Cannot connect to the server. Please ensure the backend endpoint is reachable."
            }
            Notice::Failure(ErrorKind::Unknown) => {
                "Failed to generate the deck. Please try again."
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}
