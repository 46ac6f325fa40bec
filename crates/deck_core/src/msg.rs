#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic input box.
    TopicChanged(String),
    /// User edited the slide-count input box (raw text).
    SlidesChanged(String),
    /// User asked for a deck to be generated.
    GenerateClicked,
    /// Engine completion for a generation attempt.
    GenerationFinished {
        attempt: crate::AttemptId,
        result: Result<crate::ArtifactInfo, crate::GenerationFailure>,
    },
    /// The delivery screen was opened with whatever hand-off survived navigation.
    DeliveryMounted { handoff: Option<crate::Handoff> },
    /// User clicked the download button on the delivery screen.
    SaveClicked,
    /// User left the delivery screen to start over.
    BackToGeneratorClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
