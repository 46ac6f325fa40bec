//! Deckgen core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice};
pub use msg::Msg;
pub use state::{
    clamp_slide_count, slide_count_from_input, AppState, ArtifactInfo, AttemptId, DeliveryMode,
    DeliveryScreen, ErrorKind, GenerationFailure, GenerationRequest, Handoff, Phase, Route,
    SLIDE_COUNT_DEFAULT, SLIDE_COUNT_MAX, SLIDE_COUNT_MIN,
};
pub use update::update;
pub use view_model::{AppViewModel, ScreenView};
