//! Deckgen engine: generation requests and artifact delivery.
mod client;
mod delivery;
mod engine;
mod filename;
mod types;

pub use client::{
    ChannelProgressSink, Generator, GeneratorSettings, ProgressSink, ReqwestGenerator,
    DEFAULT_ENDPOINT,
};
pub use delivery::{
    deliver_immediately, ensure_output_dir, AtomicFileWriter, DeliveryError, DeliveryHandle,
};
pub use engine::EngineHandle;
pub use filename::{derive_filename, fallback_filename, filename_from_disposition};
pub use types::{
    AttemptId, AttemptProgress, DeckRequest, EngineEvent, FailureKind, GenerateError,
    GenerationOutput, ResponseMetadata,
};
