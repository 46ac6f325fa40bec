use std::path::PathBuf;

use bytes::Bytes;
use deck_core::{ArtifactInfo, AttemptId, Effect, ErrorKind, GenerationFailure, Msg};
use deck_engine::{
    deliver_immediately, DeckRequest, DeliveryHandle, EngineEvent, EngineHandle, FailureKind,
    GeneratorSettings,
};
use deck_logging::{deck_debug, deck_error, deck_info, deck_warn};

/// Executes coordinator effects against the engine and holds custody of the
/// retrieved payload until it is delivered or revoked.
pub struct EffectRunner {
    engine: EngineHandle,
    out_dir: PathBuf,
    pending: Option<PendingArtifact>,
    staged: Option<(AttemptId, DeliveryHandle)>,
}

/// Payload parked between attempt completion and the delivery directive.
struct PendingArtifact {
    attempt: AttemptId,
    payload: Bytes,
}

impl EffectRunner {
    pub fn new(settings: GeneratorSettings, out_dir: PathBuf) -> Self {
        Self {
            engine: EngineHandle::new(settings),
            out_dir,
            pending: None,
            staged: None,
        }
    }

    /// Drain engine events, translating them into coordinator messages.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::Progress(progress) => {
                    deck_debug!(
                        "Attempt {} downloaded {} bytes",
                        progress.attempt,
                        progress.bytes
                    );
                }
                EngineEvent::AttemptCompleted { attempt, result } => {
                    let result = match result {
                        Ok(output) => {
                            self.pending = Some(PendingArtifact {
                                attempt,
                                payload: output.payload,
                            });
                            Ok(ArtifactInfo {
                                filename: output.filename,
                                byte_len: output.metadata.byte_len,
                            })
                        }
                        Err(err) => {
                            deck_warn!("Attempt {} failed: {}: {}", attempt, err.kind, err.message);
                            Err(GenerationFailure {
                                kind: map_failure(&err.kind),
                                detail: err.message,
                            })
                        }
                    };
                    msgs.push(Msg::GenerationFinished { attempt, result });
                }
            }
        }
        msgs
    }

    /// Execute effects; returns any follow-up messages for the coordinator.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartGeneration { attempt, request } => {
                    deck_info!(
                        "StartGeneration attempt={} topic={} slides={}",
                        attempt,
                        request.topic(),
                        request.slides()
                    );
                    self.engine.generate(
                        attempt,
                        DeckRequest {
                            topic: request.topic().to_string(),
                            slides: request.slides(),
                        },
                    );
                }
                Effect::DeliverImmediately { file_ref, filename } => {
                    match self.take_payload(file_ref) {
                        Some(payload) => {
                            match deliver_immediately(&payload, &filename, &self.out_dir) {
                                Ok(target) => deck_info!("Artifact saved to {:?}", target),
                                Err(err) => {
                                    deck_error!("Failed to save artifact {}: {}", filename, err)
                                }
                            }
                        }
                        None => deck_warn!("No payload in custody for attempt {}", file_ref),
                    }
                }
                Effect::OpenDelivery { handoff } => {
                    let staged = handoff
                        .file_ref
                        .zip(handoff.filename.clone())
                        .and_then(|(file_ref, filename)| {
                            let payload = self.take_payload(file_ref)?;
                            match DeliveryHandle::stage(&payload, filename) {
                                Ok(handle) => Some((file_ref, handle)),
                                Err(err) => {
                                    deck_error!("Failed to stage artifact: {}", err);
                                    None
                                }
                            }
                        });
                    match staged {
                        Some(staged) => {
                            self.staged = Some(staged);
                            follow_ups.push(Msg::DeliveryMounted {
                                handoff: Some(handoff),
                            });
                        }
                        // Nothing staged; the mount guard redirects.
                        None => follow_ups.push(Msg::DeliveryMounted { handoff: None }),
                    }
                }
                Effect::SaveArtifact { file_ref, filename } => match &self.staged {
                    Some((staged_ref, handle)) if *staged_ref == file_ref => {
                        match handle.save_to(&self.out_dir) {
                            Ok(target) => deck_info!("Artifact saved to {:?}", target),
                            Err(err) => deck_error!("Failed to save artifact {}: {}", filename, err),
                        }
                    }
                    _ => deck_warn!("No staged artifact for reference {}", file_ref),
                },
                Effect::RevokeHandle { file_ref } => {
                    if self
                        .pending
                        .as_ref()
                        .is_some_and(|pending| pending.attempt == file_ref)
                    {
                        self.pending = None;
                    }
                    match self.staged.take() {
                        Some((staged_ref, mut handle)) if staged_ref == file_ref => {
                            if let Err(err) = handle.revoke() {
                                deck_warn!("Failed to revoke staged artifact: {}", err);
                            }
                        }
                        other => self.staged = other,
                    }
                }
                Effect::Notify { notice } => {
                    if notice.is_failure() {
                        deck_warn!("{}", notice.message());
                        eprintln!("{}", notice.message());
                    } else {
                        deck_info!("{}", notice.message());
                        println!("{}", notice.message());
                    }
                }
            }
        }
        follow_ups
    }

    fn take_payload(&mut self, file_ref: AttemptId) -> Option<Bytes> {
        match self.pending.take() {
            Some(pending) if pending.attempt == file_ref => Some(pending.payload),
            other => {
                self.pending = other;
                None
            }
        }
    }
}

fn map_failure(kind: &FailureKind) -> ErrorKind {
    match kind {
        FailureKind::Timeout => ErrorKind::Timeout,
        FailureKind::Connect => ErrorKind::NetworkUnreachable,
        FailureKind::HttpStatus(code) if (500..=599).contains(code) => ErrorKind::Server,
        FailureKind::HttpStatus(_) | FailureKind::InvalidEndpoint | FailureKind::Network => {
            ErrorKind::Unknown
        }
    }
}
