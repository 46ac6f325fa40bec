use std::sync::{mpsc, Arc};
use std::thread;

use crate::client::{ChannelProgressSink, Generator, GeneratorSettings, ReqwestGenerator};
use crate::{AttemptId, DeckRequest, EngineEvent, GenerateError, GenerationOutput};

enum EngineCommand {
    Generate {
        attempt: AttemptId,
        request: DeckRequest,
    },
}

/// Handle to the engine worker thread. Commands go in over a channel,
/// events come back over another; the shell polls with `try_recv`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GeneratorSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let generator = Arc::new(ReqwestGenerator::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(generator.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn generate(&self, attempt: AttemptId, request: DeckRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Generate { attempt, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    generator: &dyn Generator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { attempt, request } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result: Result<GenerationOutput, GenerateError> =
                generator.generate(attempt, &request, &sink).await;
            let _ = event_tx.send(EngineEvent::AttemptCompleted { attempt, result });
        }
    }
}
