use crate::{
    slide_count_from_input, AppState, DeliveryMode, DeliveryScreen, Effect, ErrorKind,
    GenerationRequest, Handoff, Msg, Notice, Phase, Route, SLIDE_COUNT_DEFAULT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicChanged(text) => {
            // Inputs are frozen while a request is in flight.
            if state.phase() == Phase::Generating {
                return (state, Vec::new());
            }
            state.set_topic(text);
            Vec::new()
        }
        Msg::SlidesChanged(raw) => {
            if state.phase() == Phase::Generating {
                return (state, Vec::new());
            }
            state.set_slide_count(slide_count_from_input(&raw));
            Vec::new()
        }
        Msg::GenerateClicked => {
            // A submit while Generating is a no-op, not a queued request.
            if state.phase() == Phase::Generating {
                return (state, Vec::new());
            }
            match GenerationRequest::new(state.topic(), state.slide_count()) {
                None => vec![Effect::Notify {
                    notice: Notice::Failure(ErrorKind::Validation),
                }],
                Some(request) => {
                    let attempt = state.begin_attempt();
                    vec![Effect::StartGeneration { attempt, request }]
                }
            }
        }
        Msg::GenerationFinished { attempt, result } => {
            if state.in_flight() != Some(attempt) {
                // Stale completion; the attempt it belongs to is gone.
                return (state, Vec::new());
            }
            match result {
                Ok(artifact) => {
                    let topic = state.topic().trim().to_string();
                    let slide_count = state.slide_count();
                    state.reset_inputs();
                    match state.delivery_mode() {
                        DeliveryMode::Immediate => {
                            state.finish_attempt(Phase::Idle);
                            vec![
                                Effect::DeliverImmediately {
                                    file_ref: attempt,
                                    filename: artifact.filename,
                                },
                                Effect::Notify {
                                    notice: Notice::Success,
                                },
                            ]
                        }
                        DeliveryMode::Deferred => {
                            state.finish_attempt(Phase::Done);
                            vec![
                                Effect::OpenDelivery {
                                    handoff: Handoff::complete(
                                        attempt,
                                        artifact.filename,
                                        topic,
                                        slide_count,
                                    ),
                                },
                                Effect::Notify {
                                    notice: Notice::Success,
                                },
                            ]
                        }
                    }
                }
                Err(failure) => {
                    // Inputs are left untouched so the user can retry unchanged.
                    state.finish_attempt(Phase::Idle);
                    vec![Effect::Notify {
                        notice: Notice::Failure(failure.kind),
                    }]
                }
            }
        }
        Msg::DeliveryMounted { handoff } => match handoff {
            Some(Handoff {
                file_ref: Some(file_ref),
                filename: Some(filename),
                topic,
                slide_count,
            }) => {
                state.open_delivery(DeliveryScreen {
                    file_ref,
                    filename,
                    topic: topic.unwrap_or_default(),
                    slide_count: slide_count.unwrap_or(SLIDE_COUNT_DEFAULT),
                });
                Vec::new()
            }
            incomplete => {
                // Broken hand-off: redirect to the entry screen and release
                // any dangling payload reference.
                state.close_delivery();
                match incomplete.and_then(|handoff| handoff.file_ref) {
                    Some(file_ref) => vec![Effect::RevokeHandle { file_ref }],
                    None => Vec::new(),
                }
            }
        },
        Msg::SaveClicked => match state.route() {
            Route::Delivery(screen) => vec![Effect::SaveArtifact {
                file_ref: screen.file_ref,
                filename: screen.filename.clone(),
            }],
            Route::Generator => Vec::new(),
        },
        Msg::BackToGeneratorClicked => match state.route() {
            Route::Delivery(screen) => {
                let file_ref = screen.file_ref;
                state.close_delivery();
                vec![Effect::RevokeHandle { file_ref }]
            }
            Route::Generator => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
