use std::sync::Once;

use deck_core::{
    update, AppState, ArtifactInfo, DeliveryMode, Effect, Handoff, Msg, Notice, Phase, ScreenView,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(deck_logging::initialize_for_tests);
}

/// Drive a deferred-mode state through a successful attempt, returning the
/// state plus the hand-off the coordinator emitted.
fn succeed_deferred(topic: &str, slides: &str) -> (AppState, Handoff) {
    let state = AppState::with_delivery_mode(DeliveryMode::Deferred);
    let (state, _) = update(state, Msg::TopicChanged(topic.to_string()));
    let (state, _) = update(state, Msg::SlidesChanged(slides.to_string()));
    let (state, effects) = update(state, Msg::GenerateClicked);
    let attempt = match &effects[..] {
        [Effect::StartGeneration { attempt, .. }] => *attempt,
        other => panic!("unexpected effects: {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            attempt,
            result: Ok(ArtifactInfo {
                filename: "deck.pptx".to_string(),
                byte_len: 16,
            }),
        },
    );

    let notices: Vec<_> = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Notify { .. }))
        .collect();
    assert_eq!(
        notices,
        vec![&Effect::Notify {
            notice: Notice::Success
        }]
    );

    let handoff = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::OpenDelivery { handoff } => Some(handoff.clone()),
            _ => None,
        })
        .expect("deferred success must open the delivery screen");
    (state, handoff)
}

#[test]
fn deferred_success_emits_complete_handoff_and_one_notification() {
    init_logging();
    let (state, handoff) = succeed_deferred("Machine Learning", "8");

    assert_eq!(state.view().phase, Phase::Done);
    assert!(handoff.is_complete());
    assert_eq!(handoff.file_ref, Some(1));
    assert_eq!(handoff.filename.as_deref(), Some("deck.pptx"));
    assert_eq!(handoff.topic.as_deref(), Some("Machine Learning"));
    assert_eq!(handoff.slide_count, Some(8));
}

#[test]
fn mounting_with_complete_handoff_shows_delivery_screen() {
    init_logging();
    let (state, handoff) = succeed_deferred("Machine Learning", "8");

    let (next, effects) = update(
        state,
        Msg::DeliveryMounted {
            handoff: Some(handoff),
        },
    );

    assert!(effects.is_empty());
    match next.view().screen {
        ScreenView::Delivery {
            filename,
            topic,
            slide_count,
        } => {
            assert_eq!(filename, "deck.pptx");
            assert_eq!(topic, "Machine Learning");
            assert_eq!(slide_count, 8);
        }
        other => panic!("unexpected screen: {other:?}"),
    }
}

#[test]
fn mounting_with_missing_handoff_redirects_to_entry() {
    init_logging();
    let (state, _handoff) = succeed_deferred("Machine Learning", "8");

    let (next, effects) = update(state, Msg::DeliveryMounted { handoff: None });

    assert!(effects.is_empty());
    assert!(matches!(next.view().screen, ScreenView::Generator { .. }));
    assert_eq!(next.view().phase, Phase::Idle);
}

#[test]
fn mounting_with_partial_handoff_redirects_and_revokes() {
    init_logging();
    let (state, handoff) = succeed_deferred("Machine Learning", "8");

    // Filename lost in transit; the reference must not leak.
    let broken = Handoff {
        filename: None,
        ..handoff
    };
    let (next, effects) = update(
        state,
        Msg::DeliveryMounted {
            handoff: Some(broken),
        },
    );

    assert_eq!(effects, vec![Effect::RevokeHandle { file_ref: 1 }]);
    assert!(matches!(next.view().screen, ScreenView::Generator { .. }));
}

#[test]
fn save_can_fire_repeatedly_for_the_same_artifact() {
    init_logging();
    let (state, handoff) = succeed_deferred("Machine Learning", "8");
    let (state, _) = update(
        state,
        Msg::DeliveryMounted {
            handoff: Some(handoff),
        },
    );

    let expected = Effect::SaveArtifact {
        file_ref: 1,
        filename: "deck.pptx".to_string(),
    };
    let (state, first) = update(state, Msg::SaveClicked);
    let (_state, second) = update(state, Msg::SaveClicked);

    assert_eq!(first, vec![expected.clone()]);
    assert_eq!(second, vec![expected]);
}

#[test]
fn leaving_the_delivery_screen_revokes_the_handle() {
    init_logging();
    let (state, handoff) = succeed_deferred("Machine Learning", "8");
    let (state, _) = update(
        state,
        Msg::DeliveryMounted {
            handoff: Some(handoff),
        },
    );

    let (next, effects) = update(state, Msg::BackToGeneratorClicked);

    assert_eq!(effects, vec![Effect::RevokeHandle { file_ref: 1 }]);
    assert!(matches!(next.view().screen, ScreenView::Generator { .. }));
    assert_eq!(next.view().phase, Phase::Idle);
}

#[test]
fn save_outside_delivery_screen_does_nothing() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = update(state.clone(), Msg::SaveClicked);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn deferred_success_resets_inputs_for_the_next_run() {
    init_logging();
    let (mut state, _handoff) = succeed_deferred("Machine Learning", "8");

    assert!(state.consume_dirty());
    match state.view().screen {
        ScreenView::Generator {
            topic, slide_count, ..
        } => {
            assert_eq!(topic, "");
            assert_eq!(slide_count, 5);
        }
        other => panic!("unexpected screen: {other:?}"),
    }
}
