use bevy::prelude::*;
use event_core::*;
use game_core::*;

mod common;
use common::*;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EventCorePlugin::default())
        .init_resource::<RecordingScene>()
        .init_resource::<RecordingDisplay>()
        .add_plugins(SpawnCyclePlugin::<RecordingScene, RecordingDisplay>::new(seeded_tuning(11)));
    app
}

fn send(app: &mut App, ev: GameEvent) {
    let frame = app.world().resource::<FrameCounter>().0;
    app.world_mut().resource_mut::<EventQueue>().push_game(ev, EventSourceTag::Test, frame);
    app.update();
}

fn active(app: &App) -> TargetHandle {
    app.world().resource::<Session>().state().active_target.expect("live target")
}

#[test]
fn reducer_drives_the_session() {
    let mut app = test_app();
    send(&mut app, GameEvent::StartSession);
    let h = active(&app);
    send(&mut app, GameEvent::TapHit(h));
    send(&mut app, GameEvent::HighlightFinished(h));
    let st = app.world().resource::<Session>().state().clone();
    assert_eq!(st.score, 1);
    assert!((st.duration - 4.5).abs() < 1e-6);
    assert!(matches!(app.world().resource::<LastOutcome>().0, Some(Outcome::Hit { score: 1, .. })));
    assert_eq!(app.world().resource::<RecordingScene>().spawns().len(), 2);
}

#[test]
fn same_frame_race_resolves_in_queue_order() {
    let mut app = test_app();
    send(&mut app, GameEvent::StartSession);
    let h = active(&app);
    let frame = app.world().resource::<FrameCounter>().0;
    {
        let mut q = app.world_mut().resource_mut::<EventQueue>();
        q.push_game(GameEvent::AnimationComplete(h), EventSourceTag::Scene, frame);
        q.push_game(GameEvent::TapHit(h), EventSourceTag::Input, frame);
    }
    app.update();
    let results: Vec<_> = app
        .world()
        .resource::<EventJournal>()
        .iter()
        .rev()
        .take(2)
        .map(|j| j.result.clone())
        .collect();
    // newest first: the tap was ignored, the completion handled
    assert_eq!(results, vec![EventResult::Ignored, EventResult::Handled]);
    assert_eq!(app.world().resource::<RecordingDisplay>().shown.last(), Some(&Shown::GameOver(0)));
}

#[test]
fn scene_failure_is_journaled_as_error() {
    let mut app = test_app();
    app.world_mut().resource_mut::<RecordingScene>().fail_spawns_after = Some(0);
    send(&mut app, GameEvent::StartSession);
    let frame = app.world().resource::<FrameCounter>().0;
    let journal = app.world().resource::<EventJournal>();
    let errors: Vec<_> = journal.errors_in_frame(frame).collect();
    assert_eq!(errors.len(), 1);
    match &errors[0].result {
        EventResult::Error(msg) => assert!(msg.contains("SpawnCycleHandler") && msg.contains("ship"), "{msg}"),
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn restart_key_after_game_over() {
    let mut app = test_app();
    app.add_event_middleware(KeyMappingMiddleware::with_default_gameplay());
    send(&mut app, GameEvent::StartSession);
    let h = active(&app);
    send(&mut app, GameEvent::AnimationComplete(h));
    assert!(app.world().resource::<Session>().state().game_over);

    let frame = app.world().resource::<FrameCounter>().0;
    app.world_mut().resource_mut::<EventQueue>().push(EventEnvelope::new(
        EventPayload::Input(InputEvent::KeyDown(KeyCode::KeyR)),
        EventSourceTag::Input,
        frame,
    ));
    app.update();
    let st = app.world().resource::<Session>().state();
    assert!(!st.game_over);
    assert_eq!(st.phase, Phase::InFlight);
}
