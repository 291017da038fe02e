use crate::batch::DEFAULT_WINDOW;
use crate::error::ReplayError;
use crate::event::{Event, EventTime, MessagePayload, NodeId, NodeState};
use crate::replay::Replay;

fn trace_events() -> Vec<Event> {
    let ms = |v: i64| EventTime::from_millis(v).0;
    vec![
        Event::Init {
            nodes: vec![NodeId(1), NodeId(2), NodeId(3)],
            edges: vec![(NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))],
        },
        Event::StateChange {
            node: Some(NodeId(1)),
            state: Some(NodeState::Proposer),
            timestamp: ms(0),
        },
        Event::MessageSent {
            msg: MessagePayload {
                sender: Some(NodeId(1)),
                target: Some(NodeId(2)),
                kind: Some("PROPOSE".to_string()),
            },
            timestamp: ms(10),
        },
        Event::StateChange {
            node: Some(NodeId(2)),
            state: Some(NodeState::Listener),
            timestamp: ms(50),
        },
        Event::Matched {
            node: Some(NodeId(1)),
            partner: Some(NodeId(2)),
            timestamp: ms(250),
        },
        Event::Matched {
            node: Some(NodeId(2)),
            partner: Some(NodeId(1)),
            timestamp: ms(260),
        },
    ]
}

#[test]
fn pipeline_replays_frames_in_order() {
    let mut replay = Replay::from_events(trace_events(), DEFAULT_WINDOW).expect("build replay");
    assert_eq!(replay.total_frames(), 2);

    let first = replay.advance().expect("first frame");
    assert_eq!(first.frame, 1);
    assert_eq!(
        first.title,
        "Time Window 1/2 | 1 Msgs | 2 State Updates | 0 Matches"
    );
    assert_eq!(first.messages.len(), 1);
    assert_eq!(replay.snapshot().matched_count(), 0);

    let second = replay.advance().expect("second frame");
    assert_eq!(second.frame, 2);
    assert_eq!(
        second.title,
        "Time Window 2/2 | 0 Msgs | 0 State Updates | 2 Matches"
    );
    // The in-flight message from frame 1 did not leak into frame 2.
    assert!(second.messages.is_empty());
    assert_eq!(replay.snapshot().matched_count(), 1);

    assert!(replay.advance().is_none());
    assert!(replay.advance().is_none());
}

#[test]
fn early_stop_is_a_normal_exit() {
    let mut replay = Replay::from_events(trace_events(), DEFAULT_WINDOW).expect("build replay");
    let _ = replay.advance().expect("one frame");
    assert_eq!(replay.frames_applied(), 1);
    // Dropping the replay mid-run must not panic or require cleanup.
    drop(replay);
}

#[test]
fn replay_is_an_iterator_over_scenes() {
    let replay = Replay::from_events(trace_events(), DEFAULT_WINDOW).expect("build replay");
    let titles: Vec<String> = replay.map(|scene| scene.title).collect();
    assert_eq!(titles.len(), 2);
    assert!(titles[0].starts_with("Time Window 1/2"));
}

#[test]
fn run_collects_every_scene() {
    let mut replay = Replay::from_events(trace_events(), DEFAULT_WINDOW).expect("build replay");
    let scenes = replay.run();
    assert_eq!(scenes.len(), 2);
    assert_eq!(replay.frames_applied(), 2);
}

#[test]
fn replay_output_is_deterministic() {
    let render = || {
        let mut replay =
            Replay::from_events(trace_events(), DEFAULT_WINDOW).expect("build replay");
        serde_json::to_string(&replay.run()).expect("serialize scenes")
    };
    assert_eq!(render(), render());
}

#[test]
fn window_parameter_reshapes_frames() {
    // A 1 second window swallows the whole trace into one frame.
    let mut replay =
        Replay::from_events(trace_events(), EventTime::from_secs(1)).expect("build replay");
    assert_eq!(replay.total_frames(), 1);
    let only = replay.advance().expect("single frame");
    assert_eq!(
        only.title,
        "Time Window 1/1 | 1 Msgs | 2 State Updates | 2 Matches"
    );
}

#[test]
fn missing_init_fails_before_any_frame() {
    let mut events = trace_events();
    events.remove(0);
    let err = Replay::from_events(events, DEFAULT_WINDOW).unwrap_err();
    assert!(matches!(err, ReplayError::MissingInit));
}

#[test]
fn strict_replay_rejects_unknown_nodes() {
    let mut events = trace_events();
    events.push(Event::StateChange {
        node: Some(NodeId(42)),
        state: Some(NodeState::Matched),
        timestamp: EventTime::from_millis(400).0,
    });
    let err = Replay::from_events_strict(events.clone(), DEFAULT_WINDOW).unwrap_err();
    assert!(matches!(err, ReplayError::UnknownNode(NodeId(42))));

    // The default pipeline stays permissive with the very same input.
    let mut replay = Replay::from_events(events, DEFAULT_WINDOW).expect("permissive replay");
    let scenes = replay.run();
    assert_eq!(scenes.len(), 3);
}
