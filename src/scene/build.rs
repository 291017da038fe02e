//! Scene construction for one frame.

use crate::state::{FrameCounters, Snapshot, TransientMessage};
use crate::topo::Topology;

use super::types::{
    COLOR_BACKGROUND_EDGE, COLOR_MATCHED_EDGE, COLOR_MESSAGE, Scene, SceneEdge, SceneMessage,
    SceneNode, state_color,
};

fn frame_title(frame_idx: usize, total: usize, counters: &FrameCounters) -> String {
    format!(
        "Time Window {}/{} | {} Msgs | {} State Updates | {} Matches",
        frame_idx + 1,
        total,
        counters.messages,
        counters.state_changes,
        counters.matches
    )
}

/// Build the drawable scene for one frame.
///
/// Pure function of (topology, accumulated snapshot, this frame's transient
/// messages); holds no memory of prior frames and is re-invocable at will.
/// Matched pairs or messages whose endpoints have no layout position are left
/// out of the drawable output rather than failing the frame.
pub fn build_scene(
    topo: &Topology,
    snapshot: &Snapshot,
    messages: &[TransientMessage],
    counters: &FrameCounters,
    frame_idx: usize,
    total_frames: usize,
) -> Scene {
    let nodes = topo
        .nodes()
        .iter()
        .map(|&id| {
            let pos = topo
                .position(id)
                .expect("layout covers every topology node");
            let state = snapshot
                .state(id)
                .expect("snapshot covers every topology node");
            SceneNode {
                id: id.0,
                x: pos.x,
                y: pos.y,
                state,
                color: state_color(state).to_string(),
            }
        })
        .collect();

    let mut edges: Vec<SceneEdge> = topo
        .edges()
        .iter()
        .map(|&(a, b)| SceneEdge {
            from: a.0,
            to: b.0,
            color: COLOR_BACKGROUND_EDGE.to_string(),
            width: 1.0,
        })
        .collect();
    for key in snapshot.matched_edges() {
        let (a, b) = key.endpoints();
        if topo.position(a).is_none() || topo.position(b).is_none() {
            continue;
        }
        edges.push(SceneEdge {
            from: a.0,
            to: b.0,
            color: COLOR_MATCHED_EDGE.to_string(),
            width: 3.0,
        });
    }

    let messages = messages
        .iter()
        .filter(|m| topo.position(m.sender).is_some() && topo.position(m.target).is_some())
        .map(|m| SceneMessage {
            from: m.sender.0,
            to: m.target.0,
            label: m.kind.clone().unwrap_or_default(),
            color: COLOR_MESSAGE.to_string(),
        })
        .collect();

    Scene {
        frame: frame_idx + 1,
        total_frames,
        title: frame_title(frame_idx, total_frames, counters),
        nodes,
        edges,
        messages,
    }
}
