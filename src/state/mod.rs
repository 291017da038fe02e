//! Accumulated replay state.
//!
//! The snapshot is the only mutable resource in the pipeline, with exactly
//! one writer (frame application, once per frame, in frame order) and one
//! reader (the scene builder, after application). All persistence lives
//! here; in-flight messages are frame-local and never survive a frame.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::batch::Frame;
use crate::event::{Event, NodeId, NodeState};
use crate::topo::Topology;

/// Canonicalized unordered node pair. `new` refuses self-loops, so a
/// self-match can never materialize as an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeKey {
    a: NodeId,
    b: NodeId,
}

impl EdgeKey {
    pub fn new(x: NodeId, y: NodeId) -> Option<EdgeKey> {
        if x == y {
            return None;
        }
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Some(EdgeKey { a, b })
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }
}

/// An in-flight message drawn for one frame only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub sender: NodeId,
    pub target: NodeId,
    pub kind: Option<String>,
}

/// Frame-scoped counters for the title/telemetry line. Reset every frame;
/// never cumulative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCounters {
    pub state_changes: u64,
    pub messages: u64,
    pub matches: u64,
}

/// Everything one frame produced beyond the snapshot mutation.
#[derive(Debug, Clone, Default)]
pub struct FrameEffects {
    pub messages: Vec<TransientMessage>,
    pub counters: FrameCounters,
}

/// Mutable simulation snapshot threaded through frame application.
///
/// `states` covers every topology node from construction on and never
/// gains or loses keys. `matched` only grows and is idempotent under
/// re-insertion.
#[derive(Debug, Clone)]
pub struct Snapshot {
    states: BTreeMap<NodeId, NodeState>,
    matched: BTreeSet<EdgeKey>,
}

impl Snapshot {
    /// Every node starts `SINGLE`.
    pub fn new(topo: &Topology) -> Snapshot {
        Snapshot {
            states: topo
                .nodes()
                .iter()
                .map(|&n| (n, NodeState::Single))
                .collect(),
            matched: BTreeSet::new(),
        }
    }

    pub fn state(&self, node: NodeId) -> Option<NodeState> {
        self.states.get(&node).copied()
    }

    pub fn states(&self) -> impl Iterator<Item = (NodeId, NodeState)> + '_ {
        self.states.iter().map(|(&n, &s)| (n, s))
    }

    pub fn matched_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.matched.iter().copied()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Apply one frame in event order.
    ///
    /// Events missing required fields are skipped for that effect only: no
    /// error, no counter increment. This permissiveness is deliberate and
    /// matches the recorded-log contract.
    pub fn apply(&mut self, frame: &Frame) -> FrameEffects {
        let mut effects = FrameEffects::default();

        for ev in frame.events() {
            match ev {
                Event::StateChange {
                    node: Some(node),
                    state: Some(state),
                    ..
                } => {
                    trace!(node = node.0, ?state, "状态迁移");
                    // Unknown nodes never grow the state map; the counter
                    // still reflects the event (both fields were present).
                    if let Some(slot) = self.states.get_mut(node) {
                        *slot = *state;
                    }
                    effects.counters.state_changes += 1;
                }
                Event::MessageSent { msg, .. } => {
                    if let (Some(sender), Some(target)) = (msg.sender, msg.target) {
                        effects.messages.push(TransientMessage {
                            sender,
                            target,
                            kind: msg.kind.clone(),
                        });
                        effects.counters.messages += 1;
                    }
                }
                Event::Matched {
                    node: Some(node),
                    partner: Some(partner),
                    ..
                } => {
                    if let Some(slot) = self.states.get_mut(node) {
                        *slot = NodeState::Matched;
                    }
                    // Matched pairs are not restricted to topology edges;
                    // only self-loops are refused.
                    if let Some(key) = EdgeKey::new(*node, *partner) {
                        self.matched.insert(key);
                    }
                    effects.counters.matches += 1;
                }
                // Incomplete payloads and stray INITs fall through silently.
                _ => {}
            }
        }

        effects
    }
}
