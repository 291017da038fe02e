//! INIT 抽取
//!
//! 消费日志的第一条事件构建不可变拓扑，其余事件原序返还给批处理层。

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::ReplayError;
use crate::event::{Event, NodeId};

use super::layout::{LAYOUT_SEED, Pos, spring_layout};

/// 静态拓扑：节点集、边集与一次性布局。构建后不可变。
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<NodeId>,
    edges: Vec<(NodeId, NodeId)>,
    positions: BTreeMap<NodeId, Pos>,
}

impl Topology {
    /// 有序节点列表。
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    pub fn position(&self, node: NodeId) -> Option<Pos> {
        self.positions.get(&node).copied()
    }

    /// 严格模式校验：任何引用了拓扑之外节点的事件都是致命输入错误。
    ///
    /// 默认流水线不调用此函数（与原始行为一致的宽容语义）。
    pub fn check_events(&self, events: &[Event]) -> Result<(), ReplayError> {
        let mut refs: Vec<NodeId> = Vec::new();
        for ev in events {
            refs.clear();
            match ev {
                Event::Init { .. } => return Err(ReplayError::MissingInit),
                Event::StateChange { node, .. } => refs.extend(*node),
                Event::MessageSent { msg, .. } => {
                    refs.extend(msg.sender);
                    refs.extend(msg.target);
                }
                Event::Matched { node, partner, .. } => {
                    refs.extend(*node);
                    refs.extend(*partner);
                }
            }
            for id in &refs {
                if !self.contains(*id) {
                    return Err(ReplayError::UnknownNode(*id));
                }
            }
        }
        Ok(())
    }
}

/// 消费领头的 `INIT` 事件，返回 (拓扑, 剩余事件)。
///
/// 第一条事件不是 `INIT` 即为致命错误。边端点未在 `nodes` 中声明时会被
/// 并入节点集（与原始实现的图构建语义一致）。
pub fn extract(mut events: Vec<Event>) -> Result<(Topology, Vec<Event>), ReplayError> {
    if events.is_empty() || !events[0].is_init() {
        return Err(ReplayError::MissingInit);
    }
    let Event::Init { nodes, edges } = events.remove(0) else {
        unreachable!("checked above");
    };

    let mut node_set: BTreeSet<NodeId> = nodes.into_iter().collect();
    for &(a, b) in &edges {
        node_set.insert(a);
        node_set.insert(b);
    }
    let nodes: Vec<NodeId> = node_set.into_iter().collect();

    let positions = spring_layout(&nodes, &edges, LAYOUT_SEED);
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        remaining_events = events.len(),
        "拓扑构建完成"
    );

    Ok((
        Topology {
            nodes,
            edges,
            positions,
        },
        events,
    ))
}
