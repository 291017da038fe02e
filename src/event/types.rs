use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::time::EventTime;

/// 协议节点的算法阶段（闭集：渲染层必须能为每个状态配色）。
///
/// 未知的状态字符串会使整个日志解析失败，而不是被悄悄忽略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeState {
    Single,
    Proposer,
    Listener,
    Matched,
}

/// `MSG_SENT` 事件的嵌套载荷。
///
/// 所有字段都可能缺失；缺失的 sender/target 使该事件成为 no-op（见状态累加器）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub sender: Option<NodeId>,
    #[serde(default)]
    pub target: Option<NodeId>,
    /// 消息类型字符串（如 PROPOSE/ACCEPT/MATCHED），回放层视为不透明标签。
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// 日志事件（JSON 里以 `"type"` 字段区分）。
///
/// 除 `INIT` 必须领头以外，载荷字段一律宽容：缺失按 no-op 处理。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "INIT")]
    Init {
        #[serde(default)]
        nodes: Vec<NodeId>,
        #[serde(default)]
        edges: Vec<(NodeId, NodeId)>,
    },
    #[serde(rename = "STATE_CHANGE")]
    StateChange {
        #[serde(default)]
        node: Option<NodeId>,
        #[serde(default)]
        state: Option<NodeState>,
        #[serde(default)]
        timestamp: i64,
    },
    #[serde(rename = "MSG_SENT")]
    MessageSent {
        #[serde(default)]
        msg: MessagePayload,
        #[serde(default)]
        timestamp: i64,
    },
    #[serde(rename = "MATCHED")]
    Matched {
        #[serde(default)]
        node: Option<NodeId>,
        #[serde(default)]
        partner: Option<NodeId>,
        #[serde(default)]
        timestamp: i64,
    },
}

impl Event {
    /// 事件时间戳；`INIT` 不携带时间戳，按 0 处理。
    pub fn timestamp(&self) -> EventTime {
        match self {
            Event::Init { .. } => EventTime::ZERO,
            Event::StateChange { timestamp, .. }
            | Event::MessageSent { timestamp, .. }
            | Event::Matched { timestamp, .. } => EventTime(*timestamp),
        }
    }

    pub fn is_init(&self) -> bool {
        matches!(self, Event::Init { .. })
    }
}
