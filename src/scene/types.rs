use serde::{Deserialize, Serialize};

use crate::event::NodeState;

/// 背景边颜色（中性灰）
pub const COLOR_BACKGROUND_EDGE: &str = "#E0E0E0";
/// 已确认配对边的强调色
pub const COLOR_MATCHED_EDGE: &str = "#66BB6A";
/// 在途消息标注颜色
pub const COLOR_MESSAGE: &str = "#E53935";

/// 节点状态到颜色的闭表。
///
/// 穷举匹配：`NodeState` 是闭集，新增状态不配色无法通过编译。
pub fn state_color(state: NodeState) -> &'static str {
    match state {
        NodeState::Single => "#B0BEC5",
        NodeState::Proposer => "#FFB300",
        NodeState::Listener => "#42A5F5",
        NodeState::Matched => "#66BB6A",
    }
}

/// 一个待绘制节点（位置固定不随帧变化）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub state: NodeState,
    pub color: String,
}

/// 一条待绘制边（背景边或配对强调边）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEdge {
    pub from: usize,
    pub to: usize,
    pub color: String,
    pub width: f64,
}

/// 一条帧内消息标注：从 sender 指向 target 的有向箭头
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMessage {
    pub from: usize,
    pub to: usize,
    pub label: String,
    pub color: String,
}

/// 一帧的完整可绘制描述（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based 帧号
    pub frame: usize,
    pub total_frames: usize,
    pub title: String,
    pub nodes: Vec<SceneNode>,
    /// 背景边在前，配对强调边叠加在后
    pub edges: Vec<SceneEdge>,
    pub messages: Vec<SceneMessage>,
}
