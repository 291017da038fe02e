//! 可绘制场景（用于离线 HTML/窗口回放）
//!
//! 设计目标：
//! - **结构化**：用 JSON 场景而不是直接驱动某个绘图库
//! - **无状态**：场景是 (拓扑, 快照, 帧内消息) 的纯函数，可任意重算
//! - **可回放**：外部展示层按帧索引取场景，节奏由它自己控制

mod build;
mod types;

pub use build::build_scene;
pub use types::{
    COLOR_BACKGROUND_EDGE, COLOR_MATCHED_EDGE, COLOR_MESSAGE, Scene, SceneEdge, SceneMessage,
    SceneNode, state_color,
};
