//! 事件模型
//!
//! 此模块包含回放流水线的基础类型：事件、节点状态、标识符与时间。

// 子模块声明
mod id;
mod time;
mod types;

// 重新导出公共接口
pub use id::NodeId;
pub use time::EventTime;
pub use types::{Event, MessagePayload, NodeState};
