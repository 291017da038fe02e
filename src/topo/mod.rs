//! 静态拓扑
//!
//! 从领头的 `INIT` 事件构建图（节点、边）与一次性计算的节点布局。
//! 拓扑在构建后不可变，布局在整个回放过程中保持稳定。

// 子模块声明
mod extract;
mod layout;

// 重新导出公共接口
pub use extract::{Topology, extract};
pub use layout::{LAYOUT_SEED, Pos, spring_layout};
