//! 标识符类型
//!
//! 定义协议节点的唯一标识符。

use serde::{Deserialize, Serialize};

/// 节点标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);
