//! 事件时间类型
//!
//! 定义事件日志时间戳及其单位转换。时间戳来自记录器的 `UnixNano`。

/// 事件时间（纳秒）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct EventTime(pub i64);

impl EventTime {
    pub const ZERO: EventTime = EventTime(0);
    pub fn from_micros(us: i64) -> EventTime {
        EventTime(us.saturating_mul(1_000))
    }
    pub fn from_millis(ms: i64) -> EventTime {
        EventTime(ms.saturating_mul(1_000_000))
    }
    pub fn from_secs(s: i64) -> EventTime {
        EventTime(s.saturating_mul(1_000_000_000))
    }
}
