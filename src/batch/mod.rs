//! 时间窗口批处理
//!
//! 把严格有序的事件日志压成"并发帧"序列：落进同一时间窗口的事件在
//! 回放时被当作同时发生。
//!
//! 窗口是滑动锚点式的，不是固定网格：第一个落在当前窗口之外的事件
//! 会把锚点拉到自己的时间戳上，因此窗口边界由数据决定。

use tracing::debug;

use crate::event::{Event, EventTime};

/// 默认时间窗口：100ms（纳秒表示）。调用方可覆盖。
pub const DEFAULT_WINDOW: EventTime = EventTime(100_000_000);

/// 一帧：分进同一时间窗口的事件，按排序后的顺序保存。
///
/// 帧在批处理完成后不再变更，回放时从左到右消费一次。
#[derive(Debug, Clone, Default)]
pub struct Frame {
    events: Vec<Event>,
}

impl Frame {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// 按时间戳升序稳定排序后，用滑动锚点窗口切帧。
///
/// 事件与锚点的间隔恰好等于 `window` 时仍属于当前帧（闭区间比较）；
/// 时间戳相同的事件必然同帧，且保持输入相对顺序。
pub fn batch(mut events: Vec<Event>, window: EventTime) -> Vec<Frame> {
    if events.is_empty() {
        return Vec::new();
    }

    // sort_by_key 是稳定排序：时间戳相同的并发事件保持输入顺序，
    // 保证重复运行产出相同的帧。
    events.sort_by_key(|ev| ev.timestamp());

    let mut frames = Vec::new();
    let mut current = Frame::default();
    let mut window_start = events[0].timestamp();

    for ev in events {
        let ts = ev.timestamp();
        if ts.0.saturating_sub(window_start.0) <= window.0 {
            current.events.push(ev);
        } else {
            frames.push(std::mem::take(&mut current));
            window_start = ts;
            current.events.push(ev);
        }
    }
    if !current.is_empty() {
        frames.push(current);
    }

    debug!(frames = frames.len(), window_ns = window.0, "事件分帧完成");
    frames
}
