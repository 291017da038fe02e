//! 回放驱动
//!
//! 串起整条流水线：加载 → 抽取拓扑 → 分帧 → 逐帧（应用 → 构建场景）。
//! 全程单线程顺序执行；每帧严格先写（快照应用）后读（场景构建）。

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::batch::{Frame, batch};
use crate::error::ReplayError;
use crate::event::{Event, EventTime};
use crate::scene::{Scene, build_scene};
use crate::state::Snapshot;
use crate::topo::{Topology, extract};

/// 读入整个事件日志文件（JSON 数组），一次性解析。
pub fn load_events(path: &Path) -> Result<Vec<Event>, ReplayError> {
    let raw = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// 一次确定性回放：不可变拓扑 + 帧序列 + 唯一可变快照。
#[derive(Debug)]
pub struct Replay {
    topo: Topology,
    frames: Vec<Frame>,
    snapshot: Snapshot,
    cursor: usize,
}

impl Replay {
    /// 构建回放：消费 `INIT`、按窗口分帧、初始化快照。
    ///
    /// 所有致命错误都在这里暴露；之后的逐帧推进不再失败。
    pub fn from_events(events: Vec<Event>, window: EventTime) -> Result<Replay, ReplayError> {
        let (topo, rest) = extract(events)?;
        let frames = batch(rest, window);
        info!(
            nodes = topo.nodes().len(),
            frames = frames.len(),
            window_ns = window.0,
            "▶️  回放就绪"
        );
        let snapshot = Snapshot::new(&topo);
        Ok(Replay {
            topo,
            frames,
            snapshot,
            cursor: 0,
        })
    }

    /// 严格模式：构建前先校验每条事件引用的节点都在拓扑中。
    pub fn from_events_strict(
        events: Vec<Event>,
        window: EventTime,
    ) -> Result<Replay, ReplayError> {
        let (topo, rest) = extract(events)?;
        topo.check_events(&rest)?;
        let frames = batch(rest, window);
        let snapshot = Snapshot::new(&topo);
        Ok(Replay {
            topo,
            frames,
            snapshot,
            cursor: 0,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn total_frames(&self) -> usize {
        self.frames.len()
    }

    /// 已推进的帧数（即下一帧的 0-based 索引）。
    pub fn frames_applied(&self) -> usize {
        self.cursor
    }

    /// 推进一帧：应用到快照，再构建该帧的场景。帧耗尽时返回 `None`。
    ///
    /// 提前停止（调用方不再推进）是正常退出，不是错误。
    pub fn advance(&mut self) -> Option<Scene> {
        let frame = self.frames.get(self.cursor)?;
        let effects = self.snapshot.apply(frame);
        debug!(
            frame = self.cursor + 1,
            events = frame.len(),
            msgs = effects.counters.messages,
            state_updates = effects.counters.state_changes,
            matches = effects.counters.matches,
            "帧已应用"
        );
        let scene = build_scene(
            &self.topo,
            &self.snapshot,
            &effects.messages,
            &effects.counters,
            self.cursor,
            self.frames.len(),
        );
        self.cursor += 1;
        Some(scene)
    }

    /// 推进到结束并收集全部场景。
    pub fn run(&mut self) -> Vec<Scene> {
        let mut scenes = Vec::with_capacity(self.frames.len().saturating_sub(self.cursor));
        while let Some(scene) = self.advance() {
            scenes.push(scene);
        }
        info!(total_frames = self.total_frames(), "✅ 回放完成");
        scenes
    }
}

impl Iterator for Replay {
    type Item = Scene;

    fn next(&mut self) -> Option<Scene> {
        self.advance()
    }
}
