// src/combat/src/boss.rs

use serde::{Deserialize, Serialize};

/// Boss 战的连胜进度
///
/// 每完整破解一次序列计一胜，失败不清零。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossStreak {
    current: u32,
    required: u32,
}

impl BossStreak {
    pub fn new(required: u32) -> Self {
        Self {
            current: 0,
            required: required.max(1),
        }
    }

    /// 记录一次完整胜利，返回 Boss 是否已被击败
    pub fn record_win(&mut self) -> bool {
        self.current = (self.current + 1).min(self.required);
        self.is_cleared()
    }

    pub fn is_cleared(&self) -> bool {
        self.current >= self.required
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn remaining(&self) -> u32 {
        self.required - self.current
    }
}
