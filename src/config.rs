//! 游戏配置
//!
//! 默认值即正常游戏节奏；可以从 JSON 文件读取，再由命令行参数覆盖。

use error::GameError;
use hero::Class;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::event_bus::LogLevel;

/// 各类延迟（毫秒）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// 开门到房间内容出现
    pub door_reveal_ms: u64,
    /// Boss 登场到开始展示招式
    pub boss_intro_ms: u64,
    /// 每个招式的展示时长
    pub reveal_cycle_ms: u64,
    /// 两个招式之间的空白
    pub reveal_blank_ms: u64,
    /// 最后一个招式之后的停留
    pub final_linger_ms: u64,
    pub retry_after_loss_ms: u64,
    pub next_boss_round_ms: u64,
    /// 击败 Boss 后的庆祝时间
    pub boss_defeat_ms: u64,
    /// 庆祝结束到楼梯出现
    pub stairs_reveal_ms: u64,
    pub auto_proceed_ms: u64,
    pub descend_ms: u64,
    pub game_over_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            door_reveal_ms: 1200,
            boss_intro_ms: 2500,
            reveal_cycle_ms: 1500,
            reveal_blank_ms: 100,
            final_linger_ms: 200,
            retry_after_loss_ms: 1600,
            next_boss_round_ms: 1200,
            boss_defeat_ms: 1000,
            stairs_reveal_ms: 2000,
            auto_proceed_ms: 2000,
            descend_ms: 2400,
            game_over_ms: 1500,
        }
    }
}

impl Timings {
    /// 所有延迟为零，测试时推进一次即可走完流程
    pub fn instant() -> Self {
        Self {
            door_reveal_ms: 0,
            boss_intro_ms: 0,
            reveal_cycle_ms: 0,
            reveal_blank_ms: 0,
            final_linger_ms: 0,
            retry_after_loss_ms: 0,
            next_boss_round_ms: 0,
            boss_defeat_ms: 0,
            stairs_reveal_ms: 0,
            auto_proceed_ms: 0,
            descend_ms: 0,
            game_over_ms: 0,
        }
    }

    pub fn door_reveal(&self) -> Duration {
        Duration::from_millis(self.door_reveal_ms)
    }

    /// 第一个招式出现前的等待，Boss 额外多一段登场时间
    pub fn first_reveal(&self, boss: bool) -> Duration {
        let intro = if boss { self.boss_intro_ms } else { 0 };
        Duration::from_millis(intro + self.reveal_cycle_ms + self.reveal_blank_ms)
    }

    pub fn next_reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_cycle_ms + self.reveal_blank_ms)
    }

    /// 最后一个招式到开放输入
    pub fn unlock_after_last(&self) -> Duration {
        Duration::from_millis(self.reveal_cycle_ms + self.reveal_blank_ms + self.final_linger_ms)
    }

    pub fn retry_after_loss(&self) -> Duration {
        Duration::from_millis(self.retry_after_loss_ms)
    }

    pub fn next_boss_round(&self) -> Duration {
        Duration::from_millis(self.next_boss_round_ms)
    }

    pub fn stairs_after_boss(&self) -> Duration {
        Duration::from_millis(self.boss_defeat_ms + self.stairs_reveal_ms)
    }

    pub fn auto_proceed(&self) -> Duration {
        Duration::from_millis(self.auto_proceed_ms)
    }

    pub fn descend(&self) -> Duration {
        Duration::from_millis(self.descend_ms)
    }

    pub fn game_over(&self) -> Duration {
        Duration::from_millis(self.game_over_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_name: String,
    pub class: Class,
    /// 固定种子；为空时每局随机
    pub seed: Option<u64>,
    /// 在这一层击败 Boss 即成功逃出
    pub final_level: u32,
    pub rooms_per_level: u32,
    pub save_directory: String,
    /// 消息日志保留的条数
    pub log_capacity: usize,
    /// 低于此级别的日志不进入消息日志
    pub log_level: LogLevel,
    pub timings: Timings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            player_name: String::new(),
            class: Class::Warrior,
            seed: None,
            final_level: 10,
            rooms_per_level: dungeon::ROOMS_PER_LEVEL,
            save_directory: "saves".to_string(),
            log_capacity: 200,
            log_level: LogLevel::Info,
            timings: Timings::default(),
        }
    }

    /// 从 JSON 文件读取，缺失的字段使用默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        let mut config: GameConfig = serde_json::from_str(raw)?;
        config.final_level = config.final_level.max(1);
        config.rooms_per_level = config.rooms_per_level.max(1);
        Ok(config)
    }
}
