// src/hero/src/core.rs
use error::GameError;
use serde::{Deserialize, Serialize};

use crate::class::Class;

/// 伤害或奖励的来源类型，职业被动据此决定是否生效
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatKind {
    Monster,
    Trap,
    Boss,
}

/// 单局冒险的可变状态
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub name: String,
    pub class: Class,
    health: u32,
    max_health: u32,
    treasure: u64,
    level: u32,           // 地牢层数，只能通过楼梯增加
    depth: u32,           // 已打开的房间数，整局累计
    stairs_available: bool,
    pub last_final_score: Option<u64>,
    ended: bool,
}

/// 一局结束时的结算
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub escaped: bool,
    pub score: u64,
    pub gold_lost: u64,
    pub level: u32,
    pub rooms: u32,
}

impl RunState {
    /// 开始新的一局
    pub fn new(name: impl Into<String>, class: Class) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            "Brave Adventurer".to_string()
        } else {
            name.trim().to_string()
        };
        Self {
            name,
            class,
            health: class.starting_health(),
            max_health: class.starting_health(),
            treasure: 0,
            level: 1,
            depth: 0,
            stairs_available: false,
            last_final_score: None,
            ended: false,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn treasure(&self) -> u64 {
        self.treasure
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn stairs_available(&self) -> bool {
        self.stairs_available
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// 受到伤害，返回实际扣除的生命值
    ///
    /// 伤害先经过职业被动修正，生命值最低为 0。
    pub fn take_damage(&mut self, raw: u32, source: ThreatKind) -> u32 {
        let amount = self.class.mitigate_damage(raw, source);
        let applied = amount.min(self.health);
        self.health -= applied;
        amount
    }

    /// 回满生命值，返回恢复量
    pub fn heal_full(&mut self) -> u32 {
        let restored = self.max_health - self.health;
        self.health = self.max_health;
        restored
    }

    pub fn add_treasure(&mut self, gold: u32) {
        self.treasure += u64::from(gold);
    }

    /// 进入新房间，返回新的房间深度
    pub fn enter_room(&mut self) -> Result<u32, GameError> {
        if self.ended {
            return Err(GameError::RunEnded);
        }
        self.depth += 1;
        Ok(self.depth)
    }

    /// 当前房间是否为 Boss 房
    pub fn is_boss_room(&self, rooms_per_level: u32) -> bool {
        rooms_per_level > 0 && self.depth > 0 && self.depth % rooms_per_level == 0
    }

    /// Boss 被彻底击败后开放楼梯
    pub fn grant_stairs(&mut self) {
        self.stairs_available = true;
    }

    /// 走楼梯进入下一层，房间深度不变
    pub fn descend(&mut self) -> Result<u32, GameError> {
        if self.ended {
            return Err(GameError::RunEnded);
        }
        if !self.stairs_available {
            return Err(GameError::StairsUnavailable);
        }
        self.stairs_available = false;
        self.level += 1;
        Ok(self.level)
    }

    /// 结束本局。死亡时得分为 0，携带的金币全部丢失
    pub fn finish(&mut self, escaped: bool) -> RunSummary {
        self.ended = true;
        self.stairs_available = false;
        let (score, gold_lost) = if escaped {
            (self.treasure, 0)
        } else {
            (0, self.treasure)
        };
        self.last_final_score = Some(score);
        RunSummary {
            escaped,
            score,
            gold_lost,
            level: self.level,
            rooms: self.depth,
        }
    }
}
