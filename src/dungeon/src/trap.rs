// src/dungeon/src/trap.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

use hero::Class;

/// 不同类型的陷阱及其伤害参数
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize, EnumIter)]
pub enum TrapKind {
    /// 尖刺坑
    SpikePit,
    /// 箭孔
    ArrowSlit,
    /// 落石
    RockFall,
}

impl TrapKind {
    pub const ALL: [TrapKind; 3] = [TrapKind::SpikePit, TrapKind::ArrowSlit, TrapKind::RockFall];

    /// 基础伤害区间
    pub fn damage_range(&self) -> (u32, u32) {
        match self {
            TrapKind::SpikePit => (8, 12),
            TrapKind::ArrowSlit => (6, 10),
            TrapKind::RockFall => (10, 15),
        }
    }

    /// 每深入一个房间增加的伤害
    pub fn depth_factor(&self) -> f64 {
        match self {
            TrapKind::SpikePit => 1.5,
            TrapKind::ArrowSlit => 1.2,
            TrapKind::RockFall => 1.8,
        }
    }

    pub fn image(&self) -> &'static str {
        match self {
            TrapKind::SpikePit => "images/traps/spike_pit.png",
            TrapKind::ArrowSlit => "images/traps/arrow_slit.png",
            TrapKind::RockFall => "images/traps/rock_fall.png",
        }
    }

    /// 陷阱动作的图像风格，所有陷阱都使用战士风格
    pub fn class(&self) -> Class {
        Class::Warrior
    }
}

impl fmt::Display for TrapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrapKind::SpikePit => write!(f, "Spike Pit"),
            TrapKind::ArrowSlit => write!(f, "Arrow Slit"),
            TrapKind::RockFall => write!(f, "Rock Fall"),
        }
    }
}
