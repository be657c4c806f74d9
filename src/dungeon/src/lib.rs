//src/dungeon/src/lib.rs
//! 地牢内容与遭遇生成
//!
//! - `tables`：怪物、宝藏、关卡主题等静态数据
//! - `trap`：三种固定陷阱
//! - `boss_room`：每局随机的关卡主题顺序（决定每层的 Boss）
//! - `encounter`：根据层数与房间深度生成房间内容
//! - `rewards`：胜利奖励计算

pub mod boss_room;
pub mod encounter;
pub mod rewards;
pub mod tables;
pub mod trap;

pub use crate::boss_room::BossLevelOrder;
pub use crate::encounter::{EncounterGenerator, Opponent, RoomContents, TreasureFind};
pub use crate::trap::TrapKind;
pub use hero::ThreatKind;

/// 每隔多少个房间出现一次 Boss
pub const ROOMS_PER_LEVEL: u32 = 5;
/// Boss 需要被连续击败的次数
pub const BOSS_REQUIRED_STREAK: u32 = 3;
/// Boss 奖励倍率
pub const BOSS_REWARD_MULTIPLIER: u32 = 3;
/// 房间判定：低于此值为怪物
pub const MONSTER_CHANCE: f64 = 0.40;
/// 房间判定：低于此值（且不低于怪物阈值）为陷阱，其余为宝藏
pub const TRAP_CHANCE: f64 = 0.70;
