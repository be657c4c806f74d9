// src/dungeon/src/rewards.rs
//! 胜利奖励计算

use hero::{Class, RandomSource, ThreatKind};

use crate::BOSS_REWARD_MULTIPLIER;
use crate::tables::TreasureTemplate;

/// 基础金币：`floor(r * (15 + 3d)) + (10 + d)`
pub fn base_gold<R: RandomSource>(depth: u32, rng: &mut R) -> u32 {
    let spread = f64::from(15 + 3 * depth);
    (rng.next_f64() * spread).floor() as u32 + 10 + depth
}

/// 解除陷阱获得的金币：基础金币区间减半
pub fn trap_gold<R: RandomSource>(depth: u32, rng: &mut R) -> u32 {
    let spread = f64::from(15 + 3 * depth);
    ((rng.next_f64() * spread + f64::from(10 + depth)) * 0.5).floor() as u32
}

/// 盗贼解除陷阱后额外顺走的金币：`floor(r * (10 + 2d)) + (10 + 2d)`
pub fn rogue_trap_bonus<R: RandomSource>(depth: u32, rng: &mut R) -> u32 {
    let spread = 10 + 2 * depth;
    (rng.next_f64() * f64::from(spread)).floor() as u32 + spread
}

/// 击败对手后的金币奖励（已计入职业被动）
pub fn victory_gold<R: RandomSource>(
    kind: ThreatKind,
    class: Class,
    depth: u32,
    rng: &mut R,
) -> u32 {
    let gold = match kind {
        ThreatKind::Monster => base_gold(depth, rng),
        ThreatKind::Boss => base_gold(depth, rng) * BOSS_REWARD_MULTIPLIER,
        ThreatKind::Trap => trap_gold(depth, rng),
    };
    match (class, kind) {
        // 百分比加成不作用于陷阱，盗贼另有一笔独立的额外金币
        (Class::Rogue, ThreatKind::Trap) => gold + rogue_trap_bonus(depth, rng),
        _ => class.bonus_gold(gold, kind),
    }
}

/// 宝藏价值：`uniform(min, max) + depth * factor`
pub fn treasure_value<R: RandomSource>(template: &TreasureTemplate, depth: u32, rng: &mut R) -> u32 {
    rng.range_inclusive(template.value_min, template.value_max) + depth * template.depth_value_factor
}
