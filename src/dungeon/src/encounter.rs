// src/dungeon/src/encounter.rs
//! 遭遇生成器
//!
//! 抽取顺序（测试中注入固定随机序列时需要注意）：
//! - Boss 房：伤害
//! - 其他房间：房间判定，然后怪物/陷阱/宝藏的选择，最后伤害或宝藏价值

use error::GameError;
use hero::{Class, RandomSource, ThreatKind};
use serde::{Deserialize, Serialize};

use crate::boss_room::BossLevelOrder;
use crate::rewards::treasure_value;
use crate::tables::{BossTemplate, MONSTER_INTRO_LINES, MonsterTemplate, TREASURES, TRAP_INTRO_LINES};
use crate::trap::TrapKind;
use crate::{BOSS_REQUIRED_STREAK, MONSTER_CHANCE, ROOMS_PER_LEVEL, TRAP_CHANCE};

/// 一次遭遇中的对手
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub kind: ThreatKind,
    pub name: String,
    pub image: String,
    pub damage_min: u32,
    pub damage_max: u32,
    pub depth_factor: f64,
    /// 决定对手动作图像与名称的职业风格
    pub class: Class,
    pub flavor: Option<String>,
    /// 需要完整破解序列的次数
    pub required_streak: u32,
    /// 本次遭遇固定的伤害值，重试与 Boss 的多轮都沿用
    pub base_damage: u32,
}

impl Opponent {
    fn roll_damage<R: RandomSource>(
        min: u32,
        max: u32,
        depth_factor: f64,
        depth: u32,
        rng: &mut R,
    ) -> u32 {
        rng.range_inclusive(min, max) + (f64::from(depth) * depth_factor).floor() as u32
    }

    /// 由怪物模板生成
    pub fn monster<R: RandomSource>(template: &MonsterTemplate, depth: u32, rng: &mut R) -> Self {
        let base_damage = Self::roll_damage(
            template.damage_min,
            template.damage_max,
            template.depth_factor,
            depth,
            rng,
        );
        Self {
            kind: ThreatKind::Monster,
            name: template.name.to_string(),
            image: template.image.to_string(),
            damage_min: template.damage_min,
            damage_max: template.damage_max,
            depth_factor: template.depth_factor,
            class: template.class,
            flavor: template.flavor.map(str::to_string),
            required_streak: 1,
            base_damage,
        }
    }

    pub fn trap<R: RandomSource>(kind: TrapKind, depth: u32, rng: &mut R) -> Self {
        let (min, max) = kind.damage_range();
        let base_damage = Self::roll_damage(min, max, kind.depth_factor(), depth, rng);
        Self {
            kind: ThreatKind::Trap,
            name: kind.to_string(),
            image: kind.image().to_string(),
            damage_min: min,
            damage_max: max,
            depth_factor: kind.depth_factor(),
            class: kind.class(),
            flavor: None,
            required_streak: 1,
            base_damage,
        }
    }

    pub fn boss<R: RandomSource>(template: &BossTemplate, level: u32, depth: u32, rng: &mut R) -> Self {
        let (min, max) = template.damage_range(level);
        let base_damage = Self::roll_damage(min, max, BossTemplate::DEPTH_FACTOR, depth, rng);
        Self {
            kind: ThreatKind::Boss,
            name: template.name.to_string(),
            image: template.image.to_string(),
            damage_min: min,
            damage_max: max,
            depth_factor: BossTemplate::DEPTH_FACTOR,
            class: template.class,
            flavor: Some(template.flavor.to_string()),
            required_streak: BOSS_REQUIRED_STREAK,
            base_damage,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == ThreatKind::Boss
    }

    /// 登场描述：优先使用对手自带的描述，否则从通用描述中抽取
    pub fn intro_line<R: RandomSource>(&self, rng: &mut R) -> String {
        if let Some(flavor) = &self.flavor {
            return flavor.clone();
        }
        let pool: &[&str] = match self.kind {
            ThreatKind::Trap => &TRAP_INTRO_LINES,
            _ => &MONSTER_INTRO_LINES,
        };
        rng.choose(pool).map(|s| s.to_string()).unwrap_or_default()
    }
}

/// 无需战斗的宝藏
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureFind {
    pub name: String,
    pub image: String,
    pub value: u32,
}

/// 打开一扇门后房间里的内容
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoomContents {
    Combat(Opponent),
    Treasure(TreasureFind),
}

/// 根据层数与深度生成房间内容
#[derive(Clone, Debug)]
pub struct EncounterGenerator {
    order: BossLevelOrder,
    rooms_per_level: u32,
}

impl EncounterGenerator {
    pub fn new(order: BossLevelOrder) -> Self {
        Self {
            order,
            rooms_per_level: ROOMS_PER_LEVEL,
        }
    }

    /// 为新的一局打乱关卡主题
    pub fn for_run<R: RandomSource>(rng: &mut R) -> Self {
        Self::new(BossLevelOrder::shuffled(rng))
    }

    pub fn with_rooms_per_level(mut self, rooms: u32) -> Self {
        self.rooms_per_level = rooms.max(1);
        self
    }

    pub fn boss_order(&self) -> &BossLevelOrder {
        &self.order
    }

    pub fn rooms_per_level(&self) -> u32 {
        self.rooms_per_level
    }

    pub fn is_boss_room(&self, depth: u32) -> bool {
        depth > 0 && depth % self.rooms_per_level == 0
    }

    /// 生成房间内容
    pub fn roll_room<R: RandomSource>(
        &self,
        level: u32,
        depth: u32,
        rng: &mut R,
    ) -> Result<RoomContents, GameError> {
        if self.is_boss_room(depth) {
            return Ok(RoomContents::Combat(self.boss(level, depth, rng)));
        }

        let roll = rng.next_f64();
        if roll < MONSTER_CHANCE {
            self.monster(level, depth, rng).map(RoomContents::Combat)
        } else if roll < TRAP_CHANCE {
            Ok(RoomContents::Combat(self.trap(depth, rng)))
        } else {
            Ok(RoomContents::Treasure(self.treasure(depth, rng)))
        }
    }

    /// 当前层的 Boss
    pub fn boss<R: RandomSource>(&self, level: u32, depth: u32, rng: &mut R) -> Opponent {
        Opponent::boss(&self.order.theme(level).boss, level, depth, rng)
    }

    /// 从当前层的怪物池中随机选择
    pub fn monster<R: RandomSource>(
        &self,
        level: u32,
        depth: u32,
        rng: &mut R,
    ) -> Result<Opponent, GameError> {
        let pool = self.order.theme(level).monster_pool();
        let template = rng
            .choose(&pool)
            .ok_or(GameError::EmptyMonsterPool { level })?;
        Ok(Opponent::monster(template, depth, rng))
    }

    pub fn trap<R: RandomSource>(&self, depth: u32, rng: &mut R) -> Opponent {
        let kind = TrapKind::ALL[rng.below(TrapKind::ALL.len())];
        Opponent::trap(kind, depth, rng)
    }

    pub fn treasure<R: RandomSource>(&self, depth: u32, rng: &mut R) -> TreasureFind {
        let template = &TREASURES[rng.below(TREASURES.len())];
        TreasureFind {
            name: template.name.to_string(),
            image: template.image.to_string(),
            value: treasure_value(template, depth, rng),
        }
    }
}
