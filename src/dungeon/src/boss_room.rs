// src/dungeon/src/boss_room.rs
//! 每局的关卡主题顺序
//!
//! 开局时把全部关卡主题打乱一次，之后同一局内同一层总是对应同一个主题（同一个 Boss）。

use error::GameError;
use hero::RandomSource;
use serde::{Deserialize, Serialize};

use crate::tables::{LEVEL_THEMES, LevelTheme};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossLevelOrder {
    order: Vec<usize>,
}

impl BossLevelOrder {
    /// 打乱全部关卡主题
    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..LEVEL_THEMES.len()).collect();
        rng.shuffle(&mut order);
        Self { order }
    }

    /// 按表中顺序排列（第 1 层对应第一个主题）
    pub fn in_table_order() -> Self {
        Self {
            order: (0..LEVEL_THEMES.len()).collect(),
        }
    }

    /// 使用指定顺序，下标越界或为空时报错
    pub fn from_order(order: Vec<usize>) -> Result<Self, GameError> {
        if order.is_empty() {
            return Err(GameError::NoLevelThemes);
        }
        if order.iter().any(|&i| i >= LEVEL_THEMES.len()) {
            return Err(GameError::InputError(format!(
                "theme index out of range in {:?}",
                order
            )));
        }
        Ok(Self { order })
    }

    /// 第 `level` 层对应的主题下标，超出主题数量后循环
    pub fn theme_index(&self, level: u32) -> usize {
        let slot = (level.max(1) as usize - 1) % self.order.len();
        self.order[slot]
    }

    pub fn theme(&self, level: u32) -> &'static LevelTheme {
        &LEVEL_THEMES[self.theme_index(level)]
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
