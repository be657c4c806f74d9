//src/hero/src/rng.rs
use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// 随机数来源，所有抽取都落在 `[0, 1)` 区间
///
/// 遭遇生成与序列战斗只通过这个 trait 取随机数，方便测试时注入固定序列。
pub trait RandomSource {
    /// 生成 `[0, 1)` 内的随机浮点数
    fn next_f64(&mut self) -> f64;

    /// 生成 `[0, n)` 内的随机下标，`n == 0` 时返回 0
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// 生成 `[min, max]` 内的随机整数
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.below((max - min + 1) as usize) as u32
    }

    /// 从列表中随机选择
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            let idx = self.below(items.len());
            Some(&items[idx])
        }
    }

    /// 随机打乱切片（Fisher-Yates）
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.below(i + 1);
            slice.swap(i, j);
        }
    }
}

/// 单局游戏使用的确定性RNG
#[derive(Debug, Clone)]
pub struct RunRng {
    rng: Pcg32,
    seed: u64,
}

impl RunRng {
    /// 使用指定种子创建新RNG
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// 使用随机种子创建新RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// 获取当前种子值
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 重置RNG状态（使用当前种子）
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// 使用新种子重置RNG
    pub fn reseed(&mut self, new_seed: u64) {
        self.seed = new_seed;
        self.reset();
    }
}

impl RandomSource for RunRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// 按预设顺序回放抽取结果的随机源
///
/// 预设值耗尽后回到 `fallback`。用于复现某一局或编写确定性测试。
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// 设置预设值耗尽后的返回值
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback.clamp(0.0, 0.999_999);
        self
    }

    /// 追加预设值
    pub fn push(&mut self, draw: f64) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.draws
            .pop_front()
            .map(|d| d.clamp(0.0, 0.999_999))
            .unwrap_or(self.fallback)
    }
}
