// src/combat/src/sequence.rs

use serde::{Deserialize, Serialize};

use crate::rps::Move;
use hero::RandomSource;

/// 序列长度上限
pub const MAX_SEQUENCE_LENGTH: u32 = 8;

/// 第 `level` 层的序列长度：`min(level, 8)`，至少为 1
pub fn sequence_length(level: u32) -> usize {
    level.clamp(1, MAX_SEQUENCE_LENGTH) as usize
}

/// 对手本轮要出的招式序列
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSequence {
    moves: Vec<Move>,
}

impl ActionSequence {
    /// 为第 `level` 层生成随机序列
    pub fn generate<R: RandomSource>(level: u32, rng: &mut R) -> Self {
        let moves = (0..sequence_length(level)).map(|_| Move::random(rng)).collect();
        Self { moves }
    }

    /// 使用固定招式，空序列会补一个石头
    pub fn from_moves(moves: Vec<Move>) -> Self {
        if moves.is_empty() {
            return Self {
                moves: vec![Move::Rock],
            };
        }
        Self { moves }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Move> {
        self.moves.get(index).copied()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// 能完整破解本序列的出招
    pub fn counters(&self) -> Vec<Move> {
        self.moves.iter().map(Move::counter).collect()
    }
}
