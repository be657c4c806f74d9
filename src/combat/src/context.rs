// src/combat/src/context.rs

use dungeon::Opponent;

use crate::boss::BossStreak;
use crate::sequence::ActionSequence;

/// 进行中的遭遇
///
/// 遭遇开始时创建，结束或被中止后由引擎丢弃。
#[derive(Clone, Debug)]
pub struct CombatContext {
    pub opponent: Opponent,
    pub sequence: ActionSequence,
    /// 玩家当前要破解的下标
    pub step: usize,
    /// 已展示的招式数
    pub revealed: usize,
    pub streak: BossStreak,
    pub active: bool,
    /// 生成序列使用的层数
    pub level: u32,
    /// 遭遇编号，延迟步骤据此判断是否过期
    pub epoch: u64,
}

impl CombatContext {
    pub fn new(opponent: Opponent, sequence: ActionSequence, level: u32, epoch: u64) -> Self {
        let streak = BossStreak::new(opponent.required_streak);
        Self {
            opponent,
            sequence,
            step: 0,
            revealed: 0,
            streak,
            active: true,
            level,
            epoch,
        }
    }

    /// 换一组新序列，进度归零，连胜保留
    pub fn reset_sequence(&mut self, sequence: ActionSequence) {
        self.sequence = sequence;
        self.step = 0;
        self.revealed = 0;
    }
}
