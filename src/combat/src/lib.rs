// src/combat/src/lib.rs
//! 序列猜拳战斗引擎
//!
//! 对手先依次展示一串招式，玩家再按顺序逐一克制。引擎只修改生命值和金币，
//! 每一步都返回结构化结果，文字描述由上层负责。

pub mod boss;
pub mod context;
pub mod rps;
pub mod sequence;

pub use crate::boss::BossStreak;
pub use crate::context::CombatContext;
pub use crate::rps::{Adjudication, Move, adjudicate};
pub use crate::sequence::{ActionSequence, MAX_SEQUENCE_LENGTH, sequence_length};

use dungeon::Opponent;
use dungeon::rewards::victory_gold;
use error::GameError;
use hero::{RandomSource, RunState, ThreatKind};
use serde::{Deserialize, Serialize};

/// 遭遇的最终结局
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Resolution {
    /// 怪物被击败或陷阱被拆除
    Victory,
    BossDefeated,
    /// 陷阱触发，遭遇结束但本局继续
    TrapSprung,
    Death,
}

/// 引擎状态
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum CombatPhase {
    Idle,
    /// 已生成序列，尚未开始展示
    Introducing,
    /// 已展示到第 i 个招式
    Revealing(usize),
    /// 等待玩家破解第 i 个招式
    AwaitingPlayerMove(usize),
    Resolved(Resolution),
}

/// 遭遇开始时的信息
#[derive(Clone, Debug, PartialEq)]
pub struct EncounterIntro {
    pub epoch: u64,
    pub opponent: Opponent,
    pub intro_line: String,
    pub sequence_len: usize,
}

/// 展示一步的结果
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RevealStep {
    Shown { index: usize, total: usize, mv: Move },
    /// 全部展示完毕，开放输入
    InputUnlocked { total: usize },
}

/// 玩家出招后的结果
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum StepOutcome {
    /// 破解成功，继续下一步
    Advance { next: usize, total: usize },
    /// 破解完整序列，获得金币
    Victory { gold: u32 },
    /// Boss 被击中但未倒下，新序列已生成
    BossStaggered { streak: u32, required: u32 },
    BossDefeated { gold: u32, healed: u32 },
    /// 失败受伤，新序列已生成等待重试
    Hit { damage: u32 },
    TrapSprung { damage: u32 },
    Died { damage: u32 },
}

impl StepOutcome {
    /// 是否结束了本次遭遇
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepOutcome::Victory { .. }
                | StepOutcome::BossDefeated { .. }
                | StepOutcome::TrapSprung { .. }
                | StepOutcome::Died { .. }
        )
    }
}

/// 一次出招的完整记录
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct StepReport {
    pub player: Move,
    pub opponent: Move,
    pub adjudication: Adjudication,
    pub step: usize,
    pub outcome: StepOutcome,
}

/// 序列战斗状态机，同一时间只持有一个遭遇
#[derive(Debug)]
pub struct SequenceCombat {
    context: Option<CombatContext>,
    phase: CombatPhase,
    epoch: u64,
}

impl Default for SequenceCombat {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceCombat {
    pub fn new() -> Self {
        Self {
            context: None,
            phase: CombatPhase::Idle,
            epoch: 0,
        }
    }

    /// 开始新遭遇，替换掉任何旧遭遇
    pub fn begin<R: RandomSource>(&mut self, opponent: Opponent, level: u32, rng: &mut R) -> EncounterIntro {
        self.epoch += 1;
        let sequence = ActionSequence::generate(level, rng);
        let intro_line = opponent.intro_line(rng);
        let sequence_len = sequence.len();
        self.context = Some(CombatContext::new(opponent.clone(), sequence, level, self.epoch));
        self.phase = CombatPhase::Introducing;
        EncounterIntro {
            epoch: self.epoch,
            opponent,
            intro_line,
            sequence_len,
        }
    }

    /// 展示下一个招式；最后一个招式之后的调用开放输入
    pub fn reveal_next(&mut self) -> Result<RevealStep, GameError> {
        let ctx = self.active_context()?;
        let total = ctx.sequence.len();
        let next = match self.phase {
            CombatPhase::Introducing => 0,
            CombatPhase::Revealing(i) => i + 1,
            _ => return Err(GameError::NoActiveEncounter),
        };

        if next < total {
            let mv = ctx.sequence.get(next).ok_or(GameError::NoActiveEncounter)?;
            if let Some(ctx) = self.context.as_mut() {
                ctx.revealed = next + 1;
            }
            self.phase = CombatPhase::Revealing(next);
            Ok(RevealStep::Shown { index: next, total, mv })
        } else {
            self.phase = CombatPhase::AwaitingPlayerMove(0);
            Ok(RevealStep::InputUnlocked { total })
        }
    }

    /// 玩家出招
    pub fn choose<R: RandomSource>(
        &mut self,
        mv: Move,
        run: &mut RunState,
        rng: &mut R,
    ) -> Result<StepReport, GameError> {
        let step = match self.phase {
            CombatPhase::AwaitingPlayerMove(i) => i,
            CombatPhase::Introducing | CombatPhase::Revealing(_) => return Err(GameError::InputLocked),
            _ => return Err(GameError::NoActiveEncounter),
        };
        let ctx = self
            .context
            .as_mut()
            .filter(|c| c.active)
            .ok_or(GameError::NoActiveEncounter)?;

        let opponent_move = ctx.sequence.get(step).ok_or(GameError::NoActiveEncounter)?;
        let adjudication = adjudicate(mv, opponent_move);
        let kind = ctx.opponent.kind;

        let outcome = if adjudication.is_win() {
            ctx.step = step + 1;
            let total = ctx.sequence.len();
            if ctx.step < total {
                self.phase = CombatPhase::AwaitingPlayerMove(ctx.step);
                StepOutcome::Advance { next: ctx.step, total }
            } else {
                match kind {
                    ThreatKind::Boss => {
                        if ctx.streak.record_win() {
                            let gold = victory_gold(kind, run.class, run.depth(), rng);
                            run.add_treasure(gold);
                            let healed = if run.class.heals_after_boss() { run.heal_full() } else { 0 };
                            self.phase = CombatPhase::Resolved(Resolution::BossDefeated);
                            StepOutcome::BossDefeated { gold, healed }
                        } else {
                            ctx.reset_sequence(ActionSequence::generate(ctx.level, rng));
                            self.phase = CombatPhase::Introducing;
                            StepOutcome::BossStaggered {
                                streak: ctx.streak.current(),
                                required: ctx.streak.required(),
                            }
                        }
                    }
                    ThreatKind::Monster | ThreatKind::Trap => {
                        let gold = victory_gold(kind, run.class, run.depth(), rng);
                        run.add_treasure(gold);
                        self.phase = CombatPhase::Resolved(Resolution::Victory);
                        StepOutcome::Victory { gold }
                    }
                }
            }
        } else {
            let damage = run.take_damage(ctx.opponent.base_damage, kind);
            if !run.is_alive() {
                self.phase = CombatPhase::Resolved(Resolution::Death);
                StepOutcome::Died { damage }
            } else if kind == ThreatKind::Trap {
                self.phase = CombatPhase::Resolved(Resolution::TrapSprung);
                StepOutcome::TrapSprung { damage }
            } else {
                ctx.reset_sequence(ActionSequence::generate(ctx.level, rng));
                self.phase = CombatPhase::Introducing;
                StepOutcome::Hit { damage }
            }
        };

        if outcome.is_terminal() {
            ctx.active = false;
        }

        Ok(StepReport {
            player: mv,
            opponent: opponent_move,
            adjudication,
            step,
            outcome,
        })
    }

    /// 中止当前遭遇，之后到期的延迟步骤都会失效
    pub fn abort(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.active = false;
        }
        self.context = None;
        self.phase = CombatPhase::Idle;
        self.epoch += 1;
    }

    /// 取走已结束的遭遇，回到空闲状态
    pub fn finish(&mut self) -> Option<CombatContext> {
        self.phase = CombatPhase::Idle;
        self.context.take()
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 延迟步骤是否仍属于当前遭遇
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.context.as_ref().is_some_and(|c| c.active)
    }

    pub fn awaiting_input(&self) -> bool {
        matches!(self.phase, CombatPhase::AwaitingPlayerMove(_))
    }

    pub fn context(&self) -> Option<&CombatContext> {
        self.context.as_ref()
    }

    pub fn opponent(&self) -> Option<&Opponent> {
        self.context.as_ref().map(|c| &c.opponent)
    }

    pub fn sequence(&self) -> Option<&ActionSequence> {
        self.context.as_ref().map(|c| &c.sequence)
    }

    pub fn streak(&self) -> Option<BossStreak> {
        self.context.as_ref().map(|c| c.streak)
    }

    /// 已展示的招式，供界面绘制
    pub fn revealed_moves(&self) -> &[Move] {
        match &self.context {
            Some(ctx) => &ctx.sequence.moves()[..ctx.revealed.min(ctx.sequence.len())],
            None => &[],
        }
    }

    fn active_context(&self) -> Result<&CombatContext, GameError> {
        self.context
            .as_ref()
            .filter(|c| c.active)
            .ok_or(GameError::NoActiveEncounter)
    }
}

#[cfg(test)]
mod tests;
