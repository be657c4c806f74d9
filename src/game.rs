//! 冒险进度控制器
//!
//! 拥有本局的 `RunState`、遭遇生成器与序列战斗引擎。玩家操作通过 `handle_input` 进入，
//! 所有等待都交给 `Scheduler`，到期后由 `on_timer` 继续。控制器只发布事件，不直接绘制。

use std::time::Duration;

use combat::{Move, RevealStep, SequenceCombat, StepOutcome};
use dungeon::tables::LevelTheme;
use dungeon::{EncounterGenerator, Opponent, RoomContents, TreasureFind};
use error::{GameError, handle_error};
use hero::{RandomSource, RunState, RunSummary};
use save::{Challenge, HighScoreStore, HighScoreUpdate};

use crate::config::GameConfig;
use crate::event_bus::{EventBus, GameEvent, LogLevel};
use crate::scheduler::{Scheduler, Timer, TimerHandle, TimerQueue};

/// 控制器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// 等待开门（或走楼梯）
    DoorPresented { stairs: bool },
    /// 门已打开，房间内容尚未出现
    RoomOpening,
    CombatActive,
    /// 房间已结束，等待新的门或楼梯出现
    RoomResolved,
    Descending,
    /// 本局已结算，等待切换到结算画面
    Ending,
    GameOver,
}

/// 玩家操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 开门；楼梯出现时等同于走楼梯
    OpenDoor,
    TakeStairs,
    Choose(Move),
    /// 带着金币离开地牢
    Exit,
}

/// 一局的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub high_score: HighScoreUpdate,
    pub challenge: Challenge,
}

pub struct Game<R: RandomSource, S: Scheduler = TimerQueue> {
    config: GameConfig,
    run: RunState,
    generator: EncounterGenerator,
    combat: SequenceCombat,
    rng: R,
    scheduler: S,
    events: EventBus,
    store: Box<dyn HighScoreStore>,
    phase: GamePhase,
    /// 展示招式与重新开始这一条链上的步骤
    reveal_handle: Option<TimerHandle>,
    /// 门、楼梯、结算这一条链上的步骤
    flow_handle: Option<TimerHandle>,
    last_treasure: Option<TreasureFind>,
    high_score: u64,
    outcome: Option<RunOutcome>,
}

impl<R: RandomSource> Game<R, TimerQueue> {
    pub fn new(config: GameConfig, rng: R, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_scheduler(config, rng, TimerQueue::new(), store)
    }
}

impl<R: RandomSource, S: Scheduler> Game<R, S> {
    pub fn with_scheduler(
        config: GameConfig,
        mut rng: R,
        scheduler: S,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let run = RunState::new(config.player_name.clone(), config.class);
        let generator =
            EncounterGenerator::for_run(&mut rng).with_rooms_per_level(config.rooms_per_level);
        let high_score = save::load_or_zero(store.as_ref());

        Self {
            config,
            run,
            generator,
            combat: SequenceCombat::new(),
            rng,
            scheduler,
            events: EventBus::new(),
            store,
            phase: GamePhase::DoorPresented { stairs: false },
            reveal_handle: None,
            flow_handle: None,
            last_treasure: None,
            high_score,
            outcome: None,
        }
    }

    /// 宣布开局并出示第一扇门，应在注册完订阅者之后调用
    pub fn start(&mut self) {
        self.events.publish(GameEvent::RunStarted {
            name: self.run.name.clone(),
            class: self.run.class,
            health: self.run.health(),
        });
        self.events.publish(GameEvent::LevelChanged {
            old_level: 0,
            new_level: self.run.level(),
            theme: self.level_theme().title.to_string(),
        });
        self.present_door();
    }

    // ========== 输入 ==========

    pub fn handle_input(&mut self, command: Command) -> Result<(), GameError> {
        if matches!(self.phase, GamePhase::Ending | GamePhase::GameOver) {
            return Err(GameError::RunEnded);
        }

        match (command, self.phase) {
            (Command::OpenDoor, GamePhase::DoorPresented { stairs: false }) => self.open_door(),
            (Command::OpenDoor | Command::TakeStairs, GamePhase::DoorPresented { stairs: true }) => {
                self.take_stairs()
            }
            (Command::TakeStairs, _) => Err(GameError::StairsUnavailable),
            (Command::Choose(mv), _) => self.choose(mv),
            (Command::Exit, GamePhase::DoorPresented { .. }) => {
                self.end_run(true);
                Ok(())
            }
            (Command::OpenDoor | Command::Exit, _) => Err(GameError::InputLocked),
        }
    }

    fn open_door(&mut self) -> Result<(), GameError> {
        let depth = self.run.enter_room()?;
        self.last_treasure = None;
        self.phase = GamePhase::RoomOpening;
        self.events.publish(GameEvent::DoorOpened { depth });
        let delay = self.config.timings.door_reveal();
        self.schedule_flow(delay, Timer::RevealRoom);
        Ok(())
    }

    fn take_stairs(&mut self) -> Result<(), GameError> {
        if !self.run.stairs_available() {
            return Err(GameError::StairsUnavailable);
        }
        self.phase = GamePhase::Descending;
        self.events.publish(GameEvent::StairsTaken {
            from_level: self.run.level(),
        });
        let delay = self.config.timings.descend();
        self.schedule_flow(delay, Timer::Descend);
        Ok(())
    }

    fn choose(&mut self, mv: Move) -> Result<(), GameError> {
        let report = self.combat.choose(mv, &mut self.run, &mut self.rng)?;
        let (kind, name) = match self.combat.opponent() {
            Some(o) => (o.kind, o.name.clone()),
            None => return Err(GameError::NoActiveEncounter),
        };
        let total = self.combat.sequence().map_or(0, |s| s.len());
        let epoch = self.combat.epoch();

        self.events.publish(GameEvent::CounterResolved {
            kind,
            step: report.step,
            total,
            player: report.player,
            opponent: report.opponent,
            adjudication: report.adjudication,
        });

        let timings = &self.config.timings;
        match report.outcome {
            StepOutcome::Advance { .. } => {}
            StepOutcome::Victory { gold } => {
                self.events.publish(GameEvent::EncounterWon { kind, name, gold });
                self.combat.finish();
                self.finish_room();
            }
            StepOutcome::BossStaggered { streak, required } => {
                let delay = timings.next_boss_round();
                self.events.publish(GameEvent::BossStaggered {
                    name,
                    streak,
                    required,
                });
                self.schedule_reveal(delay, Timer::RestartCombat { epoch });
            }
            StepOutcome::BossDefeated { gold, healed } => {
                self.events
                    .publish(GameEvent::BossDefeated { name, gold, healed });
                self.combat.finish();
                if self.run.level() >= self.config.final_level {
                    self.end_run(true);
                } else {
                    self.run.grant_stairs();
                    self.phase = GamePhase::RoomResolved;
                    let delay = self.config.timings.stairs_after_boss();
                    self.schedule_flow(delay, Timer::RevealStairs);
                }
            }
            StepOutcome::Hit { damage } => {
                let delay = timings.retry_after_loss();
                self.publish_damage(name, kind, damage);
                self.schedule_reveal(delay, Timer::RestartCombat { epoch });
            }
            StepOutcome::TrapSprung { damage } => {
                self.publish_damage(name, kind, damage);
                self.combat.finish();
                self.finish_room();
            }
            StepOutcome::Died { damage } => {
                self.publish_damage(name, kind, damage);
                self.combat.finish();
                self.end_run(false);
            }
        }
        Ok(())
    }

    fn publish_damage(&mut self, source: String, kind: hero::ThreatKind, amount: u32) {
        self.events.publish(GameEvent::DamageTaken {
            source,
            kind,
            amount,
            health: self.run.health(),
        });
    }

    // ========== 计时 ==========

    /// 推进虚拟时间，处理期间到期的所有步骤，返回处理的数量
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.scheduler.now() + elapsed;
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(target) {
            self.on_timer(timer);
            fired += 1;
        }
        self.scheduler.advance_clock(target);
        fired
    }

    /// 一直推进到没有待处理的步骤（等待玩家输入时自然停下）
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.scheduler.next_deadline() {
            let elapsed = deadline.saturating_sub(self.scheduler.now());
            fired += self.advance(elapsed);
        }
        fired
    }

    pub fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::RevealRoom if self.phase == GamePhase::RoomOpening => self.reveal_room(),
            Timer::RevealTick { epoch } if self.combat.is_current(epoch) => self.reveal_tick(epoch),
            Timer::RestartCombat { epoch } if self.combat.is_current(epoch) => {
                self.restart_reveal(epoch)
            }
            Timer::RevealStairs | Timer::AutoProceed if self.phase == GamePhase::RoomResolved => {
                self.present_door()
            }
            Timer::Descend if self.phase == GamePhase::Descending => self.descend(),
            Timer::ShowGameOver if self.phase == GamePhase::Ending => {
                self.phase = GamePhase::GameOver;
                self.events.publish(GameEvent::GameOverShown);
            }
            stale => self
                .events
                .log(format!("Ignored stale step {:?}", stale), LogLevel::Debug),
        }
    }

    fn reveal_room(&mut self) {
        let level = self.run.level();
        let depth = self.run.depth();
        match self.generator.roll_room(level, depth, &mut self.rng) {
            Ok(RoomContents::Treasure(find)) => {
                self.run.add_treasure(find.value);
                self.events.publish(GameEvent::TreasureFound {
                    name: find.name.clone(),
                    value: find.value,
                });
                self.last_treasure = Some(find);
                self.finish_room();
            }
            Ok(RoomContents::Combat(opponent)) => self.start_encounter(opponent),
            Err(e) => {
                self.events.log(handle_error(&e), LogLevel::Warning);
                self.present_door();
            }
        }
    }

    fn start_encounter(&mut self, opponent: Opponent) {
        self.cancel_reveal();
        let boss = opponent.is_boss();
        let intro = self.combat.begin(opponent, self.run.level(), &mut self.rng);
        self.phase = GamePhase::CombatActive;
        self.events.publish(GameEvent::EncounterStarted {
            kind: intro.opponent.kind,
            name: intro.opponent.name.clone(),
            intro: intro.intro_line,
            sequence_len: intro.sequence_len,
            required_streak: intro.opponent.required_streak,
        });
        let delay = self.config.timings.first_reveal(boss);
        self.schedule_reveal(delay, Timer::RevealTick { epoch: intro.epoch });
    }

    fn reveal_tick(&mut self, epoch: u64) {
        match self.combat.reveal_next() {
            Ok(RevealStep::Shown { index, total, mv }) => {
                self.events
                    .publish(GameEvent::MoveRevealed { index, total, mv });
                let timings = &self.config.timings;
                let delay = if index + 1 == total {
                    timings.unlock_after_last()
                } else {
                    timings.next_reveal()
                };
                self.schedule_reveal(delay, Timer::RevealTick { epoch });
            }
            Ok(RevealStep::InputUnlocked { total }) => {
                self.events
                    .publish(GameEvent::InputUnlocked { step: 0, total });
            }
            Err(e) => self.events.log(handle_error(&e), LogLevel::Debug),
        }
    }

    fn restart_reveal(&mut self, epoch: u64) {
        let Some(opponent) = self.combat.opponent() else {
            return;
        };
        let boss = opponent.is_boss();
        self.events.publish(GameEvent::EncounterRestarted {
            kind: opponent.kind,
            name: opponent.name.clone(),
            sequence_len: self.combat.sequence().map_or(0, |s| s.len()),
        });
        let delay = self.config.timings.first_reveal(boss);
        self.schedule_reveal(delay, Timer::RevealTick { epoch });
    }

    fn finish_room(&mut self) {
        self.phase = GamePhase::RoomResolved;
        let delay = self.config.timings.auto_proceed();
        self.schedule_flow(delay, Timer::AutoProceed);
    }

    fn present_door(&mut self) {
        let stairs = self.run.stairs_available();
        self.phase = GamePhase::DoorPresented { stairs };
        self.events.publish(GameEvent::DoorPresented {
            stairs,
            level: self.run.level(),
            depth: self.run.depth(),
        });
    }

    fn descend(&mut self) {
        let old_level = self.run.level();
        match self.run.descend() {
            Ok(new_level) => {
                self.events.publish(GameEvent::LevelChanged {
                    old_level,
                    new_level,
                    theme: self.level_theme().title.to_string(),
                });
                self.present_door();
            }
            Err(e) => {
                self.events.log(handle_error(&e), LogLevel::Warning);
                self.present_door();
            }
        }
    }

    fn end_run(&mut self, escaped: bool) {
        self.cancel_reveal();
        if let Some(handle) = self.flow_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.combat.abort();

        let summary = self.run.finish(escaped);
        let update = save::record_final_score(self.store.as_mut(), summary.score);
        if let Some(warning) = &update.warning {
            self.events.log(warning.clone(), LogLevel::Warning);
        }
        self.high_score = update.best;

        self.events.publish(GameEvent::RunEnded {
            escaped,
            score: summary.score,
            gold_lost: summary.gold_lost,
            level: summary.level,
            rooms: summary.rooms,
            best: update.best,
            new_best: update.is_new_best,
        });

        self.outcome = Some(RunOutcome {
            challenge: Challenge::issue(summary.score, &self.run.name),
            summary,
            high_score: update,
        });
        self.phase = GamePhase::Ending;
        let delay = self.config.timings.game_over();
        self.schedule_flow(delay, Timer::ShowGameOver);
    }

    fn schedule_reveal(&mut self, delay: Duration, timer: Timer) {
        self.cancel_reveal();
        self.reveal_handle = Some(self.scheduler.schedule(delay, timer));
    }

    fn cancel_reveal(&mut self) {
        if let Some(handle) = self.reveal_handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn schedule_flow(&mut self, delay: Duration, timer: Timer) {
        if let Some(handle) = self.flow_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.flow_handle = Some(self.scheduler.schedule(delay, timer));
    }

    // ========== 查询 ==========

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn combat(&self) -> &SequenceCombat {
        &self.combat
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn generator(&self) -> &EncounterGenerator {
        &self.generator
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// 取走本帧的事件
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    pub fn level_theme(&self) -> &'static LevelTheme {
        self.generator.boss_order().theme(self.run.level())
    }

    pub fn last_treasure(&self) -> Option<&TreasureFind> {
        self.last_treasure.as_ref()
    }

    /// 开局时读到的最高分，结算后更新
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Ending | GamePhase::GameOver)
    }

    pub fn awaiting_move(&self) -> bool {
        self.phase == GamePhase::CombatActive && self.combat.awaiting_input()
    }
}
