//! 事件总线系统，用于解耦控制器与界面、日志
//!
//! 控制器只发布结构化事件；文字由 `narration` 生成，界面和统计通过订阅获取。
//! - 发布事件到总线（同时保存在队列中供界面每帧取走）
//! - 注册事件监听器，按优先级处理
//! - 使用中间件拦截事件

use combat::{Adjudication, Move};
use hero::{Class, ThreatKind};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::narration;

/// 事件类别 - 用于事件分组和过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// 开局、门、楼梯、结算
    Progress,
    /// 遭遇的出现与展示
    Encounter,
    /// 逐步出招与伤害
    Combat,
    /// 金币与治疗
    Reward,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // ===== 进度事件 =====
    RunStarted {
        name: String,
        class: Class,
        health: u32,
    },
    DoorPresented {
        stairs: bool,
        level: u32,
        depth: u32,
    },
    DoorOpened {
        depth: u32,
    },
    StairsTaken {
        from_level: u32,
    },
    LevelChanged {
        old_level: u32,
        new_level: u32,
        theme: String,
    },
    RunEnded {
        escaped: bool,
        score: u64,
        gold_lost: u64,
        level: u32,
        rooms: u32,
        best: u64,
        new_best: bool,
    },
    GameOverShown,

    // ===== 遭遇事件 =====
    TreasureFound {
        name: String,
        value: u32,
    },
    EncounterStarted {
        kind: ThreatKind,
        name: String,
        intro: String,
        sequence_len: usize,
        required_streak: u32,
    },
    EncounterRestarted {
        kind: ThreatKind,
        name: String,
        sequence_len: usize,
    },
    MoveRevealed {
        index: usize,
        total: usize,
        mv: Move,
    },
    InputUnlocked {
        step: usize,
        total: usize,
    },

    // ===== 战斗事件 =====
    CounterResolved {
        kind: ThreatKind,
        step: usize,
        total: usize,
        player: Move,
        opponent: Move,
        adjudication: Adjudication,
    },
    DamageTaken {
        source: String,
        kind: ThreatKind,
        amount: u32,
        health: u32,
    },
    BossStaggered {
        name: String,
        streak: u32,
        required: u32,
    },

    // ===== 奖励事件 =====
    EncounterWon {
        kind: ThreatKind,
        name: String,
        gold: u32,
    },
    BossDefeated {
        name: String,
        gold: u32,
        healed: u32,
    },

    /// 日志消息
    LogMessage { message: String, level: LogLevel },
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// 事件处理器优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// 最高优先级 - 用于关键系统事件
    Critical = 0,
    /// 高优先级 - 用于游戏核心逻辑
    High = 1,
    /// 普通优先级 - 默认优先级
    Normal = 2,
    /// 低优先级 - 用于 UI 更新等
    Low = 3,
    /// 最低优先级 - 用于日志等
    Lowest = 4,
}

/// 事件中间件 trait - 用于在事件处理前/后插入逻辑
pub trait EventMiddleware: Send + Sync {
    /// 返回 true 表示继续处理，false 表示阻止处理
    fn before_handle(&mut self, _event: &GameEvent) -> bool {
        true
    }

    fn after_handle(&mut self, _event: &GameEvent) {}

    /// 中间件名称（用于调试）
    fn name(&self) -> &str;

    fn priority(&self) -> Priority {
        Priority::Normal
    }
}

/// 事件处理器 trait
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &GameEvent);

    /// 事件处理器的名称（用于调试）
    fn name(&self) -> &str;

    /// 优先级（数字越小优先级越高）
    fn priority(&self) -> Priority {
        Priority::Normal
    }

    /// 是否应该处理此事件（事件过滤）
    fn should_handle(&self, _event: &GameEvent) -> bool {
        true
    }
}

/// 事件处理器包装器，包含优先级信息
struct HandlerEntry {
    handler: Box<dyn EventHandler>,
    priority: Priority,
}

/// 中间件包装器，包含优先级信息
struct MiddlewareEntry {
    middleware: Box<dyn EventMiddleware>,
    priority: Priority,
}

/// 事件总线 - 队列模式加订阅者模式
///
/// 发布时立即分发给订阅者，同时放入队列，界面在每帧用 `drain` 取走。
pub struct EventBus {
    /// 当前帧的事件队列
    events: Vec<GameEvent>,
    /// 全局事件处理器（处理所有事件）
    global_handlers: Vec<HandlerEntry>,
    middlewares: Vec<MiddlewareEntry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            global_handlers: Vec::new(),
            middlewares: Vec::new(),
        }
    }

    // ========== 队列模式 API ==========

    /// 发布事件
    pub fn publish(&mut self, event: GameEvent) {
        // 立即触发订阅者处理
        self.dispatch_to_handlers(&event);

        self.events.push(event);
    }

    /// 发布一条日志
    pub fn log(&mut self, message: impl Into<String>, level: LogLevel) {
        self.publish(GameEvent::LogMessage {
            message: message.into(),
            level,
        });
    }

    /// 获取所有待处理事件并清空队列
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    // ========== 中间件 API ==========

    pub fn register_middleware(&mut self, middleware: Box<dyn EventMiddleware>) {
        let priority = middleware.priority();
        self.middlewares.push(MiddlewareEntry {
            middleware,
            priority,
        });

        // 按优先级排序（优先级高的在前面）
        self.middlewares.sort_by(|a, b| a.priority.cmp(&b.priority));
    }

    // ========== 订阅者模式 API ==========

    /// 注册全局事件处理器（处理所有事件）
    pub fn subscribe_all(&mut self, handler: Box<dyn EventHandler>) {
        let priority = handler.priority();
        self.global_handlers.push(HandlerEntry { handler, priority });
        self.global_handlers
            .sort_by(|a, b| a.priority.cmp(&b.priority));
    }

    /// 分发事件给所有订阅者
    fn dispatch_to_handlers(&mut self, event: &GameEvent) {
        if !self.run_middleware_before(event) {
            return;
        }

        for entry in &mut self.global_handlers {
            if entry.handler.should_handle(event) {
                entry.handler.handle(event);
            }
        }

        self.run_middleware_after(event);
    }

    fn run_middleware_before(&mut self, event: &GameEvent) -> bool {
        for entry in &mut self.middlewares {
            if !entry.middleware.before_handle(event) {
                return false;
            }
        }
        true
    }

    fn run_middleware_after(&mut self, event: &GameEvent) {
        for entry in &mut self.middlewares {
            entry.middleware.after_handle(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            GameEvent::RunStarted { .. }
            | GameEvent::DoorPresented { .. }
            | GameEvent::DoorOpened { .. }
            | GameEvent::StairsTaken { .. }
            | GameEvent::LevelChanged { .. }
            | GameEvent::RunEnded { .. }
            | GameEvent::GameOverShown => EventCategory::Progress,

            GameEvent::EncounterStarted { .. }
            | GameEvent::EncounterRestarted { .. }
            | GameEvent::MoveRevealed { .. }
            | GameEvent::InputUnlocked { .. } => EventCategory::Encounter,

            GameEvent::CounterResolved { .. }
            | GameEvent::DamageTaken { .. }
            | GameEvent::BossStaggered { .. } => EventCategory::Combat,

            GameEvent::TreasureFound { .. }
            | GameEvent::EncounterWon { .. }
            | GameEvent::BossDefeated { .. } => EventCategory::Reward,

            GameEvent::LogMessage { .. } => EventCategory::System,
        }
    }
}

// ========== 内置事件中间件 ==========

/// 低于指定级别的日志消息不再分发
pub struct LogLevelFilter {
    min_level: LogLevel,
}

impl LogLevelFilter {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

fn level_rank(level: LogLevel) -> u8 {
    match level {
        LogLevel::Debug => 0,
        LogLevel::Info => 1,
        LogLevel::Warning => 2,
        LogLevel::Error => 3,
    }
}

impl EventMiddleware for LogLevelFilter {
    fn before_handle(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::LogMessage { level, .. } => level_rank(*level) >= level_rank(self.min_level),
            _ => true,
        }
    }

    fn name(&self) -> &str {
        "LogLevelFilter"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }
}

// ========== 内置事件处理器 ==========

/// 日志记录器 - 把事件描述写入共享的消息列表
pub struct LoggingHandler {
    messages: Arc<Mutex<Vec<String>>>,
    capacity: usize,
}

impl LoggingHandler {
    pub fn new(messages: Arc<Mutex<Vec<String>>>) -> Self {
        Self::with_capacity(messages, 200)
    }

    pub fn with_capacity(messages: Arc<Mutex<Vec<String>>>, capacity: usize) -> Self {
        Self {
            messages,
            capacity: capacity.max(1),
        }
    }
}

impl EventHandler for LoggingHandler {
    fn handle(&mut self, event: &GameEvent) {
        let Some(message) = narration::describe(event) else {
            return;
        };

        if let Ok(mut logs) = self.messages.lock() {
            logs.push(message);
            let overflow = logs.len().saturating_sub(self.capacity);
            if overflow > 0 {
                logs.drain(..overflow);
            }
        }
    }

    fn name(&self) -> &str {
        "LoggingHandler"
    }

    fn priority(&self) -> Priority {
        Priority::Lowest // 日志记录优先级最低
    }
}

/// 本局统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub rooms_opened: u32,
    pub treasures_found: u32,
    pub monsters_defeated: u32,
    pub traps_disarmed: u32,
    pub traps_sprung: u32,
    pub bosses_defeated: u32,
    pub counters_landed: u32,
    pub counters_failed: u32,
    pub damage_taken: u32,
    pub gold_earned: u64,
}

/// 统计处理器 - 汇总伤害、金币与击败数
pub struct RunStatsHandler {
    stats: Arc<Mutex<RunStats>>,
}

impl RunStatsHandler {
    pub fn new(stats: Arc<Mutex<RunStats>>) -> Self {
        Self { stats }
    }
}

impl EventHandler for RunStatsHandler {
    fn handle(&mut self, event: &GameEvent) {
        let Ok(mut stats) = self.stats.lock() else {
            return;
        };
        match event {
            GameEvent::DoorOpened { .. } => stats.rooms_opened += 1,
            GameEvent::TreasureFound { value, .. } => {
                stats.treasures_found += 1;
                stats.gold_earned += u64::from(*value);
            }
            GameEvent::CounterResolved { adjudication, .. } => {
                if adjudication.is_win() {
                    stats.counters_landed += 1;
                } else {
                    stats.counters_failed += 1;
                }
            }
            GameEvent::DamageTaken { kind, amount, .. } => {
                stats.damage_taken += amount;
                if *kind == ThreatKind::Trap {
                    stats.traps_sprung += 1;
                }
            }
            GameEvent::EncounterWon { kind, gold, .. } => {
                stats.gold_earned += u64::from(*gold);
                match kind {
                    ThreatKind::Trap => stats.traps_disarmed += 1,
                    _ => stats.monsters_defeated += 1,
                }
            }
            GameEvent::BossDefeated { gold, .. } => {
                stats.gold_earned += u64::from(*gold);
                stats.bosses_defeated += 1;
            }
            _ => {}
        }
    }

    fn name(&self) -> &str {
        "RunStatsHandler"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn should_handle(&self, event: &GameEvent) -> bool {
        matches!(
            event.category(),
            EventCategory::Progress | EventCategory::Combat | EventCategory::Reward
        )
    }
}
