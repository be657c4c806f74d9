//! Deadly Dungeon：开门、遭遇、记忆序列猜拳的终端地牢小游戏

pub mod config;
pub mod event_bus;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod narration;
pub mod render;
pub mod renderer;
pub mod scheduler;

pub use config::{GameConfig, Timings};
pub use game::{Command, Game, GamePhase, RunOutcome};
pub use game_loop::{GameLoop, Screen, Session};
