// src/hero/src/lib.rs

// 核心模块
mod core;
mod rng;

// 子模块
pub mod class;

// 重新导出主要类型
pub use self::{
    class::{Class, Passive},
    core::{RunState, RunSummary, ThreatKind},
    rng::{RandomSource, RunRng, ScriptedRng},
};
