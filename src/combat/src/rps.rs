// src/combat/src/rps.rs
//! 石头剪刀布规则与各职业的动作外观

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

use hero::{Class, RandomSource, ThreatKind};

/// 一次出招
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

/// 单步判定结果
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Adjudication {
    Win,
    Draw,
    Loss,
}

impl Adjudication {
    /// 平局按失败处理
    pub fn is_win(&self) -> bool {
        matches!(self, Adjudication::Win)
    }
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// 均匀随机出招
    pub fn random<R: RandomSource>(rng: &mut R) -> Self {
        Self::ALL[rng.below(Self::ALL.len())]
    }

    /// 本招克制的招式：石头 > 剪刀 > 布 > 石头
    pub fn beats(&self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// 能克制本招的招式
    pub fn counter(&self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'r' | '1' => Some(Move::Rock),
            'p' | '2' => Some(Move::Paper),
            's' | '3' => Some(Move::Scissors),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// 某职业使用此招时的图像
    pub fn image(&self, class: Class) -> String {
        format!("images/rps_actions/{}_{}.png", class.id(), self.id())
    }

    /// 玩家职业在不同遭遇下的招式名称，Boss 与怪物相同
    pub fn label(&self, class: Class, against: ThreatKind) -> &'static str {
        let trap = against == ThreatKind::Trap;
        match (class, trap, self) {
            (Class::Warrior, false, Move::Rock) => "Axe Cleave",
            (Class::Warrior, false, Move::Paper) => "Shield Bash",
            (Class::Warrior, false, Move::Scissors) => "Sword Lunge",
            (Class::Warrior, true, Move::Rock) => "Brute Force",
            (Class::Warrior, true, Move::Paper) => "Cautious Step",
            (Class::Warrior, true, Move::Scissors) => "Wedge & Pry",
            (Class::Rogue, false, Move::Rock) => "Shadow Strike",
            (Class::Rogue, false, Move::Paper) => "Evasive Dodge",
            (Class::Rogue, false, Move::Scissors) => "Swift Stab",
            (Class::Rogue, true, Move::Rock) => "Careful Probe",
            (Class::Rogue, true, Move::Paper) => "Disarm Tools",
            (Class::Rogue, true, Move::Scissors) => "Nimble Fingers",
            (Class::Mage, false, Move::Rock) => "Fireball",
            (Class::Mage, false, Move::Paper) => "Force Shield",
            (Class::Mage, false, Move::Scissors) => "Lightning Bolt",
            (Class::Mage, true, Move::Rock) => "Detect Rune",
            (Class::Mage, true, Move::Paper) => "Dispel Magic",
            (Class::Mage, true, Move::Scissors) => "Telekinetic Nudge",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "Rock"),
            Move::Paper => write!(f, "Paper"),
            Move::Scissors => write!(f, "Scissors"),
        }
    }
}

/// 判定玩家出招对阵对手出招的结果
pub fn adjudicate(player: Move, opponent: Move) -> Adjudication {
    if player == opponent {
        Adjudication::Draw
    } else if player.beats() == opponent {
        Adjudication::Win
    } else {
        Adjudication::Loss
    }
}
