// src/hero/src/class.rs

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::core::ThreatKind;

/// 英雄职业枚举
#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    #[default]
    Warrior, // 战士（高生命值，受到怪物伤害降低）

    Rogue, // 盗贼（中等生命值，击败怪物获得更多金币）
    Mage,  // 法师（低生命值，击败 Boss 后完全恢复）
}

/// 职业被动技能
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Passive {
    /// 铁皮：受到怪物伤害 -25%
    IronHide,
    /// 投机者：怪物掉落金币 +25%
    Opportunist,
    /// 奥术复苏：击败 Boss 后生命值回满
    ArcaneRenewal,
}

impl Passive {
    pub fn title(&self) -> &'static str {
        match self {
            Passive::IronHide => "Iron Hide",
            Passive::Opportunist => "Opportunist",
            Passive::ArcaneRenewal => "Arcane Renewal",
        }
    }
}

impl Class {
    /// 获取职业的初始生命值
    pub fn starting_health(&self) -> u32 {
        match self {
            Class::Warrior => 120,
            Class::Rogue => 100,
            Class::Mage => 80,
        }
    }

    /// 职业标识（用于资源查找）
    pub fn id(&self) -> &'static str {
        match self {
            Class::Warrior => "warrior",
            Class::Rogue => "rogue",
            Class::Mage => "mage",
        }
    }

    pub fn passive(&self) -> Passive {
        match self {
            Class::Warrior => Passive::IronHide,
            Class::Rogue => Passive::Opportunist,
            Class::Mage => Passive::ArcaneRenewal,
        }
    }

    /// 职业描述
    pub fn description(&self) -> &'static str {
        match self {
            Class::Warrior => {
                "Mighty! High health. Ability — Iron Hide: takes 25% less damage from monsters."
            }
            Class::Rogue => {
                "Cunning and quick. Ability — Opportunist: earns +25% extra gold from defeated monsters."
            }
            Class::Mage => {
                "Wise and enduring. Ability — Arcane Renewal: fully heals after defeating a boss."
            }
        }
    }

    pub fn image_key(&self) -> String {
        format!("images/classes/{}.png", self.id())
    }

    /// 根据 id 解析职业（大小写不敏感）
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "warrior" => Some(Class::Warrior),
            "rogue" => Some(Class::Rogue),
            "mage" => Some(Class::Mage),
            _ => None,
        }
    }

    /// 应用防御被动后的实际伤害
    ///
    /// 只对普通怪物生效，陷阱与 Boss 不受影响。
    pub fn mitigate_damage(&self, raw: u32, source: ThreatKind) -> u32 {
        match (self.passive(), source) {
            (Passive::IronHide, ThreatKind::Monster) => raw * 3 / 4,
            _ => raw,
        }
    }

    /// 应用金币被动后的奖励
    ///
    /// 只对普通怪物生效，陷阱与 Boss 不受影响。
    pub fn bonus_gold(&self, gold: u32, source: ThreatKind) -> u32 {
        match (self.passive(), source) {
            (Passive::Opportunist, ThreatKind::Monster) => gold * 5 / 4,
            _ => gold,
        }
    }

    /// 击败 Boss 后是否回满生命
    pub fn heals_after_boss(&self) -> bool {
        self.passive() == Passive::ArcaneRenewal
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Class::Warrior => "Warrior",
                Class::Rogue => "Rogue",
                Class::Mage => "Mage",
            }
        )
    }
}
