//! 把事件转换成玩家看到的文字

use combat::Adjudication;
use hero::ThreatKind;

use crate::event_bus::GameEvent;

/// 生成事件的描述，纯内部事件返回 `None`
pub fn describe(event: &GameEvent) -> Option<String> {
    let text = match event {
        GameEvent::RunStarted { name, class, health } => {
            format!("{} the {} enters the Deadly Dungeon with {} health.", name, class, health)
        }
        GameEvent::DoorPresented { stairs: true, .. } => {
            "A stairway descends to the next level...".to_string()
        }
        GameEvent::DoorPresented { stairs: false, .. } => "A mysterious door awaits...".to_string(),
        GameEvent::DoorOpened { depth } => format!("You push open the door to room {}...", depth),
        GameEvent::StairsTaken { .. } => "You descend the stairs...".to_string(),
        GameEvent::LevelChanged { new_level, theme, .. } => {
            format!("Dungeon Level {}: {}", new_level, theme)
        }
        GameEvent::TreasureFound { name, value } => {
            format!("You found a {} worth {} gold!", name, value)
        }
        GameEvent::EncounterStarted {
            kind: ThreatKind::Boss,
            name,
            intro,
            required_streak,
            ..
        } => format!("{} appears! Defeat it {} times! {}", name, required_streak, intro),
        GameEvent::EncounterStarted { name, intro, .. } => {
            format!("The {} appears! {}", name, intro)
        }
        GameEvent::EncounterRestarted { name, sequence_len, .. } => {
            format!("The {} readies {} new moves...", name, sequence_len)
        }
        GameEvent::MoveRevealed { index, total, .. } => {
            format!("Opponent's Move {} / {}", index + 1, total)
        }
        GameEvent::InputUnlocked { step, total } => {
            format!("Your turn! Counter their sequence ({}/{}).", step + 1, total)
        }
        GameEvent::CounterResolved {
            kind,
            step,
            total,
            adjudication: Adjudication::Win,
            ..
        } if step + 1 < *total => {
            let next = format!("({}/{})", step + 2, total);
            match kind {
                ThreatKind::Monster => format!("SUCCESSFUL COUNTER! Next move {}.", next),
                ThreatKind::Trap => format!("Careful... Next step to disarm {}.", next),
                ThreatKind::Boss => format!("Good hit! Next move {}.", next),
            }
        }
        GameEvent::CounterResolved { .. } => return None,
        GameEvent::DamageTaken {
            source, kind, amount, ..
        } => match kind {
            ThreatKind::Monster => format!("FAIL! You take {} damage.", amount),
            ThreatKind::Trap => {
                format!("OOPS! The {} triggers! You take {} damage.", source, amount)
            }
            ThreatKind::Boss => {
                format!("FAIL! The {} punishes you for {} damage.", source, amount)
            }
        },
        GameEvent::BossStaggered {
            name,
            streak,
            required,
        } => format!(
            "You stagger the {}! Defeats: {}/{}. Prepare for the next assault...",
            name, streak, required
        ),
        GameEvent::EncounterWon {
            kind: ThreatKind::Trap,
            name,
            gold,
        } => format!("CLEVER! You disarmed the {} and recover {} gold.", name, gold),
        GameEvent::EncounterWon { name, gold, .. } => format!(
            "VICTORY! You perfectly countered the {}! Found {} gold.",
            name, gold
        ),
        GameEvent::BossDefeated { name, gold, healed } => {
            let mut text = format!(
                "COLOSSAL VICTORY! You defeated the {} and found {} gold! (Boss reward x{})",
                name,
                gold,
                dungeon::BOSS_REWARD_MULTIPLIER
            );
            if *healed > 0 {
                text.push_str(" Your magic restores your full health!");
            }
            text
        }
        GameEvent::RunEnded {
            escaped,
            score,
            gold_lost,
            level,
            rooms,
            new_best,
            ..
        } => {
            let mut text = if *escaped {
                format!(
                    "You bravely exited Dungeon Level {} after {} rooms with {} gold! Your final score is {}.",
                    level, rooms, score, score
                )
            } else {
                format!(
                    "Your adventure in the Deadly Dungeon ended in defeat after {} rooms. You lost {} gold. Your final score is {}.",
                    rooms, gold_lost, score
                )
            };
            if *new_best {
                text.push_str(" New best score!");
            }
            text
        }
        GameEvent::GameOverShown => return None,
        GameEvent::LogMessage { message, .. } => message.clone(),
    };
    Some(text)
}

/// 结算画面的标题
pub fn game_over_title(escaped: bool) -> &'static str {
    if escaped {
        "You Beat the Dungeon!"
    } else {
        "You Have Perished!"
    }
}
