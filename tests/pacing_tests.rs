//! 默认节奏下各个等待的时长，以及计时步骤不会重复或越过新遭遇

mod helpers;

use std::time::Duration;

use combat::CombatPhase;
use deadly_dungeon::config::GameConfig;
use deadly_dungeon::game::{Command, Game, GamePhase};
use deadly_dungeon::scheduler::{Scheduler, Timer};
use helpers::current_move;
use hero::{Class, ScriptedRng};
use save::MemoryHighScoreStore;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// 默认节奏的一局
fn paced_game(fallback: f64, rooms_per_level: u32) -> Game<ScriptedRng> {
    let mut config = GameConfig::new();
    config.player_name = "Pacer".to_string();
    config.class = Class::Warrior;
    config.rooms_per_level = rooms_per_level;
    let rng = ScriptedRng::new(std::iter::empty::<f64>()).with_fallback(fallback);
    let mut game = Game::new(config, rng, Box::new(MemoryHighScoreStore::new()));
    game.start();
    game
}

#[test]
fn monster_reveal_timeline() {
    let mut game = paced_game(0.0, 5);
    game.handle_input(Command::OpenDoor).unwrap();

    game.advance(ms(1199));
    assert_eq!(game.phase(), GamePhase::RoomOpening);
    game.advance(ms(1));
    assert_eq!(game.phase(), GamePhase::CombatActive);
    assert_eq!(game.combat().phase(), CombatPhase::Introducing);

    // 第一个招式：展示 1500 + 空白 100
    game.advance(ms(1599));
    assert_eq!(game.combat().phase(), CombatPhase::Introducing);
    game.advance(ms(1));
    assert_eq!(game.combat().phase(), CombatPhase::Revealing(0));

    // 最后一个招式后再停留 200 才开放输入
    game.advance(ms(1799));
    assert!(!game.awaiting_move());
    game.advance(ms(1));
    assert!(game.awaiting_move());

    let mv = current_move(&game).unwrap();
    game.handle_input(Command::Choose(mv.counter())).unwrap();
    game.advance(ms(1999));
    assert_eq!(game.phase(), GamePhase::RoomResolved);
    game.advance(ms(1));
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: false });
}

#[test]
fn loss_restarts_after_a_pause() {
    let mut game = paced_game(0.0, 5);
    game.handle_input(Command::OpenDoor).unwrap();
    game.advance(ms(1200 + 1600 + 1800));
    assert!(game.awaiting_move());

    let mv = current_move(&game).unwrap();
    game.handle_input(Command::Choose(mv)).unwrap();
    // 只有一个待处理的重新开始
    assert_eq!(game.scheduler().pending(), 1);
    assert_eq!(
        game.scheduler().scheduled(),
        vec![Timer::RestartCombat {
            epoch: game.combat().epoch()
        }]
    );

    game.advance(ms(1600 + 1599));
    assert_eq!(game.combat().phase(), CombatPhase::Introducing);
    game.advance(ms(1));
    assert_eq!(game.combat().phase(), CombatPhase::Revealing(0));
}

#[test]
fn boss_intro_stagger_and_stairs_timeline() {
    // 每个房间都是 Boss 房
    let mut game = paced_game(0.0, 1);
    game.handle_input(Command::OpenDoor).unwrap();
    game.advance(ms(1200));
    assert!(game.combat().opponent().unwrap().is_boss());

    // Boss 登场多 2500
    game.advance(ms(2500 + 1599));
    assert_eq!(game.combat().phase(), CombatPhase::Introducing);
    game.advance(ms(1));
    assert_eq!(game.combat().phase(), CombatPhase::Revealing(0));
    game.advance(ms(1800));

    for round in 1..=3 {
        assert!(game.awaiting_move(), "round {} should await input", round);
        let mv = current_move(&game).unwrap();
        game.handle_input(Command::Choose(mv.counter())).unwrap();
        if round < 3 {
            game.advance(ms(1200 + 2500 + 1600 + 1800));
        }
    }

    assert_eq!(game.phase(), GamePhase::RoomResolved);
    assert!(game.run().stairs_available());
    game.advance(ms(2999));
    assert_eq!(game.phase(), GamePhase::RoomResolved);
    game.advance(ms(1));
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: true });

    game.handle_input(Command::OpenDoor).unwrap();
    assert_eq!(game.phase(), GamePhase::Descending);
    game.advance(ms(2399));
    assert_eq!(game.run().level(), 1);
    game.advance(ms(1));
    assert_eq!(game.run().level(), 2);
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: false });
}

#[test]
fn game_over_screen_follows_after_a_pause() {
    let mut game = paced_game(0.99, 5);
    game.handle_input(Command::Exit).unwrap();
    game.advance(ms(1499));
    assert_eq!(game.phase(), GamePhase::Ending);
    game.advance(ms(1));
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn stale_reveal_step_cannot_touch_a_new_encounter() {
    let mut game = paced_game(0.0, 5);
    game.handle_input(Command::OpenDoor).unwrap();
    game.advance(ms(1200));
    let old_epoch = game.combat().epoch();

    game.on_timer(Timer::RevealTick {
        epoch: old_epoch + 1,
    });
    game.on_timer(Timer::RestartCombat {
        epoch: old_epoch.wrapping_sub(1),
    });
    assert_eq!(game.combat().phase(), CombatPhase::Introducing);
    assert_eq!(game.scheduler().pending(), 1);
}
