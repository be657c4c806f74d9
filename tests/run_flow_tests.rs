//! 一局冒险的完整流程：开门、宝藏、怪物、陷阱、Boss、楼梯、死亡与逃出

mod helpers;

use combat::Move;
use deadly_dungeon::event_bus::GameEvent;
use deadly_dungeon::game::{Command, GamePhase};
use dungeon::rewards::victory_gold;
use error::GameError;
use helpers::*;
use hero::{Class, ScriptedRng, ThreatKind};
use pretty_assertions::assert_eq;

#[test]
fn treasure_room_adds_gold_and_returns_to_a_door() {
    let mut game = scripted_game(Class::Rogue, 0.99);
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();

    let find = game.last_treasure().cloned();
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: false });
    assert_eq!(game.run().depth(), 1);
    let find = find.expect("treasure should be recorded");
    assert!(find.value > 0);
    assert_eq!(game.run().treasure(), u64::from(find.value));

    let events = game.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TreasureFound { value, .. } if *value == find.value)));
}

#[test]
fn monster_victory_pays_reward() {
    let mut game = scripted_game(Class::Warrior, 0.0);
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();

    assert_eq!(game.phase(), GamePhase::CombatActive);
    assert!(game.awaiting_move());
    let opponent = game.combat().opponent().unwrap().clone();
    assert_eq!(opponent.kind, ThreatKind::Monster);
    // 第 1 层序列只有一个招式
    assert_eq!(game.combat().sequence().unwrap().len(), 1);

    let mv = current_move(&game).unwrap();
    game.handle_input(Command::Choose(mv.counter())).unwrap();
    assert_eq!(game.phase(), GamePhase::RoomResolved);

    let expected = victory_gold(
        ThreatKind::Monster,
        Class::Warrior,
        1,
        &mut ScriptedRng::new(std::iter::empty::<f64>()),
    );
    assert_eq!(game.run().treasure(), u64::from(expected));

    game.settle();
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: false });
}

#[test]
fn losing_a_step_costs_health_and_retries_with_a_new_sequence() {
    let mut game = scripted_game(Class::Warrior, 0.0);
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();

    let base = game.combat().opponent().unwrap().base_damage;
    let before = game.run().health();
    let mv = current_move(&game).unwrap();
    // 石头对剪刀：输
    game.handle_input(Command::Choose(mv.beats())).unwrap();

    let expected = Class::Warrior.mitigate_damage(base, ThreatKind::Monster);
    assert_eq!(game.run().health(), before - expected);
    assert_eq!(game.phase(), GamePhase::CombatActive);
    assert!(!game.awaiting_move());
    assert!(matches!(
        game.handle_input(Command::Choose(Move::Paper)),
        Err(GameError::InputLocked)
    ));

    game.settle();
    assert!(game.awaiting_move());
    // 同一个对手，伤害不变
    assert_eq!(game.combat().opponent().unwrap().base_damage, base);
}

#[test]
fn draw_counts_as_a_loss() {
    let mut game = scripted_game(Class::Rogue, 0.0);
    game.handle_input(Command::OpenDoor).unwrap();
    let before = game.run().health();
    mirror_once(&mut game);

    assert!(game.run().health() < before);
    assert_eq!(game.run().treasure(), 0);
    assert_eq!(game.phase(), GamePhase::CombatActive);
}

#[test]
fn trap_failure_ends_the_encounter() {
    // 0.5 落在陷阱区间
    let mut game = scripted_game(Class::Mage, 0.5);
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    let trap = game.combat().opponent().unwrap().clone();
    assert_eq!(trap.kind, ThreatKind::Trap);

    let before = game.run().health();
    mirror_once(&mut game);
    assert_eq!(game.phase(), GamePhase::RoomResolved);
    assert_eq!(game.run().health(), before - trap.base_damage);
    assert!(game.combat().opponent().is_none());

    game.settle();
    assert_eq!(
        game.phase(),
        GamePhase::DoorPresented { stairs: false }
    );
}

#[test]
fn boss_guards_every_fifth_room_and_needs_three_clears() {
    let mut game = scripted_game(Class::Warrior, 0.99);
    for _ in 0..4 {
        clear_room(&mut game);
    }
    assert_eq!(game.run().depth(), 4);

    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    let boss = game.combat().opponent().unwrap().clone();
    assert!(boss.is_boss());
    assert_eq!(boss.required_streak, 3);

    let moves = counter_everything(&mut game);
    assert_eq!(moves, 3);

    let events = game.drain_events();
    let staggers = events
        .iter()
        .filter(|e| matches!(e, GameEvent::BossStaggered { .. }))
        .count();
    assert_eq!(staggers, 2);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::BossDefeated { .. })));
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: true });
}

#[test]
fn stairs_lead_to_the_next_level() {
    let mut game = scripted_game(Class::Rogue, 0.99);
    for _ in 0..5 {
        clear_room(&mut game);
    }
    assert!(game.run().stairs_available());
    assert!(matches!(
        game.handle_input(Command::Choose(Move::Rock)),
        Err(GameError::NoActiveEncounter)
    ));

    game.handle_input(Command::TakeStairs).unwrap();
    assert_eq!(game.phase(), GamePhase::Descending);
    game.settle();

    assert_eq!(game.run().level(), 2);
    // 房间数跨层累计，下一个 Boss 在第 10 间
    assert_eq!(game.run().depth(), 5);
    assert!(!game.run().stairs_available());
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: false });

    clear_room(&mut game);
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    assert_eq!(game.run().depth(), 7);
}

#[test]
fn next_level_rooms_use_the_new_theme() {
    let mut game = scripted_game(Class::Warrior, 0.0);
    let first_theme = game.level_theme().title;
    for _ in 0..5 {
        clear_room(&mut game);
    }
    game.handle_input(Command::TakeStairs).unwrap();
    game.settle();

    let theme = game.level_theme();
    assert_eq!(theme.title, game.generator().boss_order().theme(2).title);
    assert_ne!(theme.title, first_theme);

    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    assert_eq!(game.run().depth(), 6);
    let monster = game.combat().opponent().unwrap();
    assert_eq!(monster.kind, ThreatKind::Monster);
    assert!(theme.monsters.contains(&monster.name.as_str()));
    assert_eq!(game.combat().sequence().unwrap().len(), 2);

    counter_everything(&mut game);
    game.settle();
    for _ in 0..3 {
        clear_room(&mut game);
    }
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    assert_eq!(game.run().depth(), 10);
    let boss = game.combat().opponent().unwrap();
    assert!(boss.is_boss());
    assert_eq!(boss.name, theme.boss.name);
    assert_eq!(boss.class, theme.boss.class);
}

#[test]
fn mage_heals_after_boss() {
    let mut config = instant_config(Class::Mage);
    config.rooms_per_level = 1;
    let mut game = scripted_game_with(config, 0.0, Box::new(save::MemoryHighScoreStore::new()));

    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    assert!(game.combat().opponent().unwrap().is_boss());
    mirror_once(&mut game);
    assert!(game.run().health() < game.run().max_health());

    counter_everything(&mut game);
    assert_eq!(game.run().health(), game.run().max_health());
    assert_eq!(game.phase(), GamePhase::DoorPresented { stairs: true });
}

#[test]
fn death_forfeits_all_gold() {
    let mut game = scripted_game(Class::Mage, 0.0);
    clear_room(&mut game);
    let gold = game.run().treasure();
    assert!(gold > 0);

    game.handle_input(Command::OpenDoor).unwrap();
    for _ in 0..200 {
        if game.is_over() {
            break;
        }
        mirror_once(&mut game);
    }

    assert_eq!(game.phase(), GamePhase::Ending);
    assert!(!game.run().is_alive());
    let outcome = game.outcome().unwrap();
    assert!(!outcome.summary.escaped);
    assert_eq!(outcome.summary.score, 0);
    assert_eq!(outcome.summary.gold_lost, gold);
    assert!(!outcome.high_score.is_new_best);

    game.settle();
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(matches!(
        game.handle_input(Command::OpenDoor),
        Err(GameError::RunEnded)
    ));
}

#[test]
fn exit_keeps_the_treasure() {
    let mut game = scripted_game(Class::Warrior, 0.99);
    clear_room(&mut game);
    clear_room(&mut game);
    let gold = game.run().treasure();

    game.handle_input(Command::Exit).unwrap();
    let outcome = game.outcome().unwrap().clone();
    assert!(outcome.summary.escaped);
    assert_eq!(outcome.summary.score, gold);
    assert_eq!(outcome.summary.rooms, 2);
    assert_eq!(outcome.challenge.score(), Some(gold));
    assert_eq!(outcome.challenge.from, "Tester");
}

#[test]
fn exit_is_only_offered_at_a_door() {
    let mut game = scripted_game(Class::Warrior, 0.0);
    game.handle_input(Command::OpenDoor).unwrap();
    game.settle();
    assert!(matches!(
        game.handle_input(Command::Exit),
        Err(GameError::InputLocked)
    ));
    assert!(matches!(
        game.handle_input(Command::OpenDoor),
        Err(GameError::InputLocked)
    ));
}
