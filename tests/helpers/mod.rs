#![allow(dead_code)]

//! 集成测试共用的构造与操作

use combat::{CombatPhase, Move};
use deadly_dungeon::config::{GameConfig, Timings};
use deadly_dungeon::game::{Command, Game};
use deadly_dungeon::scheduler::Scheduler;
use hero::{Class, RandomSource, ScriptedRng};
use save::{HighScoreStore, MemoryHighScoreStore};

/// 全部延迟为零的配置
pub fn instant_config(class: Class) -> GameConfig {
    let mut config = GameConfig::new();
    config.player_name = "Tester".to_string();
    config.class = class;
    config.timings = Timings::instant();
    config
}

/// 固定随机数的一局：0.0 让普通房间全是怪物，0.99 全是宝藏
pub fn scripted_game(class: Class, fallback: f64) -> Game<ScriptedRng> {
    scripted_game_with(instant_config(class), fallback, Box::new(MemoryHighScoreStore::new()))
}

pub fn scripted_game_with(
    config: GameConfig,
    fallback: f64,
    store: Box<dyn HighScoreStore>,
) -> Game<ScriptedRng> {
    let rng = ScriptedRng::new(std::iter::empty::<f64>()).with_fallback(fallback);
    let mut game = Game::new(config, rng, store);
    game.start();
    game
}

/// 当前要破解的招式
pub fn current_move<R: RandomSource, S: Scheduler>(game: &Game<R, S>) -> Option<Move> {
    match game.combat().phase() {
        CombatPhase::AwaitingPlayerMove(step) => game.combat().sequence()?.get(step),
        _ => None,
    }
}

/// 一直正确破解，直到遭遇结束（Boss 的多轮也包括在内）
pub fn counter_everything<R: RandomSource, S: Scheduler>(game: &mut Game<R, S>) -> usize {
    let mut moves = 0;
    loop {
        game.settle();
        let Some(mv) = current_move(game) else {
            return moves;
        };
        game.handle_input(Command::Choose(mv.counter()))
            .expect("counter should be accepted");
        moves += 1;
    }
}

/// 出与对手相同的招（平局按失败处理）
pub fn mirror_once<R: RandomSource, S: Scheduler>(game: &mut Game<R, S>) {
    game.settle();
    let mv = current_move(game).expect("encounter should await a move");
    game.handle_input(Command::Choose(mv))
        .expect("move should be accepted");
}

/// 开门并处理房间，回到下一扇门前
pub fn clear_room<R: RandomSource, S: Scheduler>(game: &mut Game<R, S>) {
    game.handle_input(Command::OpenDoor)
        .expect("door should open");
    counter_everything(game);
    game.settle();
}
