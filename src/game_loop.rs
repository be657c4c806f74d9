//! 游戏循环
//!
//! `Session` 负责界面切换（职业选择 → 冒险 → 结算），不依赖终端，可直接测试。
//! `GameLoop` 把它和输入源、渲染器、时钟连起来：每帧读取输入，按真实流逝时间推进计时，再绘制。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use error::{GameError, handle_error};
use hero::{Class, RunRng};
use save::{Challenge, FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::event_bus::{LogLevel, LogLevelFilter, LoggingHandler, RunStats, RunStatsHandler};
use crate::game::{Game, GamePhase};
use crate::input::{InputContext, InputEvent, InputSource, UiAction, key_to_action};
use crate::renderer::{Clock, Renderer};

/// 名字最长字符数
pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    ClassSelection { cursor: usize, name: String },
    Playing,
    GameOver,
}

/// 一次程序运行中的界面状态，可以连续进行多局
pub struct Session {
    config: GameConfig,
    screen: Screen,
    game: Option<Game<RunRng>>,
    messages: Arc<Mutex<Vec<String>>>,
    stats: Arc<Mutex<RunStats>>,
    /// 启动时收到的挑战
    challenge: Option<Challenge>,
    quit: bool,
}

impl Session {
    pub fn new(config: GameConfig, challenge: Option<Challenge>) -> Self {
        let cursor = Class::iter().position(|c| c == config.class).unwrap_or(0);
        let name = config.player_name.clone();
        Self {
            config,
            screen: Screen::ClassSelection { cursor, name },
            game: None,
            messages: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(RunStats::default())),
            challenge,
            quit: false,
        }
    }

    pub fn handle_action(&mut self, action: UiAction) -> Result<(), GameError> {
        if action == UiAction::Quit {
            self.quit = true;
            return Ok(());
        }
        if action == UiAction::Confirm && matches!(self.screen, Screen::ClassSelection { .. }) {
            self.start_run();
            return Ok(());
        }

        match &mut self.screen {
            Screen::ClassSelection { cursor, name } => {
                let count = Class::iter().count();
                match action {
                    UiAction::CursorUp => *cursor = (*cursor + count - 1) % count,
                    UiAction::CursorDown => *cursor = (*cursor + 1) % count,
                    UiAction::PickClass(class) => {
                        *cursor = Class::iter().position(|c| c == class).unwrap_or(0)
                    }
                    UiAction::TypeChar(c) if name.chars().count() < MAX_NAME_LEN => name.push(c),
                    UiAction::DeleteChar => {
                        name.pop();
                    }
                    _ => {}
                }
                Ok(())
            }
            Screen::Playing => match (action, self.game.as_mut()) {
                (UiAction::Game(command), Some(game)) => game.handle_input(command),
                _ => Ok(()),
            },
            Screen::GameOver => {
                if action == UiAction::NewRun {
                    self.game = None;
                    let cursor = Class::iter()
                        .position(|c| c == self.config.class)
                        .unwrap_or(0);
                    self.screen = Screen::ClassSelection {
                        cursor,
                        name: self.config.player_name.clone(),
                    };
                }
                Ok(())
            }
        }
    }

    /// 处理一次按键；被拒绝的操作（锁定、没有楼梯等）只记调试日志
    pub fn apply(&mut self, action: UiAction) {
        let Err(e) = self.handle_action(action) else {
            return;
        };
        if let Some(game) = self.game.as_mut() {
            game.events_mut().log(handle_error(&e), LogLevel::Debug);
        }
    }

    fn start_run(&mut self) {
        let Screen::ClassSelection { cursor, name } = &self.screen else {
            return;
        };
        self.config.class = Class::iter().nth(*cursor).unwrap_or_default();
        self.config.player_name = name.trim().to_string();

        let rng = match self.config.seed {
            Some(seed) => RunRng::new(seed),
            None => RunRng::from_entropy(),
        };

        // 存档目录不可用时仍然可以玩，只是不保存最高分
        let (store, store_warning): (Box<dyn HighScoreStore>, Option<String>) =
            match FileHighScoreStore::new(&self.config.save_directory) {
                Ok(store) => (Box::new(store), None),
                Err(e) => (
                    Box::new(MemoryHighScoreStore::new()),
                    Some(format!("High score will not be saved: {}", e)),
                ),
            };

        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
        if let Ok(mut stats) = self.stats.lock() {
            *stats = RunStats::default();
        }

        let mut game = Game::new(self.config.clone(), rng, store);
        let bus = game.events_mut();
        bus.register_middleware(Box::new(LogLevelFilter::new(self.config.log_level)));
        bus.subscribe_all(Box::new(LoggingHandler::with_capacity(
            self.messages.clone(),
            self.config.log_capacity,
        )));
        bus.subscribe_all(Box::new(RunStatsHandler::new(self.stats.clone())));
        if let Some(warning) = store_warning {
            bus.log(warning, LogLevel::Warning);
        }
        game.start();

        self.game = Some(game);
        self.screen = Screen::Playing;
    }

    /// 推进当前这一局的计时
    pub fn tick(&mut self, elapsed: Duration) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        game.advance(elapsed);
        // 订阅者已在发布时处理过，队列只需清空
        game.drain_events();

        if self.screen == Screen::Playing && game.phase() == GamePhase::GameOver {
            self.screen = Screen::GameOver;
        }
    }

    pub fn input_context(&self) -> InputContext {
        match (&self.screen, &self.game) {
            (Screen::ClassSelection { .. }, _) => InputContext::ClassSelection,
            (Screen::Playing, Some(game)) => InputContext::Playing(game.phase()),
            (Screen::Playing, None) => InputContext::ClassSelection,
            (Screen::GameOver, _) => InputContext::GameOver,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn game(&self) -> Option<&Game<RunRng>> {
        self.game.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// 消息日志快照
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> RunStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

/// 主循环
pub struct GameLoop<R: Renderer, I: InputSource, C: Clock> {
    pub session: Session,
    pub renderer: R,
    pub input_source: I,
    pub clock: C,
}

impl<R: Renderer, I: InputSource<Event = InputEvent>, C: Clock> GameLoop<R, I, C> {
    pub fn new(session: Session, renderer: R, input_source: I, clock: C) -> Self {
        Self {
            session,
            renderer,
            input_source,
            clock,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.renderer.init()?;
        let mut last = self.clock.now();

        while !self.session.should_quit() {
            self.renderer.draw(&self.session)?;

            if let Some(event) = self.input_source.poll(self.clock.tick_rate())? {
                match event {
                    InputEvent::Key(key) => {
                        if let Some(action) = key_to_action(key, self.session.input_context()) {
                            self.session.apply(action);
                        }
                    }
                    InputEvent::Resize(width, height) => self.renderer.resize(width, height)?,
                }
            }

            let now = self.clock.now();
            self.session.tick(now.duration_since(last));
            last = now;
        }

        self.renderer.cleanup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use crate::game::Command;

    fn session() -> (Session, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GameConfig::new();
        config.seed = Some(7);
        config.timings = Timings::instant();
        config.save_directory = dir.path().join("saves").to_string_lossy().into_owned();
        (Session::new(config, None), dir)
    }

    #[test]
    fn test_class_selection_edits_name_and_cursor() {
        let (mut session, _dir) = session();
        for c in "Ada".chars() {
            session.handle_action(UiAction::TypeChar(c)).unwrap();
        }
        session.handle_action(UiAction::DeleteChar).unwrap();
        session.handle_action(UiAction::CursorUp).unwrap();

        assert_eq!(
            session.screen(),
            &Screen::ClassSelection {
                cursor: 2,
                name: "Ad".to_string()
            }
        );
    }

    #[test]
    fn test_confirm_starts_a_run_with_chosen_class() {
        let (mut session, _dir) = session();
        session
            .handle_action(UiAction::PickClass(Class::Rogue))
            .unwrap();
        session.handle_action(UiAction::Confirm).unwrap();

        assert_eq!(session.screen(), &Screen::Playing);
        let game = session.game().unwrap();
        assert_eq!(game.run().class, Class::Rogue);
        assert_eq!(
            session.input_context(),
            InputContext::Playing(GamePhase::DoorPresented { stairs: false })
        );
        assert!(!session.messages().is_empty());
    }

    #[test]
    fn test_exit_leads_to_game_over_and_back() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::Confirm).unwrap();
        session
            .handle_action(UiAction::Game(Command::Exit))
            .unwrap();
        session.tick(Duration::ZERO);
        assert_eq!(session.screen(), &Screen::GameOver);

        session.handle_action(UiAction::NewRun).unwrap();
        assert!(matches!(session.screen(), Screen::ClassSelection { .. }));
        assert!(session.game().is_none());
    }

    #[test]
    fn test_rejected_action_is_logged_at_debug() {
        let (mut session, _dir) = session();
        session.config.log_level = LogLevel::Debug;
        session.handle_action(UiAction::Confirm).unwrap();

        session.apply(UiAction::Game(Command::TakeStairs));
        assert!(session
            .messages()
            .contains(&"There are no stairs here yet".to_string()));
        assert_eq!(
            session.input_context(),
            InputContext::Playing(GamePhase::DoorPresented { stairs: false })
        );
    }

    #[test]
    fn test_rejected_action_hidden_at_info() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::Confirm).unwrap();

        session.apply(UiAction::Game(Command::TakeStairs));
        assert!(!session
            .messages()
            .contains(&"There are no stairs here yet".to_string()));
    }

    #[test]
    fn test_quit() {
        let (mut session, _dir) = session();
        session.handle_action(UiAction::Quit).unwrap();
        assert!(session.should_quit());
    }
}
