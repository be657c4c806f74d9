//! 输入处理：把终端按键翻译成界面动作

use std::time::Duration;

use combat::Move;
use crossterm::event::{self, Event as CEvent};
use hero::Class;

use crate::game::{Command, GamePhase};

/// Trait for input sources
pub trait InputSource {
    type Event;

    /// Poll for input events with a timeout
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<Self::Event>>;
}

/// 基于 crossterm 的终端输入
#[derive(Debug, Default)]
pub struct ConsoleInput;

impl ConsoleInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for ConsoleInput {
    type Event = InputEvent;

    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<Self::Event>> {
        if event::poll(timeout)? {
            return Ok(InputEvent::from_crossterm(event::read()?));
        }
        Ok(None)
    }
}

/// Terminal input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl InputEvent {
    fn from_crossterm(event: CEvent) -> Option<Self> {
        match event {
            // Windows 上每次按键会同时收到按下与松开
            CEvent::Key(key) if key.kind == event::KeyEventKind::Press => {
                Some(InputEvent::Key(KeyEvent::from(key)))
            }
            CEvent::Resize(width, height) => Some(InputEvent::Resize(width, height)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self { code, ctrl: false }
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Null,
}

impl From<event::KeyEvent> for KeyEvent {
    fn from(key: event::KeyEvent) -> Self {
        Self {
            code: KeyCode::from(key.code),
            ctrl: key.modifiers.contains(event::KeyModifiers::CONTROL),
        }
    }
}

impl From<event::KeyCode> for KeyCode {
    fn from(code: event::KeyCode) -> Self {
        match code {
            event::KeyCode::Char(c) => KeyCode::Char(c),
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Esc => KeyCode::Esc,
            event::KeyCode::Backspace => KeyCode::Backspace,
            event::KeyCode::Up => KeyCode::Up,
            event::KeyCode::Down => KeyCode::Down,
            _ => KeyCode::Null,
        }
    }
}

/// 当前界面，决定按键的含义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    ClassSelection,
    Playing(GamePhase),
    GameOver,
}

/// 界面动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Game(Command),
    CursorUp,
    CursorDown,
    /// 直接选中某个职业
    PickClass(Class),
    Confirm,
    TypeChar(char),
    DeleteChar,
    /// 结算画面返回职业选择
    NewRun,
    Quit,
}

/// 按界面解释按键
pub fn key_to_action(key: KeyEvent, context: InputContext) -> Option<UiAction> {
    if key.ctrl && key.code == KeyCode::Char('c') {
        return Some(UiAction::Quit);
    }

    match context {
        InputContext::ClassSelection => match_key_for_class_selection(key),
        InputContext::Playing(phase) => match_key_for_game(key, phase),
        InputContext::GameOver => match key.code {
            KeyCode::Enter | KeyCode::Char('n') => Some(UiAction::NewRun),
            KeyCode::Esc | KeyCode::Char('q') => Some(UiAction::Quit),
            _ => None,
        },
    }
}

/// 职业选择界面：名字输入与职业切换
fn match_key_for_class_selection(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Up => Some(UiAction::CursorUp),
        KeyCode::Down => Some(UiAction::CursorDown),
        KeyCode::Char('1') => Some(UiAction::PickClass(Class::Warrior)),
        KeyCode::Char('2') => Some(UiAction::PickClass(Class::Rogue)),
        KeyCode::Char('3') => Some(UiAction::PickClass(Class::Mage)),
        KeyCode::Enter => Some(UiAction::Confirm),
        KeyCode::Backspace => Some(UiAction::DeleteChar),
        KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::Char(c) if !c.is_control() => Some(UiAction::TypeChar(c)),
        _ => None,
    }
}

fn match_key_for_game(key: KeyEvent, phase: GamePhase) -> Option<UiAction> {
    match (key.code, phase) {
        (KeyCode::Esc, _) => Some(UiAction::Quit),

        // 出招：r/p/s 或 1/2/3
        (KeyCode::Char(c), GamePhase::CombatActive) => {
            Move::from_key(c).map(|mv| UiAction::Game(Command::Choose(mv)))
        }

        (KeyCode::Enter | KeyCode::Char('o'), GamePhase::DoorPresented { .. }) => {
            Some(UiAction::Game(Command::OpenDoor))
        }
        (KeyCode::Char('t') | KeyCode::Char('>'), GamePhase::DoorPresented { stairs: true }) => {
            Some(UiAction::Game(Command::TakeStairs))
        }
        (KeyCode::Char('x'), GamePhase::DoorPresented { .. }) => {
            Some(UiAction::Game(Command::Exit))
        }
        (KeyCode::Char('q'), _) => Some(UiAction::Quit),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(c))
    }

    #[test]
    fn test_combat_keys_map_to_moves() {
        let context = InputContext::Playing(GamePhase::CombatActive);
        assert_eq!(
            key_to_action(key('r'), context),
            Some(UiAction::Game(Command::Choose(Move::Rock)))
        );
        assert_eq!(
            key_to_action(key('2'), context),
            Some(UiAction::Game(Command::Choose(Move::Paper)))
        );
        assert_eq!(
            key_to_action(key('s'), context),
            Some(UiAction::Game(Command::Choose(Move::Scissors)))
        );
        assert_eq!(key_to_action(key('z'), context), None);
    }

    #[test]
    fn test_door_keys() {
        let door = InputContext::Playing(GamePhase::DoorPresented { stairs: false });
        assert_eq!(
            key_to_action(KeyEvent::plain(KeyCode::Enter), door),
            Some(UiAction::Game(Command::OpenDoor))
        );
        assert_eq!(key_to_action(key('t'), door), None);
        assert_eq!(
            key_to_action(key('x'), door),
            Some(UiAction::Game(Command::Exit))
        );

        let stairs = InputContext::Playing(GamePhase::DoorPresented { stairs: true });
        assert_eq!(
            key_to_action(key('>'), stairs),
            Some(UiAction::Game(Command::TakeStairs))
        );
    }

    #[test]
    fn test_no_game_commands_while_waiting() {
        let waiting = InputContext::Playing(GamePhase::RoomOpening);
        assert_eq!(key_to_action(KeyEvent::plain(KeyCode::Enter), waiting), None);
        assert_eq!(key_to_action(key('r'), waiting), None);
        assert_eq!(key_to_action(key('q'), waiting), Some(UiAction::Quit));
    }

    #[test]
    fn test_class_selection_accepts_name_input() {
        let context = InputContext::ClassSelection;
        assert_eq!(key_to_action(key('A'), context), Some(UiAction::TypeChar('A')));
        assert_eq!(
            key_to_action(key('3'), context),
            Some(UiAction::PickClass(Class::Mage))
        );
        assert_eq!(
            key_to_action(KeyEvent::plain(KeyCode::Backspace), context),
            Some(UiAction::DeleteChar)
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            ctrl: true,
        };
        assert_eq!(
            key_to_action(ctrl_c, InputContext::GameOver),
            Some(UiAction::Quit)
        );
    }
}
