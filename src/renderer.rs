//! Ratatui renderer implementation.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::game_loop::{Screen, Session};
use crate::render::{ClassSelectionRenderer, EncounterRenderer, GameOverRenderer, HudRenderer};

/// Trait for rendering the session
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> anyhow::Result<()>;

    /// Draw the current screen
    fn draw(&mut self, session: &Session) -> anyhow::Result<()>;

    /// Handle terminal resize
    fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<()>;

    /// Cleanup resources
    fn cleanup(&mut self) -> anyhow::Result<()>;
}

/// Trait for time management
pub trait Clock {
    /// Get the current time
    fn now(&self) -> Instant;

    /// 每帧等待输入的最长时间
    fn tick_rate(&self) -> Duration;
}

/// 组合各个界面的渲染器，与终端无关
pub struct ScreenRenderer {
    class_selection: ClassSelectionRenderer,
    hud: HudRenderer,
    encounter: EncounterRenderer,
    game_over: GameOverRenderer,
}

impl ScreenRenderer {
    pub fn new() -> Self {
        Self {
            class_selection: ClassSelectionRenderer::new(),
            hud: HudRenderer::new(),
            encounter: EncounterRenderer::new(),
            game_over: GameOverRenderer::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, session: &Session) {
        let area = frame.area();
        match (session.screen(), session.game()) {
            (Screen::ClassSelection { cursor, name }, _) => {
                self.class_selection
                    .render(frame, area, *cursor, name, session.challenge());
            }
            (Screen::GameOver, Some(game)) => match game.outcome() {
                Some(outcome) => self.game_over.render(frame, area, outcome, &session.stats()),
                None => render_messages(frame, area, &session.messages()),
            },
            (Screen::Playing, Some(game)) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // HUD
                        Constraint::Min(10),   // 房间
                        Constraint::Length(8), // 消息栏
                    ])
                    .split(area);

                self.hud.render(
                    frame,
                    chunks[0],
                    game.run(),
                    game.level_theme().title,
                    game.high_score(),
                );
                self.encounter.render(
                    frame,
                    chunks[1],
                    game.phase(),
                    game.run(),
                    game.combat(),
                    game.last_treasure(),
                );
                render_messages(frame, chunks[2], &session.messages());
            }
            (_, None) => render_messages(frame, area, &session.messages()),
        }
    }
}

impl Default for ScreenRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 消息栏，只显示放得下的最近几条
fn render_messages(frame: &mut Frame, area: Rect, messages: &[String]) {
    let visible = area.height.saturating_sub(1) as usize;
    let start = messages.len().saturating_sub(visible);
    let lines: Vec<Line> = messages[start..]
        .iter()
        .map(|m| Line::from(m.clone()))
        .collect();

    let log = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    frame.render_widget(log, area);
}

/// Ratatui terminal renderer implementation
pub struct RatatuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    screens: ScreenRenderer,
}

impl RatatuiRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            screens: ScreenRenderer::new(),
        })
    }
}

impl Renderer for RatatuiRenderer {
    fn init(&mut self) -> anyhow::Result<()> {
        self.terminal.clear()?;
        self.terminal.hide_cursor()?;
        Ok(())
    }

    fn draw(&mut self, session: &Session) -> anyhow::Result<()> {
        let screens = &self.screens;
        self.terminal.draw(|f| screens.render(f, session))?;
        Ok(())
    }

    fn resize(&mut self, _width: u16, _height: u16) -> anyhow::Result<()> {
        self.terminal.autoresize()?;
        Ok(())
    }

    fn cleanup(&mut self) -> anyhow::Result<()> {
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Clock implementation for time management
pub struct GameClock {
    tick_rate: Duration,
}

impl GameClock {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }
}

impl Clock for GameClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}
