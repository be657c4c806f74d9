//! 结算界面渲染器
//!
//! 显示逃出或死亡、最终得分、最高分、本局统计以及可分享的挑战码。

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::centered_rect;
use crate::event_bus::RunStats;
use crate::game::RunOutcome;
use crate::narration::game_over_title;

/// 结算界面渲染器
pub struct GameOverRenderer;

impl GameOverRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, outcome: &RunOutcome, stats: &RunStats) {
        let game_over_area = centered_rect(area, 70, 85);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // 标题
                Constraint::Min(8),    // 统计
                Constraint::Length(4), // 挑战码
                Constraint::Length(2), // 提示
            ])
            .split(game_over_area);

        self.render_title(frame, layout[0], outcome);
        self.render_statistics(frame, layout[1], outcome, stats);
        self.render_challenge(frame, layout[2], outcome);

        let hints = Paragraph::new("[Enter] New Run   [q] Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hints, layout[3]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, outcome: &RunOutcome) {
        let escaped = outcome.summary.escaped;
        let (emoji, color) = if escaped {
            ("🏆", Color::Yellow)
        } else {
            ("☠️", Color::Red)
        };

        let mut lines = vec![Line::from(vec![
            Span::raw(emoji),
            Span::raw(" "),
            Span::styled(
                game_over_title(escaped),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(emoji),
        ])];

        if outcome.high_score.is_new_best {
            lines.push(Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )));
        }

        let title = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color)),
            )
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_statistics(
        &self,
        frame: &mut Frame,
        area: Rect,
        outcome: &RunOutcome,
        stats: &RunStats,
    ) {
        let summary = &outcome.summary;
        let row = |label: &str, value: String, color: Color| {
            Line::from(vec![
                Span::styled(format!("{:<18}", label), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        };

        let mut lines = vec![
            row("Final Score", summary.score.to_string(), Color::Yellow),
            row("High Score", outcome.high_score.best.to_string(), Color::Magenta),
            row("Level Reached", summary.level.to_string(), Color::Cyan),
            row("Rooms Explored", summary.rooms.to_string(), Color::Cyan),
        ];
        if summary.gold_lost > 0 {
            lines.push(row(
                "Gold Lost",
                summary.gold_lost.to_string(),
                Color::Red,
            ));
        }
        lines.push(Line::from(""));
        lines.push(row(
            "Monsters Slain",
            stats.monsters_defeated.to_string(),
            Color::White,
        ));
        lines.push(row(
            "Bosses Slain",
            stats.bosses_defeated.to_string(),
            Color::White,
        ));
        lines.push(row(
            "Traps Disarmed",
            format!("{} ({} sprung)", stats.traps_disarmed, stats.traps_sprung),
            Color::White,
        ));
        lines.push(row(
            "Counters",
            format!("{} landed, {} failed", stats.counters_landed, stats.counters_failed),
            Color::White,
        ));
        if let Some(warning) = &outcome.high_score.warning {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                warning.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Run Summary"),
        );
        frame.render_widget(panel, area);
    }

    fn render_challenge(&self, frame: &mut Frame, area: Rect, outcome: &RunOutcome) {
        let challenge = &outcome.challenge;
        let lines = vec![
            Line::from(vec![
                Span::styled("Code: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    challenge.code.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("--challenge {} --from \"{}\"", challenge.code, challenge.from),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Challenge a Friend"))
            .alignment(Alignment::Center);
        frame.render_widget(panel, area);
    }
}

impl Default for GameOverRenderer {
    fn default() -> Self {
        Self::new()
    }
}
