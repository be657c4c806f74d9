//! HUD 渲染器
//!
//! 显示英雄状态：职业、生命值、金币、层数与房间、最高分。

use hero::RunState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::class_selection::{class_color, class_icon};

/// HUD 渲染器
///
/// 布局：
/// ```text
/// | 职业+名字 | ======= 生命值 ======= | 💰金币 | 层/房间 | 最高分 |
/// ```
pub struct HudRenderer;

impl HudRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        run: &RunState,
        theme: &str,
        high_score: u64,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22), // 职业+名字
                Constraint::Min(20),    // 血条
                Constraint::Length(12), // 金币
                Constraint::Length(18), // 层/房间
                Constraint::Length(14), // 最高分
            ])
            .split(rows[0]);

        self.render_identity(frame, columns[0], run);
        self.render_health(frame, columns[1], run);
        self.render_gold(frame, columns[2], run.treasure());

        let depth = Paragraph::new(format!("Lv {}  Room {}", run.level(), run.depth()))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(depth, columns[3]);

        let best = Paragraph::new(format!("Best {}", high_score))
            .style(Style::default().fg(Color::Magenta))
            .alignment(Alignment::Center);
        frame.render_widget(best, columns[4]);

        if let Some(area) = rows.get(1) {
            let theme = Paragraph::new(theme.to_string())
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(theme, *area);
        }
    }

    fn render_identity(&self, frame: &mut Frame, area: Rect, run: &RunState) {
        let text = Line::from(vec![
            Span::styled(class_icon(run.class), Style::default().fg(class_color(run.class))),
            Span::raw(" "),
            Span::styled(
                run.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(text), area);
    }

    fn render_health(&self, frame: &mut Frame, area: Rect, run: &RunState) {
        let ratio = f64::from(run.health()) / f64::from(run.max_health().max(1));
        let label = format!("{}/{}", run.health(), run.max_health());

        // 根据生命值比例选择颜色
        let color = match ratio {
            r if r > 0.6 => Color::Green,
            r if r > 0.3 => Color::Yellow,
            _ => Color::Red,
        };

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .percent((ratio * 100.0).min(100.0) as u16)
            .label(label)
            .use_unicode(true);

        frame.render_widget(gauge, area);
    }

    fn render_gold(&self, frame: &mut Frame, area: Rect, gold: u64) {
        let text = Line::from(vec![
            Span::styled("💰 ", Style::default().fg(Color::Yellow)),
            Span::styled(
                gold.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }
}

impl Default for HudRenderer {
    fn default() -> Self {
        Self::new()
    }
}
