//! 职业选择渲染器
//!
//! 名字输入、职业列表与详情，收到挑战时在顶部显示挑战信息

use combat::Move;
use hero::{Class, ThreatKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};
use save::Challenge;
use strum::IntoEnumIterator;

use super::centered_rect;

/// 职业选择渲染器
pub struct ClassSelectionRenderer;

impl ClassSelectionRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        cursor: usize,
        name: &str,
        challenge: Option<&Challenge>,
    ) {
        let selection_area = centered_rect(area, 90, 90);

        // 标题 + 挑战 + 名字 + 内容 + 提示
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(if challenge.is_some() { 3 } else { 0 }),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(selection_area);

        self.render_title(frame, layout[0]);
        if let Some(challenge) = challenge {
            self.render_challenge(frame, layout[1], challenge);
        }
        self.render_name(frame, layout[2], name);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(layout[3]);

        self.render_class_list(frame, content[0], cursor);
        let class = Class::iter().nth(cursor).unwrap_or_default();
        self.render_class_details(frame, content[1], class);
        self.render_hints(frame, layout[4]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled("⚔️  ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "DEADLY DUNGEON",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ⚔️", Style::default().fg(Color::Yellow)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);

        frame.render_widget(title, area);
    }

    fn render_challenge(&self, frame: &mut Frame, area: Rect, challenge: &Challenge) {
        let color = match challenge.score() {
            Some(_) => Color::Magenta,
            None => Color::DarkGray,
        };
        let text = Paragraph::new(challenge.message())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title("Challenge"))
            .alignment(Alignment::Center);
        frame.render_widget(text, area);
    }

    fn render_name(&self, frame: &mut Frame, area: Rect, name: &str) {
        let shown = if name.is_empty() { "_" } else { name };
        let text = Paragraph::new(Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Gray)),
            Span::styled(
                shown.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(text, area);
    }

    fn render_class_list(&self, frame: &mut Frame, area: Rect, cursor: usize) {
        let items: Vec<ListItem> = Class::iter()
            .enumerate()
            .map(|(i, class)| {
                let color = class_color(class);
                let (text, style) = if i == cursor {
                    (
                        format!("▶ {} {}", class_icon(class), class),
                        Style::default()
                            .fg(Color::Black)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    (
                        format!("  {} {}", class_icon(class), class),
                        Style::default().fg(color),
                    )
                };
                ListItem::new(text).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Class")
                .border_style(Style::default().fg(Color::Gray)),
        );
        frame.render_widget(list, area);
    }

    fn render_class_details(&self, frame: &mut Frame, area: Rect, class: Class) {
        let color = class_color(class);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} {}", class_icon(class), class),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Health: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    class.starting_health().to_string(),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Ability: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    class.passive().title(),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(""),
            Line::from(class.description()),
            Line::from(""),
        ];
        lines.extend(Move::ALL.iter().map(|mv| {
            Line::from(vec![
                Span::styled(format!("{:<9}", format!("{}:", mv)), Style::default().fg(Color::Gray)),
                Span::styled(
                    mv.label(class, ThreatKind::Monster),
                    Style::default().fg(color),
                ),
            ])
        }));

        let details = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(details, area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Paragraph::new("[↑↓/1-3] Class   [Type] Name   [Enter] Start   [Esc] Quit")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP))
            .alignment(Alignment::Center);
        frame.render_widget(hints, area);
    }
}

impl Default for ClassSelectionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn class_icon(class: Class) -> &'static str {
    match class {
        Class::Warrior => "⚔",
        Class::Rogue => "🗡",
        Class::Mage => "🔮",
    }
}

pub(crate) fn class_color(class: Class) -> Color {
    match class {
        Class::Warrior => Color::Red,
        Class::Rogue => Color::Green,
        Class::Mage => Color::Blue,
    }
}
