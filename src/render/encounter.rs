// src/render/encounter.rs
//! 房间渲染：门、宝藏、遭遇与招式展示
//!
//! 展示期间只显示最新一个招式，轮到玩家时序列全部隐藏，只标出已破解的步数。

use combat::{CombatPhase, Move, SequenceCombat};
use dungeon::{Opponent, TreasureFind};
use hero::{Class, RunState, ThreatKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::game::GamePhase;

pub struct EncounterRenderer;

impl EncounterRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        phase: GamePhase,
        run: &RunState,
        combat: &SequenceCombat,
        treasure: Option<&TreasureFind>,
    ) {
        match (phase, combat.opponent()) {
            (GamePhase::CombatActive, Some(opponent)) => {
                self.render_combat(frame, area, run.class, opponent, combat)
            }
            (GamePhase::DoorPresented { stairs }, _) => {
                self.render_door(frame, area, stairs, run.treasure())
            }
            (GamePhase::RoomResolved, _) => match treasure {
                Some(find) => self.render_treasure(frame, area, find),
                None => self.render_notice(frame, area, "The way ahead is clear...", Color::Green),
            },
            (GamePhase::RoomOpening, _) => {
                self.render_notice(frame, area, "The door creaks open...", Color::Gray)
            }
            (GamePhase::Descending, _) => {
                self.render_notice(frame, area, "You descend the stairs...", Color::Cyan)
            }
            _ => self.render_notice(frame, area, "", Color::Gray),
        }
    }

    fn render_door(&self, frame: &mut Frame, area: Rect, stairs: bool, gold: u64) {
        let (art, title, action) = if stairs {
            ("  ▟▙\n ▟██▙\n▟████▙", "Stairs lead deeper", "[Enter] Take Stairs")
        } else {
            ("┌────┐\n│  ▪ │\n│    │\n└────┘", "A door stands before you", "[Enter] Open Door")
        };

        let mut lines: Vec<Line> = art
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Yellow))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(action, Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(
                format!("[x] Exit with {} gold", gold),
                Style::default().fg(Color::Yellow),
            ),
        ]));

        let door = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(door, area);
    }

    fn render_treasure(&self, frame: &mut Frame, area: Rect, find: &TreasureFind) {
        let lines = vec![
            Line::from(Span::styled(
                "✦ TREASURE ✦",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(find.name.clone()),
            Line::from(Span::styled(
                format!("+{} gold", find.value),
                Style::default().fg(Color::Yellow),
            )),
        ];
        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(panel, area);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, text: &str, color: Color) {
        let panel = Paragraph::new(text.to_string())
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(panel, area);
    }

    fn render_combat(
        &self,
        frame: &mut Frame,
        area: Rect,
        class: Class,
        opponent: &Opponent,
        combat: &SequenceCombat,
    ) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // 对手
                Constraint::Min(3),    // 招式展示
                Constraint::Length(3), // 玩家按钮
            ])
            .split(area);

        self.render_opponent(frame, layout[0], opponent, combat);
        self.render_sequence(frame, layout[1], class, opponent.kind, combat);
        self.render_buttons(frame, layout[2], class, opponent.kind, combat.awaiting_input());
    }

    fn render_opponent(
        &self,
        frame: &mut Frame,
        area: Rect,
        opponent: &Opponent,
        combat: &SequenceCombat,
    ) {
        let color = match opponent.kind {
            ThreatKind::Boss => Color::Magenta,
            ThreatKind::Trap => Color::Yellow,
            ThreatKind::Monster => Color::Red,
        };

        let mut title = vec![Span::styled(
            opponent.name.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if let Some(streak) = combat.streak().filter(|_| opponent.is_boss()) {
            title.push(Span::raw("  "));
            title.push(Span::styled(
                format!("Streak {}/{}", streak.current(), streak.required()),
                Style::default().fg(Color::Cyan),
            ));
        }

        let mut lines = vec![Line::from(title)];
        if let Some(flavor) = &opponent.flavor {
            lines.push(Line::from(Span::styled(
                flavor.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        let panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(panel, area);
    }

    fn render_sequence(
        &self,
        frame: &mut Frame,
        area: Rect,
        class: Class,
        kind: ThreatKind,
        combat: &SequenceCombat,
    ) {
        let total = combat.sequence().map_or(0, |s| s.len());
        let lines = match combat.phase() {
            CombatPhase::Introducing => vec![Line::from("Watch closely...")],
            CombatPhase::Revealing(_) => {
                let revealed = combat.revealed_moves();
                match revealed.last() {
                    Some(mv) => vec![
                        Line::from(format!("Move {} of {}", revealed.len(), total)),
                        Line::from(Span::styled(
                            format!("{} {}", move_icon(*mv), mv.label(class, kind)),
                            Style::default()
                                .fg(Color::Red)
                                .add_modifier(Modifier::BOLD),
                        )),
                    ],
                    None => vec![Line::from("Watch closely...")],
                }
            }
            CombatPhase::AwaitingPlayerMove(step) => {
                let progress: String = (0..total)
                    .map(|i| if i < step { "✓ " } else { "? " })
                    .collect();
                vec![
                    Line::from(Span::styled(
                        format!("Counter move {} of {}", step + 1, total),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(progress),
                ]
            }
            _ => vec![Line::from("")],
        };

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Sequence"))
            .alignment(Alignment::Center);
        frame.render_widget(panel, area);
    }

    fn render_buttons(
        &self,
        frame: &mut Frame,
        area: Rect,
        class: Class,
        kind: ThreatKind,
        enabled: bool,
    ) {
        let style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let spans: Vec<Span> = Move::ALL
            .iter()
            .flat_map(|mv| {
                [
                    Span::styled(
                        format!("[{}] {} {}", move_key(*mv), move_icon(*mv), mv.label(class, kind)),
                        style,
                    ),
                    Span::raw("   "),
                ]
            })
            .collect();

        let buttons = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::TOP))
            .alignment(Alignment::Center);
        frame.render_widget(buttons, area);
    }
}

impl Default for EncounterRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn move_key(mv: Move) -> char {
    match mv {
        Move::Rock => 'R',
        Move::Paper => 'P',
        Move::Scissors => 'S',
    }
}

fn move_icon(mv: Move) -> &'static str {
    match mv {
        Move::Rock => "✊",
        Move::Paper => "✋",
        Move::Scissors => "✌",
    }
}
