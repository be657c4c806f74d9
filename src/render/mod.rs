//! 模块化渲染系统
//!
//! - `class_selection` - 职业选择与名字输入
//! - `hud` - 生命值、金币、层数
//! - `encounter` - 门、遭遇与招式展示
//! - `game_over` - 结算、最高分与挑战码
//!
//! 渲染器只读取状态，不修改游戏。

pub mod class_selection;
pub mod encounter;
pub mod game_over;
pub mod hud;

pub use class_selection::ClassSelectionRenderer;
pub use encounter::EncounterRenderer;
pub use game_over::GameOverRenderer;
pub use hud::HudRenderer;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 在区域中居中取一块
pub(crate) fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
