use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{episode_display::*, field_display::*, stats_display::*};

mod episode_display;
mod field_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const SKY: Color = Color::Rgb(78, 192, 202);
    pub const PIPE: Color = Color::Rgb(115, 191, 46);
    pub const LAND: Color = Color::Rgb(222, 216, 149);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIMMED: Style = fg_bg(color::GRAY, color::BLACK);
    pub const SKY: Style = bg_only(color::SKY);
    pub const PIPE: Style = bg_only(color::PIPE);
    pub const LAND: Style = bg_only(color::LAND);
    pub const HUMAN_AGENT: Style = fg_bg(color::BLACK, color::ORANGE);
    pub const CONTROLLER_AGENT: Style = fg_bg(color::BLACK, color::YELLOW);
}

/// Cells taken by the borders and padding of `block`, as `(horizontal, vertical)`.
fn block_margins(block: Option<&BlockWidget>) -> (u16, u16) {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    (outer.width - inner.width, outer.height - inner.height)
}
