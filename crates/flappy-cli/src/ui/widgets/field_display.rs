use flappy_engine::{GameConfig, Rect as WorldRect, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Terminal cells used for the whole screen width.
pub const FIELD_COLUMNS: u16 = 80;
/// Terminal cells used for the whole screen height.
pub const FIELD_ROWS: u16 = 30;

/// Renders the obstacles, land bands and live agents of a snapshot.
///
/// World coordinates are scaled to the inner area, so the whole screen always
/// fits regardless of the area size.
#[derive(Debug)]
pub struct FieldDisplay<'a> {
    snapshot: Snapshot<'a>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> FieldDisplay<'a> {
    pub fn new(snapshot: Snapshot<'a>) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        FIELD_COLUMNS + super::block_margins(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        FIELD_ROWS + super::block_margins(self.block.as_ref()).1
    }
}

impl Widget for FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &FieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let config = self.snapshot.config();

        buf.set_style(area, style::SKY);
        let pipes = self.snapshot.pairs().flat_map(|pair| pair.rects());
        for rect in pipes {
            if let Some(cells) = project(&rect, config, area) {
                buf.set_style(cells, style::PIPE);
            }
        }
        for rect in self.snapshot.land_bands() {
            if let Some(cells) = project(&rect, config, area) {
                buf.set_style(cells, style::LAND);
            }
        }
        for agent in self.snapshot.agents().iter().filter(|a| a.is_alive()) {
            let Some(cells) = project(&agent.rect(), config, area) else {
                continue;
            };
            let style = if agent.input().is_human() {
                style::HUMAN_AGENT
            } else {
                style::CONTROLLER_AGENT
            };
            buf.set_style(cells, style);
        }
    }
}

/// Maps a world rectangle onto the cells of `area` it touches.
///
/// Parts outside the screen are clipped. Returns `None` when nothing is left.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn project(rect: &WorldRect, config: &GameConfig, area: Rect) -> Option<Rect> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let columns = f32::from(area.width);
    let rows = f32::from(area.height);
    let scale_x = columns / config.screen_width;
    let scale_y = rows / config.screen_height;

    let left = (rect.left * scale_x).floor().clamp(0.0, columns);
    let right = (rect.right() * scale_x).ceil().clamp(0.0, columns);
    let top = (rect.top * scale_y).floor().clamp(0.0, rows);
    let bottom = (rect.bottom() * scale_y).ceil().clamp(0.0, rows);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
