use std::iter;

use flappy_engine::Snapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Episode statistics followed by caller-provided rows.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    snapshot: Snapshot<'a>,
    extra: Vec<(&'static str, String)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: Snapshot<'a>) -> Self {
        Self {
            snapshot,
            extra: vec![],
            block: None,
        }
    }

    pub fn extra_rows(self, extra: Vec<(&'static str, String)>) -> Self {
        Self { extra, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        22 + super::block_margins(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        let extra = if self.extra.is_empty() {
            0
        } else {
            self.extra.len() + 1
        };
        u16::try_from(ROWS.len() + extra).unwrap_or(u16::MAX)
            + super::block_margins(self.block.as_ref()).1
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    LabelValue(&'static str, &'static dyn Fn(&Snapshot<'_>) -> String),
}

const ROWS: &[Row] = &[
    Row::LabelValue("SCORE:", &|snapshot| snapshot.best_score().to_string()),
    Row::Empty,
    Row::LabelValue("GENERATION:", &|snapshot| snapshot.generation().to_string()),
    Row::LabelValue("TICKS:", &|snapshot| snapshot.ticks().to_string()),
    Row::LabelValue("TIME:", &|snapshot| {
        let secs = snapshot.config().ticks_to_secs(snapshot.ticks());
        format!("{secs:.1}s")
    }),
    Row::LabelValue("ALIVE:", &|snapshot| {
        format!("{}/{}", snapshot.alive_count(), snapshot.agents().len())
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let extra = self.extra.iter().map(|(label, value)| (*label, value.clone()));
        let separator = (!self.extra.is_empty()).then_some(None);
        let lines = ROWS
            .iter()
            .map(|row| match row {
                Row::Empty => None,
                Row::LabelValue(label, value) => Some((*label, value(&self.snapshot))),
            })
            .chain(separator)
            .chain(extra.map(Some))
            .collect::<Vec<_>>();

        let rows_areas =
            Layout::vertical((0..lines.len()).map(|_| Constraint::Length(1))).split(area);
        for (line, area) in iter::zip(lines, rows_areas.iter().copied()) {
            let Some((label, value)) = line else {
                continue;
            };
            let [label_area, value_area] = area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Fill(1),
            ]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
