use flappy_engine::Snapshot;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

use crate::ui::widgets::{FieldDisplay, StatsDisplay, color, style};

/// Message shown on top of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Paused,
    GameOver,
    TrainingFinished,
}

/// Field and statistics panel side by side.
#[derive(Debug)]
pub struct EpisodeDisplay<'a> {
    snapshot: Snapshot<'a>,
    extra_rows: Vec<(&'static str, String)>,
    banner: Option<Banner>,
    turbo: bool,
}

impl<'a> EpisodeDisplay<'a> {
    pub fn new(snapshot: Snapshot<'a>) -> Self {
        Self {
            snapshot,
            extra_rows: vec![],
            banner: None,
            turbo: false,
        }
    }

    pub fn extra_rows(self, extra_rows: Vec<(&'static str, String)>) -> Self {
        Self { extra_rows, ..self }
    }

    pub fn banner(self, banner: Option<Banner>) -> Self {
        Self { banner, ..self }
    }

    pub fn turbo(self, turbo: bool) -> Self {
        Self { turbo, ..self }
    }
}

impl Widget for EpisodeDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_style = match self.banner {
            None if self.turbo => color::MAGENTA,
            None => color::WHITE,
            Some(Banner::Paused) => color::YELLOW,
            Some(Banner::GameOver | Banner::TrainingFinished) => color::RED,
        };

        let field = FieldDisplay::new(self.snapshot)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let stats = StatsDisplay::new(self.snapshot)
            .extra_rows(self.extra_rows)
            .block(
                Block::bordered()
                    .title(Line::from("STATS").centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let [field_column, stats_column] = Layout::horizontal([
            Constraint::Length(field.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [field_area] =
            Layout::vertical([Constraint::Length(field.height())]).areas(field_column);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        let field_width = field.width();
        field.render(field_area, buf);
        stats.render(stats_area, buf);

        let popup = self.banner.map(|banner| match banner {
            Banner::Paused => ("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)),
            Banner::GameOver => ("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)),
            Banner::TrainingFinished => {
                ("TRAINING FINISHED", Style::new().fg(color::WHITE).bg(color::RED))
            }
        });
        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = field_area.centered(Constraint::Length(field_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
