use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use self::widgets::{EpisodeDisplay, FIELD_ROWS, style};

pub mod widgets;

/// Draws `display` with a one-line help text below it.
pub fn draw_episode(frame: &mut Frame<'_>, display: EpisodeDisplay<'_>, help_text: &str) {
    let help_text = Text::from(help_text).style(style::DIMMED).centered();
    let [main_area, help_area] =
        Layout::vertical([Constraint::Length(FIELD_ROWS + 2), Constraint::Length(1)])
            .areas::<2>(frame.area());
    frame.render_widget(display, main_area);
    frame.render_widget(help_text, help_area);
}
