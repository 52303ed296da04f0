use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Terminal application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Use this to set the tick rate.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, ...).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self, tui: &mut Tui);
}
