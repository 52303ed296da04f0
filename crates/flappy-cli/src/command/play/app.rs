use crossterm::event::Event;
use flappy_engine::GameConfig;
use ratatui::Frame;

use crate::{
    command::play::screens::Screen,
    schema::ai_model::AiModel,
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    tick_rate: u32,
    screen: Screen,
}

impl PlayApp {
    pub fn manual(config: GameConfig, opponent: Option<&AiModel>) -> anyhow::Result<Self> {
        Ok(Self {
            tick_rate: config.tick_rate,
            screen: Screen::manual(config, opponent)?,
        })
    }

    pub fn auto(config: GameConfig, model: &AiModel, turbo: bool) -> anyhow::Result<Self> {
        Ok(Self {
            tick_rate: config.tick_rate,
            screen: Screen::auto(config, model, turbo)?,
        })
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(f64::from(self.tick_rate));
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update();
    }
}
