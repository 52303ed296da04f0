use crossterm::event::{Event, KeyCode};
use flappy_engine::GameConfig;
use ratatui::Frame;

use crate::{
    command::play::screens::Game,
    schema::ai_model::AiModel,
    ui::{self, widgets::EpisodeDisplay},
};

/// Simulation ticks per screen tick in turbo mode.
pub const TURBO_TICKS: usize = 20;

/// A trained model playing alone.
#[derive(Debug)]
pub struct AutoPlayScreen {
    game: Game,
    model_name: String,
    turbo: bool,
    is_exiting: bool,
}

impl AutoPlayScreen {
    pub fn new(config: GameConfig, model: &AiModel, turbo: bool) -> anyhow::Result<Self> {
        Ok(Self {
            game: Game::new(config, false, &[model])?,
            model_name: model.name.clone(),
            turbo,
            is_exiting: false,
        })
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let display = EpisodeDisplay::new(self.game.snapshot())
            .extra_rows(vec![("MODEL:", self.model_name.clone())])
            .banner(self.game.banner())
            .turbo(self.turbo);
        let turbo_text = if self.turbo {
            "T (Turbo: ON)"
        } else {
            "T (Turbo: OFF)"
        };
        let help_text = if self.game.is_over() {
            "Controls: R (Restart) | Q (Quit)".to_owned()
        } else if self.game.paused {
            "Controls: P (Resume) | Q (Quit)".to_owned()
        } else {
            format!("Controls: {turbo_text} | P (Pause) | Q (Quit)")
        };
        ui::draw_episode(frame, display, &help_text);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let is_over = self.game.is_over();

        if let Some(event) = event.as_key_press_event() {
            match event.code {
                KeyCode::Char('t') => self.turbo = !self.turbo,
                KeyCode::Char('p') => self.game.toggle_pause(),
                KeyCode::Char('r') | KeyCode::Enter if is_over => self.game.restart(),
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self) {
        let ticks = if self.turbo { TURBO_TICKS } else { 1 };
        for _ in 0..ticks {
            self.game.tick(false);
        }
    }
}
