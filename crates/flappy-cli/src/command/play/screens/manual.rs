use crossterm::event::{Event, KeyCode};
use flappy_engine::GameConfig;
use ratatui::Frame;

use crate::{
    command::play::screens::Game,
    schema::ai_model::AiModel,
    ui::{self, widgets::EpisodeDisplay},
};

/// Keyboard play, optionally against a trained model.
#[derive(Debug)]
pub struct ManualPlayScreen {
    game: Game,
    versus: bool,
    /// A key press arrived since the last tick. Each tick fires at most one impulse.
    requested: bool,
    is_exiting: bool,
}

impl ManualPlayScreen {
    pub fn new(config: GameConfig, opponent: Option<&AiModel>) -> anyhow::Result<Self> {
        let models = opponent.into_iter().collect::<Vec<_>>();
        Ok(Self {
            game: Game::new(config, true, &models)?,
            versus: opponent.is_some(),
            requested: false,
            is_exiting: false,
        })
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let mut rows = vec![];
        if self.versus {
            let score = |human| self.game.score_of(human).unwrap_or(0).to_string();
            rows.push(("YOU:", score(true)));
            rows.push(("AI:", score(false)));
        }
        let display = EpisodeDisplay::new(self.game.snapshot())
            .extra_rows(rows)
            .banner(self.game.banner());
        let help_text = if self.game.is_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else if self.game.paused {
            "Controls: P (Resume) | Q (Quit)"
        } else {
            "Controls: Space ↑ (Flap) | P (Pause) | Q (Quit)"
        };
        ui::draw_episode(frame, display, help_text);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let is_playing = self.game.is_playing();
        let is_over = self.game.is_over();

        if let Some(event) = event.as_key_press_event() {
            match event.code {
                KeyCode::Char(' ') | KeyCode::Up if is_playing => self.requested = true,
                KeyCode::Char('p') => self.game.toggle_pause(),
                KeyCode::Char('r') | KeyCode::Enter if is_over => self.game.restart(),
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self) {
        self.game.tick(self.requested);
        self.requested = false;
    }
}
