use crossterm::event::Event;
use flappy_engine::{Episode, GameConfig, InputSource, Snapshot};
use ratatui::Frame;

use crate::{
    command::play::screens::{auto::AutoPlayScreen, manual::ManualPlayScreen},
    schema::ai_model::{AiModel, ModelGenome},
    ui::widgets::Banner,
};

mod auto;
mod manual;

#[derive(Debug)]
pub enum Screen {
    Manual(ManualPlayScreen),
    Auto(AutoPlayScreen),
}

impl Screen {
    pub fn manual(config: GameConfig, opponent: Option<&AiModel>) -> anyhow::Result<Self> {
        Ok(Screen::Manual(ManualPlayScreen::new(config, opponent)?))
    }

    pub fn auto(config: GameConfig, model: &AiModel, turbo: bool) -> anyhow::Result<Self> {
        Ok(Screen::Auto(AutoPlayScreen::new(config, model, turbo)?))
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Screen::Manual(screen) => screen.is_exiting(),
            Screen::Auto(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Manual(screen) => screen.draw(frame),
            Screen::Auto(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Manual(screen) => screen.handle_event(event),
            Screen::Auto(screen) => screen.handle_event(event),
        }
    }

    pub fn update(&mut self) {
        match self {
            Screen::Manual(screen) => screen.update(),
            Screen::Auto(screen) => screen.update(),
        }
    }
}

/// Episode with its agents' bindings, restartable after game over.
#[derive(Debug)]
struct Game {
    episode: Episode,
    genomes: Vec<ModelGenome>,
    human: bool,
    paused: bool,
}

impl Game {
    /// One human agent if `human`, then one controller agent per model.
    fn new(config: GameConfig, human: bool, models: &[&AiModel]) -> anyhow::Result<Self> {
        let mut game = Self {
            episode: Episode::new(config)?,
            genomes: models.iter().map(|model| model.to_genome()).collect(),
            human,
            paused: false,
        };
        game.restart();
        Ok(game)
    }

    fn restart(&mut self) {
        let humans = self.human.then(InputSource::human);
        let controllers = (0..self.genomes.len()).map(InputSource::controller);
        self.episode
            .reset(humans.into_iter().chain(controllers), &mut self.genomes, 0);
        self.paused = false;
    }

    fn snapshot(&self) -> Snapshot<'_> {
        self.episode.snapshot()
    }

    fn is_playing(&self) -> bool {
        !self.paused && self.episode.state().is_running()
    }

    fn is_over(&self) -> bool {
        self.episode.state().is_done()
    }

    fn toggle_pause(&mut self) {
        if self.episode.state().is_running() {
            self.paused = !self.paused;
        }
    }

    fn banner(&self) -> Option<Banner> {
        if self.is_over() {
            Some(Banner::GameOver)
        } else if self.paused {
            Some(Banner::Paused)
        } else {
            None
        }
    }

    fn tick(&mut self, human_request: bool) {
        if self.is_playing() {
            self.episode.tick(&mut self.genomes, &[human_request]);
        }
    }

    /// Score of the first agent bound with `input`.
    fn score_of(&self, human: bool) -> Option<u32> {
        self.episode
            .agents()
            .iter()
            .find(|agent| agent.input().is_human() == human)
            .map(flappy_engine::Agent::score)
    }
}
