use crate::{
    GameConfig,
    core::{Agent, ObstaclePair, Rect},
};

use super::episode::{Episode, EpisodeState};

/// Read-only view of an [`Episode`] taken between two ticks.
///
/// This is everything a renderer needs: obstacle geometry, land bands, agent
/// positions and flags, scores and the generation number.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    episode: &'a Episode,
}

impl<'a> Snapshot<'a> {
    pub(super) fn new(episode: &'a Episode) -> Self {
        Self { episode }
    }

    #[must_use]
    pub fn config(&self) -> &'a GameConfig {
        self.episode.config()
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.episode.generation()
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.episode.ticks()
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.episode.state()
    }

    /// Every obstacle-pair on screen or about to enter it.
    pub fn pairs(&self) -> impl Iterator<Item = &'a ObstaclePair> + 'a {
        self.episode.field().pairs()
    }

    /// Ceiling band followed by ground band.
    #[must_use]
    pub fn land_bands(&self) -> [Rect; 2] {
        let config = self.config();
        [
            Rect::new(0.0, 0.0, config.screen_width, config.land_thickness),
            Rect::new(
                0.0,
                config.screen_height - config.land_thickness,
                config.screen_width,
                config.land_thickness,
            ),
        ]
    }

    #[must_use]
    pub fn agents(&self) -> &'a [Agent] {
        self.episode.agents()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.episode.live_agents().count()
    }

    /// Highest score among all agents, dead or alive.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.agents().iter().map(Agent::score).max().unwrap_or(0)
    }
}
