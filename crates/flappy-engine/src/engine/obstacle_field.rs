use std::collections::VecDeque;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{ConfigError, GameConfig, core::ObstaclePair};

use super::field_seed::FieldSeed;

/// Queue of upcoming and passed obstacle-pairs.
///
/// # Queues
///
/// - **live**: pairs not yet cleared by the lead agent, ordered by spawn time
///   (front = nearest upcoming). Scoring and controller inputs only look at the
///   front pair.
/// - **passed**: pairs already cleared but still on screen. They are kept so
///   trailing agents still collide with them, and are reaped once their
///   trailing edge leaves the left edge of the screen.
///
/// Every entry is a whole [`ObstaclePair`], so a half pair can never be spawned,
/// moved or reaped on its own.
///
/// # Example
///
/// ```
/// use flappy_engine::{FieldSeed, GameConfig, ObstacleField};
///
/// let config = GameConfig::default();
/// let mut field = ObstacleField::with_seed(config, FieldSeed::from_u64(1))?;
/// field.spawn();
///
/// for _ in 0..100 {
///     field.advance();
///     field.maybe_spawn();
///     field.reap();
/// }
/// assert!(field.live().len() >= 2);
/// # Ok::<(), flappy_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ObstacleField {
    config: GameConfig,
    rng: Pcg32,
    live: VecDeque<ObstaclePair>,
    passed: VecDeque<ObstaclePair>,
}

impl ObstacleField {
    /// Creates an empty field with a random seed.
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic gap heights.
    pub fn with_seed(config: GameConfig, seed: FieldSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Pcg32::from_seed(seed.0),
            live: VecDeque::new(),
            passed: VecDeque::new(),
        })
    }

    /// Restarts the gap-height sequence from `seed`.
    pub fn reseed(&mut self, seed: FieldSeed) {
        self.rng = Pcg32::from_seed(seed.0);
    }

    /// Removes every pair. The random sequence continues where it left off.
    pub fn clear(&mut self) {
        self.live.clear();
        self.passed.clear();
    }

    #[must_use]
    pub fn live(&self) -> &VecDeque<ObstaclePair> {
        &self.live
    }

    #[must_use]
    pub fn passed(&self) -> &VecDeque<ObstaclePair> {
        &self.passed
    }

    /// Nearest upcoming pair.
    #[must_use]
    pub fn nearest(&self) -> Option<&ObstaclePair> {
        self.live.front()
    }

    /// Every pair currently tracked, passed pairs first.
    pub fn pairs(&self) -> impl Iterator<Item = &ObstaclePair> + '_ {
        self.passed.iter().chain(&self.live)
    }

    /// Spawns a pair at the right screen edge with a uniformly random gap center.
    pub fn spawn(&mut self) -> &ObstaclePair {
        let (min_center, max_center) = self.config.gap_center_range();
        let center = self.rng.random_range(min_center..=max_center);
        self.spawn_at(center)
    }

    /// Spawns a pair at the right screen edge with the given gap center.
    pub fn spawn_at(&mut self, gap_center: f32) -> &ObstaclePair {
        let pair = ObstaclePair::new(
            self.config.screen_width,
            self.config.pipe_width,
            gap_center,
            self.config.pipe_gap,
            self.config.screen_height,
        );
        log::trace!(
            "spawned obstacle pair: gap {:.1}..{:.1}",
            pair.gap_top(),
            pair.gap_bottom()
        );
        self.live.push_back(pair);
        &self.live[self.live.len() - 1]
    }

    /// Moves every pair left by one tick of scroll.
    ///
    /// Does nothing while the live queue is empty.
    pub fn advance(&mut self) {
        if self.live.is_empty() {
            return;
        }
        let distance = self.config.scroll_speed;
        for pair in self.passed.iter_mut().chain(self.live.iter_mut()) {
            pair.shift_left(distance);
        }
    }

    /// Spawns a new pair once the most recent one has moved far enough from the right edge.
    ///
    /// A freshly spawned pair sits at the right edge, so calling this again
    /// before the next [`advance`](Self::advance) never spawns a second pair.
    /// Returns `true` if a pair was spawned.
    pub fn maybe_spawn(&mut self) -> bool {
        let should_spawn = match self.live.back().or_else(|| self.passed.back()) {
            Some(last) => self.config.screen_width - last.right() > self.config.pipe_spacing,
            None => true,
        };
        if should_spawn {
            self.spawn();
        }
        should_spawn
    }

    /// Removes passed pairs whose trailing edge is off the left edge.
    ///
    /// Returns the number of pairs removed.
    pub fn reap(&mut self) -> usize {
        let mut reaped = 0;
        while self.passed.front().is_some_and(|pair| pair.right() < 0.0) {
            self.passed.pop_front();
            reaped += 1;
        }
        reaped
    }

    /// Moves the nearest live pair to the passed queue.
    pub fn pass_nearest(&mut self) -> Option<ObstaclePair> {
        let pair = self.live.pop_front()?;
        self.passed.push_back(pair);
        Some(pair)
    }
}
