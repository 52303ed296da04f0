use crate::GameConfig;

use super::geometry::Rect;

/// Where an agent's impulse commands come from.
///
/// Chosen once when the agent is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputSource {
    /// Keyboard-driven agent. Every tick with a request fires one impulse.
    Human,
    /// Agent driven by the genome at `genome` in the episode's genome slice.
    Controller { genome: usize },
}

impl InputSource {
    #[must_use]
    pub const fn human() -> Self {
        Self::Human
    }

    #[must_use]
    pub const fn controller(genome: usize) -> Self {
        Self::Controller { genome }
    }

    #[must_use]
    pub fn genome_index(&self) -> Option<usize> {
        match self {
            Self::Human => None,
            Self::Controller { genome } => Some(*genome),
        }
    }
}

/// What ended an agent's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum CollisionKind {
    #[display("obstacle")]
    Obstacle,
    #[display("ceiling")]
    Ceiling,
    #[display("ground")]
    Ground,
}

/// One simulated actor.
///
/// The agent's position is the center of its bounding box. `x` is fixed at the
/// spawn column, `y` is integrated once per tick by [`Agent::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    velocity: f32,
    ticks_since_impulse: u64,
    death: Option<CollisionKind>,
    score: u32,
    input: InputSource,
}

impl Agent {
    /// Creates a live agent at the spawn point (screen middle).
    #[must_use]
    pub fn new(config: &GameConfig, input: InputSource) -> Self {
        Self {
            x: config.spawn_x,
            y: config.screen_height / 2.0,
            width: config.agent_width,
            height: config.agent_height,
            velocity: 0.0,
            ticks_since_impulse: 0,
            death: None,
            score: 0,
            input,
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[must_use]
    pub fn ticks_since_impulse(&self) -> u64 {
        self.ticks_since_impulse
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    /// What the agent collided with, once it is dead.
    #[must_use]
    pub fn death_cause(&self) -> Option<CollisionKind> {
        self.death
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn input(&self) -> &InputSource {
        &self.input
    }

    /// Visual bounding box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.width, self.height)
    }

    /// Advances the vertical motion by one tick.
    ///
    /// The velocity is recomputed from the time elapsed since the last impulse
    /// (`-impulse + gravity * elapsed`). On an impulse tick the agent jumps up by
    /// exactly `impulse` and the elapsed time restarts from zero; on every other
    /// tick it moves by the current velocity. The result is clamped so the
    /// bounding box stays on screen.
    pub fn step(&mut self, impulse: bool, config: &GameConfig) {
        let elapsed = config.ticks_to_secs(self.ticks_since_impulse);
        self.velocity = -config.impulse + config.gravity * elapsed;

        if impulse {
            self.y -= config.impulse;
            self.ticks_since_impulse = 0;
        } else {
            self.y += self.velocity;
            self.ticks_since_impulse += 1;
        }

        let half_height = self.height / 2.0;
        self.y = self
            .y
            .clamp(half_height, config.screen_height - half_height);
    }

    pub(crate) fn add_score(&mut self) {
        self.score += 1;
    }

    /// Marks the agent dead. The first cause is kept.
    pub(crate) fn kill(&mut self, cause: CollisionKind) {
        self.death.get_or_insert(cause);
    }
}
