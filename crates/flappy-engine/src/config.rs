//! Simulation parameters.
//!
//! Every tunable constant of the simulation lives in [`GameConfig`]. The struct
//! deserializes from JSON with per-field defaults, so a config file only needs to
//! list the values it overrides:
//!
//! ```
//! use flappy_engine::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "gravity": 25.0 }"#).unwrap();
//! config.validate().unwrap();
//! assert_eq!(config.gravity, 25.0);
//! assert_eq!(config.tick_rate, GameConfig::default().tick_rate);
//! ```
//!
//! # Units
//!
//! Positions are screen pixels with the origin at the top-left corner and `y`
//! growing downward. Velocities are pixels per tick. `gravity` is the velocity
//! gained per second elapsed since the last impulse, so the vertical velocity of
//! an agent is `-impulse + gravity * elapsed_secs`.

use serde::{Deserialize, Serialize};

/// Errors reported by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("`{name}` must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[display("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[display("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[display("`collision_ratio` must be in (0, 1], got {_0}")]
    CollisionRatioOutOfRange(#[error(not(source))] f32),
    #[display(
        "pipe gap does not fit: gap-center range [{min_center}, {max_center}] is empty \
         (screen_height={screen_height}, land_thickness={land_thickness}, \
         min_pipe_clearance={min_pipe_clearance}, pipe_gap={pipe_gap})"
    )]
    GapDoesNotFit {
        min_center: f32,
        max_center: f32,
        screen_height: f32,
        land_thickness: f32,
        min_pipe_clearance: f32,
        pipe_gap: f32,
    },
    #[display("agent spawn point ({spawn_x}) lies outside the screen (width {screen_width})")]
    SpawnOutsideScreen { spawn_x: f32, screen_width: f32 },
    #[display(
        "`pipe_spacing` ({pipe_spacing}) must be below {max_spacing}, otherwise the lead agent \
         clears the last pair before the next one spawns"
    )]
    SpacingTooWide { pipe_spacing: f32, max_spacing: f32 },
}

/// Reward and penalty amounts credited to fitness accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward for one second of survival, spread evenly over the ticks of that second.
    pub survival_per_second: f32,
    /// Reward for every obstacle-pair cleared.
    pub clear: f32,
    /// Reward applied once when the agent collides (negative).
    pub collision: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            survival_per_second: 3.0,
            clear: 5.0,
            collision: -1.0,
        }
    }
}

/// Complete parameter set of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ticks per second.
    pub tick_rate: u32,
    /// Downward velocity gain per second since the last impulse.
    pub gravity: f32,
    /// Magnitude of the upward impulse (pixels per tick).
    pub impulse: f32,
    /// Horizontal obstacle speed (pixels per tick).
    pub scroll_speed: f32,
    /// Vertical gap between the top and bottom obstacle of a pair.
    pub pipe_gap: f32,
    /// Minimum distance between a gap edge and the land bands.
    pub min_pipe_clearance: f32,
    /// Distance between the right screen edge and the last spawned pair that triggers a spawn.
    pub pipe_spacing: f32,
    pub pipe_width: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Thickness of the ground band and of the ceiling band.
    pub land_thickness: f32,
    pub agent_width: f32,
    pub agent_height: f32,
    /// Horizontal center of every agent.
    pub spawn_x: f32,
    /// Scale factor applied to both hitboxes before the overlap test.
    pub collision_ratio: f32,
    /// Episode stops once every live agent's score exceeds this value.
    pub score_cutoff: u32,
    /// Divisor of the agent height sensor.
    pub norm_y: f32,
    /// Divisor of the distance sensors.
    pub norm_x: f32,
    pub rewards: RewardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        let screen_width = 800.0;
        Self {
            tick_rate: 30,
            gravity: 30.0,
            impulse: 10.0,
            scroll_speed: 4.0,
            pipe_gap: 150.0,
            min_pipe_clearance: 50.0,
            pipe_spacing: screen_width / 3.0,
            pipe_width: 52.0,
            screen_width,
            screen_height: 600.0,
            land_thickness: 80.0,
            agent_width: 34.0,
            agent_height: 24.0,
            spawn_x: screen_width / 3.0,
            collision_ratio: 0.95,
            score_cutoff: 1000,
            norm_y: 200.0,
            norm_x: 100.0,
            rewards: RewardConfig::default(),
        }
    }
}

impl GameConfig {
    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("rewards.survival_per_second", self.rewards.survival_per_second),
            ("rewards.clear", self.rewards.clear),
            ("rewards.collision", self.rewards.collision),
            ("min_pipe_clearance", self.min_pipe_clearance),
            ("land_thickness", self.land_thickness),
            ("spawn_x", self.spawn_x),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        let non_negative = [
            ("min_pipe_clearance", self.min_pipe_clearance),
            ("land_thickness", self.land_thickness),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        #[expect(clippy::cast_precision_loss)]
        let positive = [
            ("tick_rate", self.tick_rate as f32),
            ("impulse", self.impulse),
            ("scroll_speed", self.scroll_speed),
            ("pipe_gap", self.pipe_gap),
            ("pipe_spacing", self.pipe_spacing),
            ("pipe_width", self.pipe_width),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("agent_width", self.agent_width),
            ("agent_height", self.agent_height),
            ("norm_y", self.norm_y),
            ("norm_x", self.norm_x),
        ];
        for (name, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if !(self.collision_ratio > 0.0 && self.collision_ratio <= 1.0) {
            return Err(ConfigError::CollisionRatioOutOfRange(self.collision_ratio));
        }

        let (min_center, max_center) = self.gap_center_range();
        if min_center > max_center {
            return Err(ConfigError::GapDoesNotFit {
                min_center,
                max_center,
                screen_height: self.screen_height,
                land_thickness: self.land_thickness,
                min_pipe_clearance: self.min_pipe_clearance,
                pipe_gap: self.pipe_gap,
            });
        }

        if !(0.0..=self.screen_width).contains(&self.spawn_x) {
            return Err(ConfigError::SpawnOutsideScreen {
                spawn_x: self.spawn_x,
                screen_width: self.screen_width,
            });
        }

        let max_spacing = self.max_pipe_spacing();
        if self.pipe_spacing >= max_spacing {
            return Err(ConfigError::SpacingTooWide {
                pipe_spacing: self.pipe_spacing,
                max_spacing,
            });
        }

        Ok(())
    }

    /// Left edge of every agent's bounding box.
    #[must_use]
    pub fn agent_left(&self) -> f32 {
        self.spawn_x - self.agent_width / 2.0
    }

    /// Exclusive upper bound of `pipe_spacing`.
    ///
    /// A pair is cleared once its right edge is left of [`agent_left`](Self::agent_left),
    /// and the next pair spawns once that edge is left of `screen_width - pipe_spacing`.
    /// Below this bound the spawn always happens first, so the live queue never drains.
    #[must_use]
    pub fn max_pipe_spacing(&self) -> f32 {
        self.screen_width - self.agent_left()
    }

    /// Inclusive range of gap-center heights a new obstacle-pair may use.
    #[must_use]
    pub fn gap_center_range(&self) -> (f32, f32) {
        let half_gap = self.pipe_gap / 2.0;
        let min = self.land_thickness + self.min_pipe_clearance + half_gap;
        let max = self.screen_height - self.land_thickness - self.min_pipe_clearance - half_gap;
        (min, max)
    }

    /// Survival reward credited per tick.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn survival_increment(&self) -> f32 {
        self.rewards.survival_per_second / self.tick_rate as f32
    }

    /// Seconds represented by `ticks` ticks.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn ticks_to_secs(&self, ticks: u64) -> f32 {
        ticks as f32 / self.tick_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "tick_rate": 60, "rewards": { "clear": 10.0 } }"#).unwrap();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.rewards.clear, 10.0);
        assert_eq!(
            config.rewards.collision,
            RewardConfig::default().collision
        );
        assert_eq!(config.screen_height, 600.0);
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let config = GameConfig {
            tick_rate: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "tick_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_non_finite_gravity() {
        let config = GameConfig {
            gravity: f32::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                name: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_gap_that_does_not_fit() {
        let config = GameConfig {
            pipe_gap: 400.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_collision_ratio_out_of_range() {
        for ratio in [0.0, -0.5, 1.5] {
            let config = GameConfig {
                collision_ratio: ratio,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::CollisionRatioOutOfRange(ratio))
            );
        }
    }

    #[test]
    fn test_rejects_negative_land_and_clearance() {
        let config = GameConfig {
            min_pipe_clearance: -70.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "min_pipe_clearance",
                value: -70.0
            })
        );

        let config = GameConfig {
            land_thickness: -10.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "land_thickness",
                value: -10.0
            })
        );
    }

    #[test]
    fn test_zero_land_and_clearance_are_valid() {
        let config = GameConfig {
            min_pipe_clearance: 0.0,
            land_thickness: 0.0,
            ..GameConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_spacing_that_drains_live_queue() {
        let config = GameConfig {
            pipe_spacing: 700.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpacingTooWide { .. })
        ));

        let max_spacing = GameConfig::default().max_pipe_spacing();
        let at_bound = GameConfig {
            pipe_spacing: max_spacing,
            ..GameConfig::default()
        };
        assert!(at_bound.validate().is_err());

        let widest = GameConfig {
            pipe_spacing: max_spacing - 1.0,
            ..GameConfig::default()
        };
        widest.validate().unwrap();
    }

    #[test]
    fn test_gap_center_range() {
        let config = GameConfig {
            screen_height: 600.0,
            land_thickness: 80.0,
            min_pipe_clearance: 50.0,
            pipe_gap: 100.0,
            ..GameConfig::default()
        };
        assert_eq!(config.gap_center_range(), (180.0, 420.0));
    }

    #[test]
    fn test_survival_increment_scales_with_tick_rate() {
        let slow = GameConfig {
            tick_rate: 30,
            ..GameConfig::default()
        };
        let fast = GameConfig {
            tick_rate: 60,
            ..GameConfig::default()
        };
        let one_second_slow = slow.survival_increment() * 30.0;
        let one_second_fast = fast.survival_increment() * 60.0;
        assert!((one_second_slow - one_second_fast).abs() < 1e-5);
    }
}
