use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GameConfig, core::obstacle::ObstaclePair};

/// Controller output above which an impulse is issued.
pub const IMPULSE_THRESHOLD: f32 = 0.5;

/// Number of controller inputs.
pub const SENSOR_COUNT: usize = 4;

/// Normalized observation handed to a [`Controller`] once per tick.
///
/// The order is fixed, trained controllers depend on it:
///
/// 0. agent height: `y / norm_y`
/// 1. horizontal distance to the nearest pair: `|x - pair.center_x| / norm_x`
/// 2. distance to the top obstacle's bottom edge: `|y - pair.gap_top| / norm_x`
/// 3. distance to the bottom obstacle's top edge: `|y - pair.gap_bottom| / norm_x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorInputs(pub [f32; SENSOR_COUNT]);

impl SensorInputs {
    /// Observes a pair from an agent centered at `(x, y)`.
    #[must_use]
    pub fn observe(x: f32, y: f32, pair: &ObstaclePair, config: &GameConfig) -> Self {
        Self([
            y / config.norm_y,
            (x - pair.center_x()).abs() / config.norm_x,
            (y - pair.gap_top()).abs() / config.norm_x,
            (y - pair.gap_bottom()).abs() / config.norm_x,
        ])
    }

    #[must_use]
    pub fn as_array(&self) -> &[f32; SENSOR_COUNT] {
        &self.0
    }
}

/// Decision function mapping sensor inputs to an action scalar in roughly `[0, 1]`.
pub trait Controller {
    fn evaluate(&self, inputs: &SensorInputs) -> f32;

    /// Returns `true` if the output selects an impulse.
    fn wants_impulse(&self, inputs: &SensorInputs) -> bool {
        self.evaluate(inputs) > IMPULSE_THRESHOLD
    }
}

impl<C> Controller for &C
where
    C: Controller + ?Sized,
{
    fn evaluate(&self, inputs: &SensorInputs) -> f32 {
        (**self).evaluate(inputs)
    }
}

impl<C> Controller for Box<C>
where
    C: Controller + ?Sized,
{
    fn evaluate(&self, inputs: &SensorInputs) -> f32 {
        (**self).evaluate(inputs)
    }
}

/// Identity of a genome inside an optimizer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GenomeId(pub u64);

impl fmt::Display for GenomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A controller owned by an external optimizer, together with its fitness accumulator.
pub trait Genome: Controller {
    fn id(&self) -> GenomeId;

    fn fitness(&self) -> f32;

    fn fitness_mut(&mut self) -> &mut f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f32);

    impl Controller for Constant {
        fn evaluate(&self, _inputs: &SensorInputs) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let inputs = SensorInputs([0.0; SENSOR_COUNT]);
        assert!(!Constant(0.5).wants_impulse(&inputs));
        assert!(Constant(0.500_001).wants_impulse(&inputs));
        assert!(!Constant(0.1).wants_impulse(&inputs));
    }

    #[test]
    fn test_observe_order_and_normalization() {
        let config = GameConfig::default();
        // center_x = 426, gap 225..375
        let pair = ObstaclePair::new(400.0, 52.0, 300.0, 150.0, config.screen_height);
        let inputs = SensorInputs::observe(266.0, 200.0, &pair, &config);
        assert_eq!(inputs.0, [1.0, 1.6, 0.25, 1.75]);
    }

    #[test]
    fn test_blanket_impls() {
        fn evaluate_owned<C: Controller>(controller: C) -> f32 {
            controller.evaluate(&SensorInputs([0.0; SENSOR_COUNT]))
        }

        let boxed: Box<dyn Controller> = Box::new(Constant(0.7));
        assert_eq!(evaluate_owned(boxed), 0.7);
        assert_eq!(evaluate_owned(&Constant(0.2)), 0.2);
    }
}
