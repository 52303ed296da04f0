use chrono::{DateTime, Utc};
use flappy_engine::{Controller, Genome, GenomeId, SensorInputs};
use flappy_training::NeuralController;
use serde::{Deserialize, Serialize};

/// Trained controller saved at the end of training.
///
/// Floats are written with enough digits to read back the exact same bits, so
/// a loaded controller makes exactly the same decisions as the saved one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Completed generations when the model was saved.
    pub generation: usize,
    pub final_fitness: f32,
    pub controller: NeuralController,
}

impl AiModel {
    /// Genome wrapping the controller, for binding it to an agent.
    pub fn to_genome(&self) -> ModelGenome {
        ModelGenome {
            controller: self.controller.clone(),
            fitness: 0.0,
        }
    }
}

/// Trained controller with a scratch fitness accumulator.
#[derive(Debug, Clone)]
pub struct ModelGenome {
    controller: NeuralController,
    fitness: f32,
}

impl Controller for ModelGenome {
    fn evaluate(&self, inputs: &SensorInputs) -> f32 {
        self.controller.evaluate(inputs)
    }
}

impl Genome for ModelGenome {
    fn id(&self) -> GenomeId {
        GenomeId::default()
    }

    fn fitness(&self) -> f32 {
        self.fitness
    }

    fn fitness_mut(&mut self) -> &mut f32 {
        &mut self.fitness
    }
}
