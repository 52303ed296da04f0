use std::fmt;

use flappy_engine::{EpisodeSummary, Genome, Termination};

/// Minimum, maximum and mean of the fitness values of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl FitnessStats {
    /// Returns `None` for an empty generation.
    #[must_use]
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut count = 0_u32;
        let mut sum = 0.0_f64;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for value in values {
            count += 1;
            sum += f64::from(value);
            min = min.min(value);
            max = max.max(value);
        }
        if count == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let mean = (sum / f64::from(count)) as f32;
        Some(Self { min, max, mean })
    }
}

/// Summary of one completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub genome_count: usize,
    pub ticks: u64,
    pub termination: Termination,
    pub best_score: u32,
    pub fitness: Option<FitnessStats>,
}

impl GenerationReport {
    #[must_use]
    pub fn new<G>(generation: usize, summary: &EpisodeSummary, genomes: &[G]) -> Self
    where
        G: Genome,
    {
        Self {
            generation,
            genome_count: genomes.len(),
            ticks: summary.ticks,
            termination: summary.termination,
            best_score: summary.best_score(),
            fitness: FitnessStats::from_values(genomes.iter().map(Genome::fitness)),
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation #{}: {} genomes, {} ticks ({}), best score {}",
            self.generation, self.genome_count, self.ticks, self.termination, self.best_score
        )?;
        if let Some(FitnessStats { min, max, mean }) = self.fitness {
            write!(f, ", fitness min {min:.3} / mean {mean:.3} / max {max:.3}")?;
        }
        Ok(())
    }
}
