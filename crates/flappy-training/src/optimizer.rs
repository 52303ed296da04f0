use flappy_engine::Genome;

/// Evolutionary optimizer driven once per generation.
///
/// The optimizer owns the genomes of the current generation. The driver borrows
/// them mutably while an episode runs, so the engine can credit fitness to each
/// genome's accumulator, and then calls [`reproduce`](Self::reproduce).
pub trait Optimizer {
    type Genome: Genome;

    /// Genomes of the current generation.
    fn genomes(&self) -> &[Self::Genome];

    fn genomes_mut(&mut self) -> &mut [Self::Genome];

    /// Replaces the current generation with the next one.
    ///
    /// Called once per completed episode with every fitness accumulator final.
    fn reproduce(&mut self);

    /// Returns `true` once the optimizer found a good enough genome.
    fn is_satisfied(&self) -> bool {
        false
    }
}
