//! Crossover and mutation operators as closed sets of variants.

use rand::Rng;

use crate::{
    candidate::Candidate,
    genome::{self, Genome},
};

/// Recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    SinglePoint,
    MultiPoint { points: usize },
}

impl Crossover {
    /// Produces two children from two parent genomes.
    ///
    /// The parents are left untouched; both children own fresh genomes with
    /// unset fitness.
    pub fn apply<R>(self, parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Candidate, Candidate)
    where
        R: Rng + ?Sized,
    {
        let (child1, child2) = match self {
            Crossover::SinglePoint => genome::single_point_crossover(parent1, parent2, rng),
            Crossover::MultiPoint { points } => {
                genome::multi_point_crossover(parent1, parent2, points, rng)
            }
        };
        (Candidate::new(child1), Candidate::new(child2))
    }
}

/// Bit-flip mutation operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    SinglePoint,
    MultiPoint { rate: f64 },
}

impl Mutation {
    pub fn apply<R>(self, candidate: &mut Candidate, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match self {
            Mutation::SinglePoint => candidate.single_point_mutation(rng),
            Mutation::MultiPoint { rate } => candidate.multi_point_mutation(rate, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_crossover_children_start_unevaluated() {
        let mut rng = Pcg32::seed_from_u64(21);
        let p1: Genome = "000000".parse().unwrap();
        let p2: Genome = "111111".parse().unwrap();
        for crossover in [Crossover::SinglePoint, Crossover::MultiPoint { points: 3 }] {
            let (c1, c2) = crossover.apply(&p1, &p2, &mut rng);
            assert!(c1.fitness().is_unset());
            assert!(c2.fitness().is_unset());
            // children are bitwise complements when parents are
            assert_eq!(c1.genome().hamming_distance(c2.genome()), 6);
        }
    }

    #[test]
    fn test_mutation_dispatch() {
        let mut rng = Pcg32::seed_from_u64(22);
        let original: Genome = "0000".parse().unwrap();

        let mut single = Candidate::new(original.clone());
        Mutation::SinglePoint.apply(&mut single, &mut rng);
        assert_eq!(single.genome().hamming_distance(&original), 1);

        let mut multi = Candidate::new(original.clone());
        Mutation::MultiPoint { rate: 1.0 }.apply(&mut multi, &mut rng);
        assert_eq!(multi.genome().hamming_distance(&original), 4);
    }
}
