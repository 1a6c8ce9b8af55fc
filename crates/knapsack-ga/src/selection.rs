//! Parent selection.

use rand::{Rng, seq::IndexedRandom};

use crate::candidate::EvaluatedCandidate;

/// Selects a parent by tournament.
///
/// Samples `tournament_size` distinct individuals without replacement and
/// returns the fittest. On equal fitness the competitor drawn first wins.
/// Every call is independent, so two consecutive calls may return the same
/// individual.
///
/// # Panics
///
/// Panics if `tournament_size` is zero or larger than the population.
pub fn tournament_select<'a, R>(
    population: &'a [EvaluatedCandidate],
    tournament_size: usize,
    rng: &mut R,
) -> &'a EvaluatedCandidate
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    assert!(tournament_size <= population.len());
    population
        .choose_multiple(rng, tournament_size)
        .reduce(|best, competitor| {
            if competitor.fitness() > best.fitness() {
                competitor
            } else {
                best
            }
        })
        .unwrap()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        candidate::Candidate,
        genome::Genome,
        item::{Item, ItemCatalog},
    };

    fn population() -> (ItemCatalog, Vec<EvaluatedCandidate>) {
        let catalog = ItemCatalog::new(vec![
            Item::new(1.0, 1.0),
            Item::new(1.0, 2.0),
            Item::new(1.0, 4.0),
        ])
        .unwrap();
        let individuals = ["000", "100", "010", "110", "001"]
            .into_iter()
            .map(|s| Candidate::new(s.parse::<Genome>().unwrap()).evaluate(&catalog, 10.0))
            .collect();
        (catalog, individuals)
    }

    #[test]
    fn test_full_tournament_returns_fittest() {
        let (_catalog, individuals) = population();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let winner = tournament_select(&individuals, individuals.len(), &mut rng);
            assert_eq!(winner.fitness(), 4.0);
            assert_eq!(winner.genome().to_string(), "001");
        }
    }

    #[test]
    fn test_winner_is_never_worse_than_sampled_minimum() {
        let (_catalog, individuals) = population();
        let mut rng = Pcg32::seed_from_u64(43);
        for _ in 0..100 {
            let winner = tournament_select(&individuals, 2, &mut rng);
            // with 2 of 5 drawn, the unique worst individual can never win
            assert!(winner.fitness() > 0.0);
        }
    }

    #[test]
    fn test_single_competitor_tournament_is_uniform_pick() {
        let (_catalog, individuals) = population();
        let mut rng = Pcg32::seed_from_u64(44);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let winner = tournament_select(&individuals, 1, &mut rng);
            let index = individuals
                .iter()
                .position(|ind| std::ptr::eq(ind, winner))
                .unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    #[should_panic]
    fn test_oversized_tournament_panics() {
        let (_catalog, individuals) = population();
        let mut rng = Pcg32::seed_from_u64(45);
        let _ = tournament_select(&individuals, 6, &mut rng);
    }
}
