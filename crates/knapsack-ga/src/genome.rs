//! Binary genomes and the bit-level operators that act on them.
//!
//! A [`Genome`] is a fixed-length sequence of bits, one per catalog item. A set
//! bit means the item is packed. Every operator in this module either reads two
//! genomes of equal length or produces brand-new genomes; parents are never
//! modified in place.
//!
//! # Operators
//!
//! - **Distance**: [`Genome::hamming_distance`]
//! - **Crossover**: [`single_point_crossover`], [`multi_point_crossover`] and
//!   their deterministic counterparts taking explicit cut points
//! - **Mutation**: [`Genome::flip`], [`Genome::flip_random_bit`],
//!   [`Genome::flip_each_with_probability`]

use std::{fmt, iter, str::FromStr};

use rand::{Rng, seq::index};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A fixed-length binary genome encoding item inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genome {
    bits: Vec<bool>,
}

impl Genome {
    /// Creates a genome from explicit bits.
    #[must_use]
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Creates a genome of `len` zero bits (the empty knapsack).
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Creates a genome of `len` bits, each drawn uniformly from {0, 1}.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            bits: iter::repeat_with(|| rng.random_bool(0.5))
                .take(len)
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns the indices of set bits in ascending order.
    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &bit)| bit.then_some(i))
    }

    /// Number of positions where `self` and `other` differ.
    ///
    /// # Panics
    ///
    /// Panics if the genomes have different lengths.
    #[must_use]
    pub fn hamming_distance(&self, other: &Genome) -> usize {
        assert_eq!(self.len(), other.len(), "genomes must be of equal length");
        iter::zip(&self.bits, &other.bits)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Flips the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    /// Flips one bit chosen uniformly at random. Does nothing on an empty genome.
    pub fn flip_random_bit<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if self.bits.is_empty() {
            return;
        }
        let index = rng.random_range(0..self.bits.len());
        self.flip(index);
    }

    /// Independently flips every bit with probability `rate`.
    ///
    /// Coins are drawn in index order.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is outside `[0, 1]`.
    pub fn flip_each_with_probability<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for bit in &mut self.bits {
            if rng.random_bool(rate) {
                *bit = !*bit;
            }
        }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid genome character {ch:?} at position {position}")]
pub struct GenomeParseError {
    ch: char,
    position: usize,
}

impl FromStr for Genome {
    type Err = GenomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GenomeParseError { ch, position }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { bits })
    }
}

impl Serialize for Genome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Genome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Single-point crossover with a cut chosen uniformly in `[1, len - 1]`.
///
/// Genomes shorter than 2 bits have no legal cut; copies of the parents are
/// returned instead.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn single_point_crossover<R>(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut R,
) -> (Genome, Genome)
where
    R: Rng + ?Sized,
{
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "genomes must be of equal length"
    );
    if parent1.len() < 2 {
        return (parent1.clone(), parent2.clone());
    }
    let cut = rng.random_range(1..parent1.len());
    single_point_crossover_at(parent1, parent2, cut)
}

/// Single-point crossover at a fixed `cut`.
///
/// `child1` takes `parent1[..cut]` followed by `parent2[cut..]`, `child2` is the
/// complement.
///
/// # Panics
///
/// Panics if the parents have different lengths or `cut > len`.
#[must_use]
pub fn single_point_crossover_at(
    parent1: &Genome,
    parent2: &Genome,
    cut: usize,
) -> (Genome, Genome) {
    multi_point_crossover_at(parent1, parent2, &[cut])
}

/// Multi-point crossover with `num_points` distinct cuts.
///
/// `num_points` is clamped to `len - 1`. Cuts are sampled without replacement
/// from `[1, len - 1]` and sorted before the segments are exchanged.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn multi_point_crossover<R>(
    parent1: &Genome,
    parent2: &Genome,
    num_points: usize,
    rng: &mut R,
) -> (Genome, Genome)
where
    R: Rng + ?Sized,
{
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "genomes must be of equal length"
    );
    let len = parent1.len();
    let num_points = num_points.min(len.saturating_sub(1));
    if num_points == 0 {
        return (parent1.clone(), parent2.clone());
    }
    let mut points = index::sample(rng, len - 1, num_points)
        .into_iter()
        .map(|i| i + 1)
        .collect::<Vec<_>>();
    points.sort_unstable();
    multi_point_crossover_at(parent1, parent2, &points)
}

/// Multi-point crossover at fixed, ascending cut points.
///
/// With `0` and `len` as implicit boundaries, segment `i` is copied from
/// `parent1` into `child1` when `i` is even and from `parent2` when it is odd.
/// `child2` always receives the other parent's segment.
///
/// # Panics
///
/// Panics if the parents have different lengths, or if `points` is not
/// ascending or exceeds `len`.
#[must_use]
pub fn multi_point_crossover_at(
    parent1: &Genome,
    parent2: &Genome,
    points: &[usize],
) -> (Genome, Genome) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "genomes must be of equal length"
    );
    let len = parent1.len();
    assert!(
        points.is_sorted() && points.last().is_none_or(|&p| p <= len),
        "crossover points must be ascending and within the genome"
    );

    let mut child1 = Vec::with_capacity(len);
    let mut child2 = Vec::with_capacity(len);
    let starts = iter::once(0).chain(points.iter().copied());
    let ends = points.iter().copied().chain(iter::once(len));
    for (segment, (start, end)) in iter::zip(starts, ends).enumerate() {
        let (src1, src2) = if segment % 2 == 0 {
            (parent1, parent2)
        } else {
            (parent2, parent1)
        };
        child1.extend_from_slice(&src1.bits[start..end]);
        child2.extend_from_slice(&src2.bits[start..end]);
    }

    (Genome::from_bits(child1), Genome::from_bits(child2))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn genome(s: &str) -> Genome {
        s.parse().unwrap()
    }

    #[test]
    fn test_hamming_distance_bounds_and_symmetry() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let a = Genome::random(&mut rng, 16);
            let b = Genome::random(&mut rng, 16);
            let d = a.hamming_distance(&b);
            assert!(d <= 16);
            assert_eq!(d, b.hamming_distance(&a));
            assert_eq!(d == 0, a == b);
            assert_eq!(a.hamming_distance(&a), 0);
        }
    }

    #[test]
    fn test_hamming_distance_known_value() {
        assert_eq!(genome("101100").hamming_distance(&genome("100111")), 3);
        assert_eq!(genome("1111").hamming_distance(&genome("0000")), 4);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_hamming_distance_length_mismatch_panics() {
        let _ = genome("101").hamming_distance(&genome("1010"));
    }

    #[test]
    fn test_single_point_crossover_at_swaps_suffix() {
        let p1 = genome("000000");
        let p2 = genome("111111");
        let (c1, c2) = single_point_crossover_at(&p1, &p2, 2);
        assert_eq!(c1, genome("001111"));
        assert_eq!(c2, genome("110000"));
    }

    #[test]
    fn test_single_point_crossover_positional_property() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let p1 = Genome::random(&mut rng, 12);
            let p2 = Genome::random(&mut rng, 12);
            let cut = rng.random_range(1..12);
            let (c1, c2) = single_point_crossover_at(&p1, &p2, cut);
            assert_eq!(c1.len(), 12);
            assert_eq!(c2.len(), 12);
            for i in 0..12 {
                let expected = if i < cut {
                    (p1.bits()[i], p2.bits()[i])
                } else {
                    (p2.bits()[i], p1.bits()[i])
                };
                assert_eq!((c1.bits()[i], c2.bits()[i]), expected);
            }
        }
    }

    #[test]
    fn test_random_crossover_preserves_length_and_parents() {
        let mut rng = Pcg32::seed_from_u64(3);
        let p1 = Genome::random(&mut rng, 20);
        let p2 = Genome::random(&mut rng, 20);
        let before = (p1.clone(), p2.clone());
        for n in 1..25 {
            let (c1, c2) = multi_point_crossover(&p1, &p2, n, &mut rng);
            assert_eq!(c1.len(), 20);
            assert_eq!(c2.len(), 20);
            // each position keeps the parents' pair of bits, possibly swapped
            for i in 0..20 {
                let pair = (c1.bits()[i], c2.bits()[i]);
                let a = (p1.bits()[i], p2.bits()[i]);
                assert!(pair == a || pair == (a.1, a.0));
            }
        }
        let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
        assert_eq!((c1.len(), c2.len()), (20, 20));
        assert_eq!((p1, p2), before);
    }

    #[test]
    fn test_multi_point_crossover_alternates_segments() {
        let p1 = genome("00000000");
        let p2 = genome("11111111");
        let (c1, c2) = multi_point_crossover_at(&p1, &p2, &[2, 5]);
        assert_eq!(c1, genome("00111000"));
        assert_eq!(c2, genome("11000111"));
    }

    #[test]
    fn test_multi_point_with_one_point_matches_single_point() {
        let mut rng = Pcg32::seed_from_u64(5);
        let p1 = Genome::random(&mut rng, 10);
        let p2 = Genome::random(&mut rng, 10);
        for cut in 1..10 {
            assert_eq!(
                multi_point_crossover_at(&p1, &p2, &[cut]),
                single_point_crossover_at(&p1, &p2, cut)
            );
        }
    }

    #[test]
    fn test_multi_point_crossover_clamps_to_every_position() {
        // len - 1 cuts means every position after the first alternates source
        let mut rng = Pcg32::seed_from_u64(9);
        let p1 = genome("00000");
        let p2 = genome("11111");
        let (c1, c2) = multi_point_crossover(&p1, &p2, 100, &mut rng);
        assert_eq!(c1, genome("01010"));
        assert_eq!(c2, genome("10101"));
    }

    #[test]
    fn test_crossover_on_single_bit_genome_copies_parents() {
        let mut rng = Pcg32::seed_from_u64(1);
        let p1 = genome("0");
        let p2 = genome("1");
        assert_eq!(
            single_point_crossover(&p1, &p2, &mut rng),
            (p1.clone(), p2.clone())
        );
        assert_eq!(multi_point_crossover(&p1, &p2, 3, &mut rng), (p1, p2));
    }

    #[test]
    fn test_flip_each_with_extreme_rates() {
        let mut rng = Pcg32::seed_from_u64(13);
        let original = Genome::random(&mut rng, 32);

        let mut unchanged = original.clone();
        unchanged.flip_each_with_probability(0.0, &mut rng);
        assert_eq!(unchanged, original);

        let mut inverted = original.clone();
        inverted.flip_each_with_probability(1.0, &mut rng);
        assert_eq!(inverted.hamming_distance(&original), 32);
    }

    #[test]
    fn test_flip_random_bit_changes_exactly_one_position() {
        let mut rng = Pcg32::seed_from_u64(17);
        for _ in 0..20 {
            let original = Genome::random(&mut rng, 12);
            let mut mutated = original.clone();
            mutated.flip_random_bit(&mut rng);
            assert_eq!(mutated.hamming_distance(&original), 1);
        }
    }

    #[test]
    fn test_display_and_parse() {
        let g = genome("0110");
        assert_eq!(g.to_string(), "0110");
        assert_eq!(g.selected_indices().collect::<Vec<_>>(), vec![1, 2]);
        assert!("01x".parse::<Genome>().is_err());
        assert_eq!(serde_json::to_string(&g).unwrap(), "\"0110\"");
        let back: Genome = serde_json::from_str("\"0110\"").unwrap();
        assert_eq!(back, g);
    }
}
