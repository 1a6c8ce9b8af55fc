use std::fmt;

use chrono::{DateTime, Utc};
use knapsack_ga::{
    evolution::{EvolutionOutcome, History},
    genome::Genome,
    item::ItemCatalog,
    params::GeneticAlgorithmParams,
};
use serde::Serialize;

const RULE_WIDTH: usize = 50;

/// JSON document describing a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub solved_at: DateTime<Utc>,
    pub seed: u64,
    pub params: GeneticAlgorithmParams,
    pub best: Solution,
    pub history: History,
}

/// The best packing found, with its totals resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub genome: Genome,
    pub fitness: f64,
    pub total_weight: f64,
    pub total_importance: f64,
    pub capacity: f64,
    /// 1-based numbers of the packed items
    pub included_items: Vec<usize>,
}

impl Solution {
    pub fn new(genome: &Genome, fitness: f64, catalog: &ItemCatalog, capacity: f64) -> Self {
        let totals = catalog.totals(genome);
        Self {
            genome: genome.clone(),
            fitness,
            total_weight: totals.weight,
            total_importance: totals.importance,
            capacity,
            included_items: genome.selected_indices().map(|i| i + 1).collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.total_weight <= self.capacity
    }
}

impl RunReport {
    pub fn new(
        seed: u64,
        params: GeneticAlgorithmParams,
        catalog: &ItemCatalog,
        outcome: EvolutionOutcome,
    ) -> Self {
        let EvolutionOutcome { best, history } = outcome;
        Self {
            solved_at: Utc::now(),
            seed,
            best: Solution::new(best.genome(), best.fitness(), catalog, params.max_weight),
            params,
            history,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{:^RULE_WIDTH$}", " KNAPSACK SOLUTION ")?;
        writeln!(f, "{rule}")?;

        let status = if self.is_valid() {
            "VALID"
        } else {
            "INVALID (Exceeds weight limit)"
        };
        writeln!(f, "{:<20} {status}", "Solution Status:")?;
        write!(
            f,
            "{:<20} {} / {}",
            "Total Weight:", self.total_weight, self.capacity
        )?;
        if self.capacity > 0.0 {
            write!(f, " ({:.1}%)", self.total_weight / self.capacity * 100.0)?;
        }
        writeln!(f)?;
        writeln!(f, "{:<20} {}", "Total Importance:", self.total_importance)?;
        writeln!(f, "{:<20} {}", "Genome:", self.genome)?;
        let included = self
            .included_items
            .iter()
            .map(|n| format!("#{n}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "{:<20} {included}", "Included Boxes:")?;
        writeln!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use knapsack_ga::item::Item;

    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog::new(vec![
            Item::new(10.0, 5.0),
            Item::new(20.0, 8.0),
            Item::new(30.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_solution_summary_lists_packed_items() {
        let genome: Genome = "101".parse().unwrap();
        let solution = Solution::new(&genome, 15.0, &catalog(), 50.0);
        assert!(solution.is_valid());
        assert_eq!(solution.included_items, vec![1, 3]);

        let text = solution.to_string();
        assert!(text.contains("VALID"));
        assert!(text.contains("40 / 50 (80.0%)"));
        assert!(text.contains("Included Boxes:      #1, #3"));
        assert!(text.contains("Genome:              101"));
    }

    #[test]
    fn test_overweight_solution_is_reported_invalid() {
        let genome: Genome = "111".parse().unwrap();
        let solution = Solution::new(&genome, -10.0, &catalog(), 50.0);
        assert!(!solution.is_valid());
        let text = solution.to_string();
        assert!(text.contains("INVALID (Exceeds weight limit)"));
    }

    #[test]
    fn test_zero_capacity_omits_percentage() {
        let genome: Genome = "000".parse().unwrap();
        let solution = Solution::new(&genome, 0.0, &catalog(), 0.0);
        let text = solution.to_string();
        assert!(text.contains("0 / 0\n"));
        assert!(!text.contains('%'));
    }
}
