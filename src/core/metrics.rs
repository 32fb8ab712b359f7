use crate::core::MultiDimensionalResult;
use serde::{Deserialize, Serialize};

pub fn total_insights(results: &[MultiDimensionalResult]) -> usize {
    results.iter().map(|r| r.total_insights()).sum()
}

pub fn total_findings(results: &[MultiDimensionalResult]) -> usize {
    results.iter().map(|r| r.total_findings()).sum()
}

pub fn average_confidence(results: &[MultiDimensionalResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.average_confidence()).sum::<f64>() / results.len() as f64
}

/// Interpretive-yield metrics over a result set (Matthew 13:8).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SowerMetrics {
    /// Insights per passage.
    pub interpretive_yield: f64,
    /// Mean multiplication factor.
    pub average_fold: f64,
    /// Insights x fold factor over the symbolic tenfold baseline.
    pub growth_index: f64,
}

impl SowerMetrics {
    pub fn compute(results: &[MultiDimensionalResult]) -> Self {
        if results.is_empty() {
            return Self {
                interpretive_yield: 0.0,
                average_fold: 0.0,
                growth_index: 0.0,
            };
        }

        let insights = total_insights(results) as f64;
        let average_fold = results
            .iter()
            .map(|r| r.multiplication_factor as f64)
            .sum::<f64>()
            / results.len() as f64;
        let growth_index = (insights * average_fold / 10.0 * 100.0).round() / 100.0;

        Self {
            interpretive_yield: (insights / results.len() as f64 * 100.0).round() / 100.0,
            average_fold: (average_fold * 10.0).round() / 10.0,
            growth_index,
        }
    }

    /// Classify growth according to the Parable of the Sower.
    pub fn classification(&self) -> &'static str {
        match self.growth_index {
            g if g >= 30.0 => "thirtyfold_fruit",
            g if g >= 20.0 => "twentyfold_fruit",
            g if g >= 10.0 => "tenfold_fruit",
            g if g >= 6.0 => "sixfold_fruit",
            _ => "minimal_fruit",
        }
    }
}
