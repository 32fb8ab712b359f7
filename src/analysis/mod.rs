pub mod batch;
pub mod genre;
pub mod interactions;
pub mod ontology;

use crate::analyzers::AlgorithmRegistry;
use crate::core::{Dimension, DimensionalAnalysis, MultiDimensionalResult, Passage};
use chrono::Utc;
use std::collections::BTreeMap;

/// Runs every registered dimension algorithm against one passage and
/// synthesizes a summary. A dimension whose algorithm is missing is skipped.
pub struct MultiDimensionalAnalyzer<'a> {
    registry: &'a AlgorithmRegistry,
}

impl<'a> MultiDimensionalAnalyzer<'a> {
    pub fn new(registry: &'a AlgorithmRegistry) -> Self {
        Self { registry }
    }

    pub fn analyze(&self, passage: &Passage) -> MultiDimensionalResult {
        self.analyze_with(passage, None)
    }

    /// Analyze, optionally restricted to the named algorithms.
    pub fn analyze_with(
        &self,
        passage: &Passage,
        algorithms: Option<&[String]>,
    ) -> MultiDimensionalResult {
        let mut dimensions = BTreeMap::new();

        for dimension in Dimension::ALL {
            let name = dimension.algorithm_name();
            if let Some(filter) = algorithms {
                if !filter.iter().any(|a| a == name) {
                    continue;
                }
            }
            if let Some(result) = self.registry.analyze_passage(passage, name) {
                dimensions.insert(
                    dimension,
                    DimensionalAnalysis {
                        dimension,
                        findings: result.findings,
                        insights: result.insights,
                        confidence: result.confidence,
                        links: result.links,
                    },
                );
            }
        }

        let synthesis = generate_synthesis(passage, &dimensions);
        let multiplication_factor = dimensions.len();

        MultiDimensionalResult {
            passage: passage.clone(),
            dimensions,
            synthesis,
            multiplication_factor,
            timestamp: Utc::now(),
        }
    }
}

fn generate_synthesis(
    passage: &Passage,
    dimensions: &BTreeMap<Dimension, DimensionalAnalysis>,
) -> String {
    let total_insights: usize = dimensions.values().map(|d| d.insights.len()).sum();
    let total_findings: usize = dimensions.values().map(|d| d.findings.len()).sum();
    let avg_confidence = if dimensions.is_empty() {
        0.0
    } else {
        dimensions.values().map(|d| d.confidence).sum::<f64>() / dimensions.len() as f64
    };
    let names: Vec<String> = dimensions.keys().map(|d| d.to_string()).collect();

    format!(
        "Multi-dimensional analysis of {} across {} dimensions revealed {} insights from {} distinct findings. Dimensions analyzed: {}. Average confidence: {:.2}.",
        passage.reference,
        dimensions.len(),
        total_insights,
        total_findings,
        names.join(", "),
        avg_confidence
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_dimensions_analyzed_with_builtins() {
        let registry = AlgorithmRegistry::with_builtins();
        let analyzer = MultiDimensionalAnalyzer::new(&registry);
        let passage = Passage::new(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        );
        let result = analyzer.analyze(&passage);
        assert_eq!(result.dimensions.len(), 10);
        assert_eq!(result.multiplication_factor, 10);
        assert!(result.synthesis.contains("John 1:1"));
        assert!(result.average_confidence() > 0.0);
    }

    #[test]
    fn missing_algorithm_skips_dimension() {
        let mut registry = AlgorithmRegistry::with_builtins();
        registry.unregister("lexical_analysis");
        let analyzer = MultiDimensionalAnalyzer::new(&registry);
        let passage = Passage::new("John 1:1", "In the beginning was the Word.");
        let result = analyzer.analyze(&passage);
        assert_eq!(result.dimensions.len(), 9);
        assert!(!result.dimensions.contains_key(&Dimension::Lexical));
    }

    #[test]
    fn algorithm_filter_restricts_dimensions() {
        let registry = AlgorithmRegistry::with_builtins();
        let analyzer = MultiDimensionalAnalyzer::new(&registry);
        let passage = Passage::new("John 1:1", "In the beginning was the Word.");
        let result = analyzer.analyze_with(
            &passage,
            Some(&["lexical_analysis".to_string(), "thematic_extraction".to_string()]),
        );
        assert_eq!(result.dimensions.len(), 2);
    }
}
