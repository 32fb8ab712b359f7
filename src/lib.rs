// Export modules for library usage
pub mod analysis;
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod io;
pub mod lexicon;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{
    AlgorithmicResult, AnalysisOutput, BatchAnalysisResult, BatchStatistics, Dimension,
    DimensionalAnalysis, Findings, LinkedPassage, MultiDimensionalResult, Passage, Testament,
};

pub use crate::analyzers::{AlgorithmFn, AlgorithmPlugin, AlgorithmRegistry};

pub use crate::analysis::{
    batch::{BatchAnalyzer, BatchPatterns},
    genre::{GenreClassification, GenreDetector},
    interactions::{DimensionInteractionAnalyzer, InteractionReport},
    ontology::{ConceptMapping, OntologyConcept, TheologicalOntology},
    MultiDimensionalAnalyzer,
};

pub use crate::core::metrics::SowerMetrics;

pub use crate::corpus::{BibleLoader, CorpusError, CorpusStatistics};

pub use crate::io::{create_writer, AnalysisReport, OutputFormat, OutputWriter};

pub use crate::validation::{
    Condition, Severity, ValidationEngine, ValidationReport, ValidationRule,
};
