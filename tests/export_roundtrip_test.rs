use versemap::io::{AnalysisReport, JsonWriter, OutputWriter};
use versemap::{AlgorithmRegistry, BatchAnalyzer, Passage, Testament};

/// Exporting results to JSON and re-parsing preserves references, dimension
/// counts, and confidence values.
#[test]
fn json_export_roundtrips() {
    let registry = AlgorithmRegistry::with_builtins();
    let mut analyzer = BatchAnalyzer::new(&registry);
    let corpus = vec![
        Passage::new(
            "Genesis 1:1",
            "In the beginning God created the heaven and the earth.",
        )
        .with_testament(Testament::Old)
        .with_location("Genesis", 1, 1),
        Passage::new(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        )
        .with_location("John", 1, 1),
    ];

    let batch = analyzer.analyze_batch(&corpus, None, false);
    let report = AnalysisReport::new(batch.results);

    let mut buffer = Vec::new();
    JsonWriter::new(&mut buffer)
        .write_report(&report)
        .expect("export succeeds");

    let parsed: AnalysisReport = serde_json::from_slice(&buffer).expect("export parses back");

    assert_eq!(parsed.results.len(), report.results.len());
    for (original, restored) in report.results.iter().zip(parsed.results.iter()) {
        assert_eq!(original.passage.reference, restored.passage.reference);
        assert_eq!(original.passage.text(), restored.passage.text());
        assert_eq!(original.dimensions.len(), restored.dimensions.len());
        assert_eq!(original.multiplication_factor, restored.multiplication_factor);
        assert_eq!(original.synthesis, restored.synthesis);

        for (dimension, analysis) in &original.dimensions {
            let restored_analysis = restored
                .dimensions
                .get(dimension)
                .unwrap_or_else(|| panic!("missing dimension {dimension}"));
            assert!(
                (analysis.confidence - restored_analysis.confidence).abs() < 1e-6,
                "confidence drifted for {dimension}"
            );
            assert_eq!(analysis.findings, restored_analysis.findings);
        }
    }
}

/// Derived passage views still work after a deserialization (the caches
/// rebuild lazily).
#[test]
fn deserialized_passages_recompute_views() {
    let passage = Passage::new("John 1:1", "In the beginning was the Word.");
    let json = serde_json::to_string(&passage).expect("serialize");
    let restored: Passage = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.word_count(), passage.word_count());
    assert_eq!(restored.word_freq(), passage.word_freq());
    assert_eq!(restored.lexical_diversity(), passage.lexical_diversity());
}
