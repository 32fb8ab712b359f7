use pretty_assertions::assert_eq;
use versemap::analyzers::{
    christological_analysis, eschatological_analysis, lexical_analysis, structural_analysis,
    temporal_analysis, thematic_extraction,
};
use versemap::Passage;

fn john_1_1() -> Passage {
    Passage::new(
        "John 1:1",
        "In the beginning was the Word, and the Word was with God, and the Word was God.",
    )
}

#[test]
fn lexical_analysis_handles_zero_words() {
    let output = lexical_analysis(&Passage::new("Empty 0:0", ""));
    assert_eq!(output.findings.usize_or("word_count", 42), 0);
    assert_eq!(output.findings.f64_or("lexical_diversity", 1.0), 0.0);
    assert_eq!(output.findings.f64_or("average_word_length", 1.0), 0.0);
    assert_eq!(output.findings.usize_or("hapax_legomena_count", 42), 0);
}

#[test]
fn lexical_analysis_handles_whitespace_only() {
    let output = lexical_analysis(&Passage::new("Empty 0:0", "   \t  \n "));
    assert_eq!(output.findings.usize_or("word_count", 42), 0);
    assert_eq!(output.findings.f64_or("lexical_diversity", 1.0), 0.0);
}

#[test]
fn christological_analysis_detects_word_as_contextual_title() {
    let output = christological_analysis(&john_1_1());

    let contextual = output
        .findings
        .array_of("contextual_christ_titles")
        .expect("contextual titles present");
    assert!(
        contextual.iter().any(|c| c["title"].as_str() == Some("word")),
        "'word' should be detected as a contextual title"
    );

    let intensity = output
        .findings
        .str_of("focus_intensity")
        .expect("intensity present");
    assert!(
        intensity == "medium" || intensity == "high",
        "focus intensity should be at least medium, got {intensity}"
    );
}

#[test]
fn every_analyzer_survives_empty_input() {
    use versemap::AlgorithmRegistry;

    let registry = AlgorithmRegistry::with_builtins();
    let empty = Passage::new("Empty 0:0", "");
    for name in registry.algorithm_names() {
        let result = registry
            .analyze_passage(&empty, &name)
            .unwrap_or_else(|| panic!("{name} returned no result"));
        assert!(
            result.confidence.is_finite(),
            "{name} produced a non-finite confidence"
        );
        assert!((0.0..=1.0).contains(&result.confidence));
    }
}

#[test]
fn thematic_extraction_finds_creation_in_genesis() {
    let output = thematic_extraction(&Passage::new(
        "Genesis 1:1",
        "In the beginning God created the heaven and the earth.",
    ));
    let themes = output
        .findings
        .get("detected_themes")
        .and_then(|v| v.as_object())
        .expect("themes object");
    assert!(themes.contains_key("creation"));

    let dominant = output.findings.array_of("dominant_themes").expect("dominant");
    assert!(dominant.iter().any(|t| t.as_str() == Some("creation")));
}

#[test]
fn temporal_analysis_reports_tense_distribution() {
    let output = temporal_analysis(&john_1_1());
    // "was" appears three times in the prologue
    assert_eq!(output.findings.f64_or("tense_distribution.past", 0.0), 3.0);
    assert_eq!(output.findings.str_of("dominant_tense"), Some("past"));
}

#[test]
fn structural_analysis_counts_one_sentence() {
    let output = structural_analysis(&john_1_1());
    assert_eq!(output.findings.usize_or("sentence_count", 0), 1);
    assert_eq!(output.findings.usize_or("question_count", 9), 0);
}

#[test]
fn eschatological_intensity_is_low_for_the_prologue() {
    let output = eschatological_analysis(&john_1_1());
    assert_eq!(
        output.findings.str_of("eschatological_intensity"),
        Some("low")
    );
}
