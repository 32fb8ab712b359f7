use crate::analyzers::contains_term;
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;
use std::collections::BTreeMap;

/// Sensory vocabulary by sense, for imagery detection.
static SENSORY_WORDS: &[(&str, &[&str])] = &[
    ("visual", &["see", "light", "dark", "bright", "color", "appear"]),
    ("auditory", &["hear", "sound", "voice", "cry", "speak", "call"]),
    ("tactile", &["touch", "feel", "warm", "cold", "soft", "hard"]),
    ("olfactory", &["smell", "fragrant", "odor", "sweet"]),
    ("gustatory", &["taste", "sweet", "bitter", "eat", "drink"]),
];

static METAPHOR_INDICATORS: &[&str] = &["like", "as", "is", "are", "becomes"];

/// Poetic and rhetorical devices: repetition, imagery, metaphor markers.
pub fn literary_analysis(passage: &Passage) -> AnalysisOutput {
    let words = passage.normalized_words();

    let mut bigrams: BTreeMap<String, usize> = BTreeMap::new();
    for pair in words.windows(2) {
        *bigrams.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    let repetition_patterns: BTreeMap<String, usize> =
        bigrams.into_iter().filter(|(_, count)| *count > 1).collect();

    let mut imagery: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (sense, sense_words) in SENSORY_WORDS {
        let matches: Vec<&str> = sense_words
            .iter()
            .filter(|w| contains_term(passage, w))
            .copied()
            .collect();
        if !matches.is_empty() {
            imagery.insert(*sense, matches);
        }
    }

    let metaphor_count = METAPHOR_INDICATORS
        .iter()
        .filter(|w| contains_term(passage, w))
        .count();

    let richness = repetition_patterns.len() + imagery.len() + metaphor_count;
    let senses: Vec<&str> = imagery.keys().copied().collect();

    let mut findings = Findings::new();
    findings.insert("repetition_patterns", json!(&repetition_patterns));
    findings.insert("imagery_detected", json!(&imagery));
    findings.insert("metaphor_indicators", json!(metaphor_count));
    findings.insert("literary_richness_score", json!(richness));
    findings.insert("imagery_senses", json!(&senses));

    let insights = vec![
        format!("Literary richness score: {richness}"),
        format!("Imagery in {} senses: {}", imagery.len(), senses.join(", ")),
        format!(
            "Repetition patterns detected: {}",
            repetition_patterns.len()
        ),
    ];

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.75,
        links: Vec::new(),
    }
}
