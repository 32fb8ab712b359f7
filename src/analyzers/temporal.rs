use crate::analyzers::{contains_term, count_term, ratio, round4};
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;

/// Tense marker tables, checked in this order when counts tie.
static TEMPORAL_MARKERS: &[(&str, &[&str])] = &[
    (
        "past",
        &["was", "were", "had", "did", "came", "went", "began", "created", "made"],
    ),
    (
        "present",
        &["is", "are", "has", "do", "come", "go", "begin", "create", "make"],
    ),
    (
        "future",
        &["will", "shall", "would", "should", "may", "might", "can", "could"],
    ),
];

static SEQUENCE_WORDS: &[&str] = &[
    "then", "after", "before", "when", "while", "during", "next", "finally", "lastly", "first",
];

static TIME_REFERENCES: &[&str] = &[
    "day", "night", "morning", "evening", "year", "month", "week", "hour", "time", "season",
];

/// Time-based patterns: tense distribution, sequences, temporal density.
pub fn temporal_analysis(passage: &Passage) -> AnalysisOutput {
    let mut tense_counts: Vec<(&str, usize)> = Vec::with_capacity(3);
    for (tense, markers) in TEMPORAL_MARKERS {
        let count: usize = markers.iter().map(|m| count_term(passage, m)).sum();
        tense_counts.push((*tense, count));
    }

    let sequence_count = SEQUENCE_WORDS
        .iter()
        .filter(|w| contains_term(passage, w))
        .count();
    let time_ref_count = TIME_REFERENCES
        .iter()
        .filter(|w| contains_term(passage, w))
        .count();

    let total_temporal: usize = tense_counts.iter().map(|(_, c)| c).sum();
    let temporal_density = ratio(total_temporal, passage.word_count());

    // First strictly-greatest wins, so ties resolve past -> present -> future.
    let mut dominant_tense = "neutral";
    let mut best_count = 0usize;
    for &(tense, count) in &tense_counts {
        if count > best_count {
            best_count = count;
            dominant_tense = tense;
        }
    }

    let flow_score = ratio(sequence_count + time_ref_count, passage.word_count().max(1));

    let dominant_count = tense_counts
        .iter()
        .find(|(t, _)| *t == dominant_tense)
        .map(|(_, c)| *c)
        .unwrap_or(0);

    let tense_distribution: serde_json::Map<String, serde_json::Value> = tense_counts
        .iter()
        .map(|(tense, count)| (tense.to_string(), json!(count)))
        .collect();

    let mut findings = Findings::new();
    findings.insert("tense_distribution", json!(tense_distribution));
    findings.insert("sequence_indicators", json!(sequence_count));
    findings.insert("time_references", json!(time_ref_count));
    findings.insert("temporal_density", json!(round4(temporal_density)));
    findings.insert("dominant_tense", json!(dominant_tense));
    findings.insert("temporal_flow_score", json!(round4(flow_score)));

    let insights = vec![
        format!("Temporal density: {temporal_density:.3} (markers per word)"),
        format!("Dominant tense: {dominant_tense} ({dominant_count} indicators)"),
        format!("Sequence indicators: {sequence_count}, Time references: {time_ref_count}"),
        format!("Temporal flow score: {flow_score:.3}"),
    ];

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.85,
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_narration_dominates() {
        let passage = Passage::new(
            "Genesis 1:1",
            "In the beginning God created the heaven and the earth.",
        );
        let output = temporal_analysis(&passage);
        assert_eq!(output.findings.str_of("dominant_tense"), Some("past"));
        assert_eq!(output.findings.f64_or("tense_distribution.past", 0.0), 1.0);
    }

    #[test]
    fn no_markers_means_neutral() {
        let output = temporal_analysis(&Passage::new("Test 1:1", "holy holy holy"));
        assert_eq!(output.findings.str_of("dominant_tense"), Some("neutral"));
    }

    #[test]
    fn markers_count_whole_words_only() {
        // "his" must not count as "is".
        let output = temporal_analysis(&Passage::new("Test 1:1", "his throne endures"));
        assert_eq!(
            output.findings.f64_or("tense_distribution.present", 9.0),
            0.0
        );
    }
}
