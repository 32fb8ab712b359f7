use crate::analyzers::{contains_term, ratio, round4};
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;

static IMPERATIVE_MARKERS: &[&str] = &[
    "shall", "must", "should", "ought", "do not", "thou shalt", "you shall",
];

static VIRTUES: &[&str] = &[
    "love",
    "justice",
    "mercy",
    "compassion",
    "faithfulness",
    "truth",
    "righteousness",
    "holiness",
];

static VICES: &[&str] = &[
    "hate",
    "injustice",
    "cruelty",
    "unfaithfulness",
    "lies",
    "wickedness",
    "sin",
];

static NARRATIVE_INDICATORS: &[&str] = &["story", "narrative", "told", "happened", "occurred"];

/// Moral and prescriptive content: imperatives, virtues/vices, moral density.
pub fn ethical_analysis(passage: &Passage) -> AnalysisOutput {
    let imperative_count = IMPERATIVE_MARKERS
        .iter()
        .filter(|m| contains_term(passage, m))
        .count();

    let detected_virtues: Vec<&str> = VIRTUES
        .iter()
        .filter(|v| contains_term(passage, v))
        .copied()
        .collect();
    let detected_vices: Vec<&str> = VICES
        .iter()
        .filter(|v| contains_term(passage, v))
        .copied()
        .collect();

    let moral_words = detected_virtues.len() + detected_vices.len() + imperative_count;
    let moral_density = ratio(moral_words, passage.word_count());

    let prescriptive = imperative_count + detected_virtues.len();
    let narrative_hits = NARRATIVE_INDICATORS
        .iter()
        .filter(|m| contains_term(passage, m))
        .count();
    let descriptive = detected_vices.len() + narrative_hits;

    let content_type = if prescriptive as f64 > descriptive as f64 * 1.5 {
        "prescriptive"
    } else if descriptive as f64 > prescriptive as f64 * 1.5 {
        "descriptive"
    } else {
        "balanced"
    };

    let mut findings = Findings::new();
    findings.insert("imperative_count", json!(imperative_count));
    findings.insert("detected_virtues", json!(&detected_virtues));
    findings.insert("detected_vices", json!(&detected_vices));
    findings.insert("moral_density", json!(round4(moral_density)));
    findings.insert("content_type", json!(content_type));
    findings.insert("virtue_count", json!(detected_virtues.len()));
    findings.insert("vice_count", json!(detected_vices.len()));
    findings.insert("prescriptive_score", json!(prescriptive));
    findings.insert("descriptive_score", json!(descriptive));

    let insights = vec![
        format!("Ethical content type: {content_type} (moral density: {moral_density:.3})"),
        format!(
            "Detected {} virtues and {} vices",
            detected_virtues.len(),
            detected_vices.len()
        ),
        format!("Imperative statements: {imperative_count}"),
        format!("Prescriptive vs Descriptive: {prescriptive} vs {descriptive}"),
    ];

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.8,
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commandments_read_as_prescriptive() {
        let passage = Passage::new(
            "Exodus 20:13",
            "Thou shalt not kill. Thou shalt love truth and justice with mercy.",
        );
        let output = ethical_analysis(&passage);
        assert_eq!(output.findings.str_of("content_type"), Some("prescriptive"));
        assert!(output.findings.usize_or("imperative_count", 0) >= 1);
        assert!(output.findings.usize_or("virtue_count", 0) >= 2);
    }

    #[test]
    fn empty_passage_is_balanced() {
        let output = ethical_analysis(&Passage::new("Empty 0:0", ""));
        assert_eq!(output.findings.str_of("content_type"), Some("balanced"));
        assert_eq!(output.findings.f64_or("moral_density", 1.0), 0.0);
    }
}
