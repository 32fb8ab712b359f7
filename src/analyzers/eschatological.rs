use crate::analyzers::{contains_term, ratio, round4};
use crate::config;
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;
use std::collections::BTreeMap;

static ESCHATOLOGICAL_THEMES: &[(&str, &[&str])] = &[
    ("judgment", &["judge", "judgment", "condemn", "wrath", "anger"]),
    ("kingdom", &["kingdom", "reign", "throne", "rule", "dominion"]),
    ("return", &["return", "come back", "second coming", "appear", "reveal"]),
    ("resurrection", &["resurrection", "rise", "raised", "alive", "eternal"]),
    ("new_creation", &["new heaven", "new earth", "renew", "restore", "make new"]),
    ("final_events", &["end", "last", "final", "consummation", "fulfillment"]),
];

static PROPHETIC_MARKERS: &[&str] = &[
    "prophecy", "prophet", "vision", "dream", "oracle", "thus says", "hear the word",
];

/// End-times themes and prophetic markers.
pub fn eschatological_analysis(passage: &Passage) -> AnalysisOutput {
    let mut detected: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut total_matches = 0usize;

    for (theme, keywords) in ESCHATOLOGICAL_THEMES {
        let matches: Vec<&str> = keywords
            .iter()
            .filter(|kw| contains_term(passage, kw))
            .copied()
            .collect();
        if !matches.is_empty() {
            total_matches += matches.len();
            detected.insert(*theme, matches);
        }
    }

    let prophetic_count = PROPHETIC_MARKERS
        .iter()
        .filter(|m| contains_term(passage, m))
        .count();

    let density = ratio(total_matches, passage.word_count());

    let thresholds = &config::get().thresholds;
    let intensity = if density > thresholds.eschatological_high {
        "high"
    } else if density > thresholds.eschatological_medium {
        "medium"
    } else {
        "low"
    };

    let mut findings = Findings::new();
    findings.insert("detected_eschatological_themes", json!(&detected));
    findings.insert("eschatological_theme_count", json!(detected.len()));
    findings.insert("total_eschatological_matches", json!(total_matches));
    findings.insert("prophetic_markers", json!(prophetic_count));
    findings.insert("eschatological_density", json!(round4(density)));
    findings.insert("eschatological_intensity", json!(intensity));

    let insights = vec![
        format!("Eschatological intensity: {intensity} (density: {density:.3})"),
        format!("Detected eschatological themes: {}", detected.len()),
        format!("Prophetic markers: {prophetic_count}"),
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
    fn judgment_language_raises_intensity() {
        let passage = Passage::new(
            "Revelation 20:12",
            "The dead were raised and judgment came upon the throne at the end.",
        );
        let output = eschatological_analysis(&passage);
        let intensity = output
            .findings
            .str_of("eschatological_intensity")
            .expect("intensity");
        assert!(intensity == "medium" || intensity == "high");
        assert!(output.findings.usize_or("eschatological_theme_count", 0) >= 2);
    }

    #[test]
    fn plain_text_scores_low() {
        let output = eschatological_analysis(&Passage::new("Test 1:1", "a quiet walk in a field"));
        assert_eq!(
            output.findings.str_of("eschatological_intensity"),
            Some("low")
        );
    }
}
