//! Heuristic cross-checks between dimension results: reinforcement,
//! tension, emergence, and higher-level semantic/theological patterns.
//! A check whose required dimensions are absent is simply skipped.

use crate::config;
use crate::core::{Dimension, DimensionalAnalysis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type DimensionResults = BTreeMap<Dimension, DimensionalAnalysis>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: String,
    pub description: String,
    pub strength: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmergentPattern {
    pub pattern: String,
    pub description: String,
    pub supporting_dimensions: usize,
    pub confidence: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SemanticPattern {
    pub pattern: String,
    pub description: String,
    pub evidence: String,
    pub confidence: f64,
    pub supporting_dimensions: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TheologicalSynthesis {
    pub trinity_score: f64,
    pub incarnation_score: f64,
    pub creation_score: f64,
    pub dominant_framework: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InteractionReport {
    pub reinforcements: Vec<Interaction>,
    pub tensions: Vec<Interaction>,
    pub resonance_score: f64,
    pub emergent_patterns: Vec<EmergentPattern>,
    pub semantic_patterns: Vec<SemanticPattern>,
    pub theological: TheologicalSynthesis,
}

/// Expected themes for a handful of well-known references, used to validate
/// detected cross-references against detected themes.
static REFERENCE_THEMES: &[(&str, &[&str])] = &[
    ("Genesis 1:1", &["creation"]),
    ("Proverbs 8:22", &["wisdom", "creation"]),
    ("Colossians 1:15", &["creation", "christ"]),
    ("Hebrews 11:3", &["creation", "faith"]),
];

#[derive(Debug, Default)]
pub struct DimensionInteractionAnalyzer;

impl DimensionInteractionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, results: &DimensionResults) -> InteractionReport {
        InteractionReport {
            reinforcements: find_reinforcements(results),
            tensions: find_tensions(results),
            resonance_score: calculate_resonance(results),
            emergent_patterns: detect_emergence(results),
            semantic_patterns: analyze_semantic_level(results),
            theological: analyze_theological_level(results),
        }
    }
}

fn find_reinforcements(results: &DimensionResults) -> Vec<Interaction> {
    let mut reinforcements = Vec::new();

    // High lexical repetition reinforcing literary structure.
    if let (Some(lexical), Some(literary)) = (
        results.get(&Dimension::Lexical),
        results.get(&Dimension::Literary),
    ) {
        let lexical_repetitions = lexical
            .findings
            .array_of("most_frequent_words")
            .map(|a| a.len())
            .unwrap_or(0);
        let literary_repetitions = literary
            .findings
            .get("repetition_patterns")
            .and_then(|v| v.as_object())
            .map(|o| o.len())
            .unwrap_or(0);

        if lexical_repetitions > 0 && literary_repetitions > 0 {
            reinforcements.push(Interaction {
                kind: "lexical_literary_reinforcement".to_string(),
                description: "High lexical repetition patterns reinforce literary structure"
                    .to_string(),
                strength: lexical_repetitions.min(literary_repetitions) as f64 / 5.0,
            });
        }
    }

    // Strong thematic content reinforcing ethical teachings.
    if let (Some(thematic), Some(ethical)) = (
        results.get(&Dimension::Thematic),
        results.get(&Dimension::Ethical),
    ) {
        let theme_density = thematic.findings.f64_or("theme_density", 0.0);
        let moral_density = ethical.findings.f64_or("moral_density", 0.0);

        if theme_density > 0.05 && moral_density > 0.02 {
            reinforcements.push(Interaction {
                kind: "thematic_ethical_reinforcement".to_string(),
                description: "Strong thematic content reinforces ethical teachings".to_string(),
                strength: theme_density.min(moral_density) * 10.0,
            });
        }
    }

    reinforcements
}

fn find_tensions(results: &DimensionResults) -> Vec<Interaction> {
    let mut tensions = Vec::new();

    // Simple sentence structure against complex thematic content.
    if let (Some(structural), Some(thematic)) = (
        results.get(&Dimension::Structural),
        results.get(&Dimension::Thematic),
    ) {
        let sentence_count = structural.findings.usize_or("sentence_count", 1);
        let theme_count = thematic.findings.usize_or("theme_count", 0);

        if sentence_count == 1 && theme_count > 2 {
            tensions.push(Interaction {
                kind: "structural_thematic_tension".to_string(),
                description: "Simple sentence structure contrasts with complex thematic content"
                    .to_string(),
                strength: theme_count as f64 / sentence_count as f64,
            });
        }
    }

    tensions
}

fn calculate_resonance(results: &DimensionResults) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let weights = &config::get().weights;
    let mut weighted_confidence = 0.0;
    let mut total_weight = 0.0;

    for (dimension, result) in results {
        let weight = weights.weight(*dimension);
        weighted_confidence += result.confidence * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        weighted_confidence / total_weight
    } else {
        0.0
    }
}

fn detect_emergence(results: &DimensionResults) -> Vec<EmergentPattern> {
    let mut emergent = Vec::new();

    let mut creation_indicators = 0usize;
    if let Some(thematic) = results.get(&Dimension::Thematic) {
        if thematic
            .findings
            .get("detected_themes")
            .and_then(|v| v.as_object())
            .map(|o| o.contains_key("creation"))
            .unwrap_or(false)
        {
            creation_indicators += 1;
        }
    }
    if let Some(temporal) = results.get(&Dimension::Temporal) {
        if temporal.findings.str_of("dominant_tense") == Some("past") {
            creation_indicators += 1;
        }
    }
    if let Some(historical) = results.get(&Dimension::Historical) {
        if matches!(
            historical.findings.str_of("context_type"),
            Some("strongly_historical") | Some("historically_rooted")
        ) {
            creation_indicators += 1;
        }
    }

    if creation_indicators >= 2 {
        emergent.push(EmergentPattern {
            pattern: "creation_narrative".to_string(),
            description: "Multiple dimensions suggest a creation/origins narrative".to_string(),
            supporting_dimensions: creation_indicators,
            confidence: (creation_indicators as f64 / 3.0).min(1.0),
        });
    }

    emergent
}

fn analyze_semantic_level(results: &DimensionResults) -> Vec<SemanticPattern> {
    let mut patterns = Vec::new();

    // Repeated "word" alongside a contextual christological reading.
    if let (Some(lexical), Some(christological)) = (
        results.get(&Dimension::Lexical),
        results.get(&Dimension::Christological),
    ) {
        let word_count = lexical
            .findings
            .array_of("most_frequent_words")
            .and_then(|entries| {
                entries.iter().find_map(|e| {
                    let pair = e.as_array()?;
                    if pair.first()?.as_str()? == "word" {
                        pair.get(1)?.as_u64()
                    } else {
                        None
                    }
                })
            })
            .unwrap_or(0);

        let contextual_count = christological
            .findings
            .array_of("contextual_christ_titles")
            .map(|a| a.len())
            .unwrap_or(0);

        if word_count > 1 && contextual_count > 0 {
            patterns.push(SemanticPattern {
                pattern: "potential_christological_title".to_string(),
                description:
                    "High-frequency term 'Word' may be a christological title based on context"
                        .to_string(),
                evidence: format!("'Word' appears {word_count} times with contextual indicators"),
                confidence: 0.85,
                supporting_dimensions: vec!["lexical".to_string(), "christological".to_string()],
            });
        }
    }

    // Cross-references validated by shared theological themes.
    if let (Some(cross_ref), Some(thematic)) = (
        results.get(&Dimension::CrossReference),
        results.get(&Dimension::Thematic),
    ) {
        let references = cross_ref.findings.array_of("cross_references");
        let themes = thematic
            .findings
            .get("detected_themes")
            .and_then(|v| v.as_object());

        if let (Some(references), Some(themes)) = (references, themes) {
            let mut consistency = 0usize;
            for reference in references {
                let Some(name) = reference["reference"].as_str() else {
                    continue;
                };
                if let Some((_, expected)) =
                    REFERENCE_THEMES.iter().find(|(r, _)| *r == name)
                {
                    consistency += expected
                        .iter()
                        .filter(|t| themes.contains_key(**t))
                        .count();
                }
            }

            if consistency > 0 {
                patterns.push(SemanticPattern {
                    pattern: "thematic_cross_reference_validation".to_string(),
                    description: format!(
                        "Cross-references validated by {consistency} shared theological themes"
                    ),
                    evidence: format!(
                        "References and themes show {consistency} points of consistency"
                    ),
                    confidence: (consistency as f64 / 5.0).min(1.0),
                    supporting_dimensions: vec![
                        "cross_reference".to_string(),
                        "thematic".to_string(),
                    ],
                });
            }
        }
    }

    patterns
}

fn analyze_theological_level(results: &DimensionResults) -> TheologicalSynthesis {
    let mut trinity = 0.0;
    let mut incarnation = 0.0;
    let mut creation = 0.0;

    let themes = results.get(&Dimension::Thematic).and_then(|t| {
        t.findings
            .get("detected_themes")
            .and_then(|v| v.as_object())
            .cloned()
    });

    if let Some(themes) = &themes {
        if themes.contains_key("creation") {
            creation += 0.3;
        }
    }

    if let Some(temporal) = results.get(&Dimension::Temporal) {
        let past_dominant = temporal.findings.str_of("dominant_tense") == Some("past");
        let has_creation = themes
            .as_ref()
            .map(|t| t.contains_key("creation"))
            .unwrap_or(false);
        if past_dominant && has_creation {
            creation += 0.3;
        }
    }

    if let Some(christological) = results.get(&Dimension::Christological) {
        let density = christological
            .findings
            .f64_or("christological_density", 0.0);
        if density > 0.0 {
            incarnation += density * 2.0;
        }

        if let Some(titles) = christological.findings.array_of("christ_titles") {
            let relational = titles.iter().any(|t| {
                matches!(t.as_str(), Some("son") | Some("father") | Some("spirit"))
            });
            if relational {
                trinity += 0.4;
            }
        }
        if let Some(themes) = &themes {
            if themes.contains_key("kingdom") {
                trinity += 0.3;
            }
        }
    }

    let scores = [
        ("Trinitarian", trinity),
        ("Incarnational", incarnation),
        ("Creation", creation),
    ];
    let dominant = if scores.iter().all(|(_, s)| *s < 0.2) {
        "Undetermined"
    } else {
        scores
            .iter()
            .fold(("Undetermined", f64::MIN), |best, &(name, score)| {
                if score > best.1 {
                    (name, score)
                } else {
                    best
                }
            })
            .0
    };

    TheologicalSynthesis {
        trinity_score: (trinity * 100.0).round() / 100.0,
        incarnation_score: (incarnation * 100.0).round() / 100.0,
        creation_score: (creation * 100.0).round() / 100.0,
        dominant_framework: dominant.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MultiDimensionalAnalyzer;
    use crate::analyzers::AlgorithmRegistry;
    use crate::core::Passage;

    fn analyze(reference: &str, text: &str) -> DimensionResults {
        let registry = AlgorithmRegistry::with_builtins();
        let analyzer = MultiDimensionalAnalyzer::new(&registry);
        analyzer.analyze(&Passage::new(reference, text)).dimensions
    }

    #[test]
    fn empty_results_have_zero_resonance() {
        let analyzer = DimensionInteractionAnalyzer::new();
        let report = analyzer.analyze(&BTreeMap::new());
        assert_eq!(report.resonance_score, 0.0);
        assert!(report.reinforcements.is_empty());
        assert_eq!(report.theological.dominant_framework, "Undetermined");
    }

    #[test]
    fn john_prologue_surfaces_christological_title_pattern() {
        let results = analyze(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        );
        let analyzer = DimensionInteractionAnalyzer::new();
        let report = analyzer.analyze(&results);

        assert!(report.resonance_score > 0.0);
        assert!(report
            .semantic_patterns
            .iter()
            .any(|p| p.pattern == "potential_christological_title"));
    }

    #[test]
    fn creation_narrative_emerges_from_genesis() {
        let results = analyze(
            "Genesis 1:1",
            "In the beginning God created the heaven and the earth.",
        );
        let analyzer = DimensionInteractionAnalyzer::new();
        let report = analyzer.analyze(&results);

        assert!(report
            .emergent_patterns
            .iter()
            .any(|p| p.pattern == "creation_narrative"));
    }
}
