use crate::analyzers::{contains_term, round3};
use crate::core::{AnalysisOutput, Findings, LinkedPassage, Passage};
use crate::corpus::testament_of_reference;
use serde_json::{json, Value};

/// One detected inter-textual connection.
#[derive(Clone, Debug)]
struct CrossReferenceLink {
    reference: String,
    relationship_type: &'static str,
    strength: f64,
    detection_method: &'static str,
    evidence: Value,
}

/// Opening-phrase parallels: (reference, phrase, base strength, context words).
static OPENING_PATTERNS: &[(&str, &str, f64, &[&str])] = &[
    ("Genesis 1:1", "in the beginning", 1.0, &[]),
    ("Proverbs 8:22", "beginning", 0.8, &["wisdom", "way"]),
    ("1 John 1:1", "beginning", 0.8, &["word", "life"]),
];

/// Theological concept clusters: (concept, keywords, member references).
static CONCEPT_CLUSTERS: &[(&str, &[&str], &[&str])] = &[
    (
        "divine_preexistence",
        &["beginning", "was", "before"],
        &["Genesis 1:1", "Proverbs 8:22-31", "John 1:1", "Colossians 1:15-17"],
    ),
    (
        "word_as_creator",
        &["word", "made", "create", "beginning"],
        &["Genesis 1:3", "Psalm 33:6", "John 1:1-3", "Hebrews 11:3"],
    ),
    (
        "god_with_god",
        &["god", "with", "was"],
        &["Genesis 1:26", "Proverbs 8:30", "John 1:1", "John 17:5"],
    ),
];

/// Keyword echoes of well-known passages.
static REFERENCE_PATTERNS: &[(&str, &[&str])] = &[
    ("Genesis 1", &["beginning", "create", "heaven", "earth"]),
    ("Exodus 20", &["commandments", "ten", "thou shalt"]),
    ("Psalm 23", &["shepherd", "green pastures", "still waters"]),
    ("John 3:16", &["god so loved", "gave his son", "eternal life"]),
    ("Matthew 5", &["blessed", "poor in spirit", "kingdom of heaven"]),
];

/// Quotation phrases checked as consecutive word windows; window length is
/// each phrase's own word count, longest phrases first.
static QUOTATION_PHRASES: &[(&str, &[&str])] = &[
    ("blessed are the poor in spirit", &["Matthew 5:3"]),
    ("in the beginning was the word", &["John 1:1"]),
    ("the word became flesh and", &["John 1:14"]),
    ("god so loved the world", &["John 3:16"]),
    ("in the beginning god", &["Genesis 1:1"]),
    ("word was with god", &["John 1:1"]),
    ("word became flesh", &["John 1:14"]),
    ("love one another", &["John 13:34", "1 John 3:11"]),
    ("blessed are the", &["Matthew 5:3", "Matthew 5:4", "Matthew 5:5"]),
    ("in the beginning", &["Genesis 1:1", "Proverbs 8:22", "John 1:1"]),
    ("word of god", &["Hebrews 4:12", "2 Timothy 2:9", "1 Peter 1:23"]),
    ("kingdom of heaven", &["Matthew 5:3", "Matthew 5:10", "Matthew 5:19"]),
    ("son of man", &["Daniel 7:13", "Matthew 8:20", "Matthew 12:40"]),
];

static BIBLICAL_MARKERS: &[&str] = &["thus says", "hear the word", "word of the lord", "scripture says"];

/// Inter-textual connection detection: opening phrases, concept clusters,
/// keyword echoes, and n-gram quotation windows, re-scored and ranked.
pub fn cross_reference_detection(passage: &Passage) -> AnalysisOutput {
    let mut links = Vec::new();

    detect_opening_phrases(passage, &mut links);
    detect_concept_clusters(passage, &mut links);
    detect_keyword_echoes(passage, &mut links);
    detect_quotations(passage, &mut links);

    rescore_links(passage, &mut links);

    links.sort_by(|a, b| {
        b.strength
            .total_cmp(&a.strength)
            .then_with(|| a.reference.cmp(&b.reference))
    });
    links.truncate(7);

    let cross_references: Vec<Value> = links
        .iter()
        .map(|link| {
            json!({
                "reference": link.reference,
                "type": link.relationship_type,
                "strength": round3(link.strength),
                "method": link.detection_method,
                "evidence": link.evidence,
            })
        })
        .collect();

    let mut methods: Vec<&str> = links.iter().map(|l| l.detection_method).collect();
    methods.sort_unstable();
    methods.dedup();

    let quotation_count = links
        .iter()
        .filter(|l| l.relationship_type.contains("quotation"))
        .count();

    let mut findings = Findings::new();
    findings.insert("cross_references", json!(cross_references));
    findings.insert("reference_count", json!(links.len()));
    findings.insert(
        "strongest_connection",
        links
            .first()
            .map(|l| {
                json!({
                    "reference": l.reference,
                    "type": l.relationship_type,
                    "strength": round3(l.strength),
                })
            })
            .unwrap_or(Value::Null),
    );
    findings.insert("detection_methods_used", json!(&methods));
    findings.insert("quotation_detections", json!(quotation_count));

    let mut insights = vec![format!(
        "Detected {} cross-references using {} methods",
        links.len(),
        methods.len()
    )];
    if let Some(strongest) = links.first() {
        insights.push(format!(
            "Strongest connection: {} (strength: {:.3})",
            strongest.reference, strongest.strength
        ));
    } else {
        insights.push("No strong connections found".to_string());
    }
    insights.push(format!("N-gram quotation detections: {quotation_count}"));

    let linked = links
        .iter()
        .map(|l| LinkedPassage {
            reference: l.reference.clone(),
            relationship: l.relationship_type.to_string(),
            insight: format!("Connected via {}", l.detection_method),
        })
        .collect();

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.8,
        links: linked,
    }
}

fn detect_opening_phrases(passage: &Passage, links: &mut Vec<CrossReferenceLink>) {
    let text = passage.normalized_text();
    for (reference, phrase, base_strength, context) in OPENING_PATTERNS {
        if !text.contains(phrase) {
            continue;
        }
        let context_matches = context.iter().filter(|w| contains_term(passage, w)).count();
        let strength = (base_strength + context_matches as f64 * 0.2).min(1.0);
        links.push(CrossReferenceLink {
            reference: reference.to_string(),
            relationship_type: "structural_parallel",
            strength,
            detection_method: "opening_phrase_analysis",
            evidence: json!({"phrase": phrase, "context_matches": context_matches}),
        });
    }
}

fn detect_concept_clusters(passage: &Passage, links: &mut Vec<CrossReferenceLink>) {
    for (concept, keywords, references) in CONCEPT_CLUSTERS {
        let matched = keywords.iter().filter(|kw| contains_term(passage, kw)).count();
        if matched + 1 < keywords.len() {
            continue;
        }
        for reference in *references {
            if *reference == passage.reference {
                continue;
            }
            links.push(CrossReferenceLink {
                reference: reference.to_string(),
                relationship_type: "conceptual_cluster",
                strength: matched as f64 / keywords.len() as f64,
                detection_method: "theological_concept_matching",
                evidence: json!({"concept": concept, "matched_keywords": matched}),
            });
        }
    }
}

fn detect_keyword_echoes(passage: &Passage, links: &mut Vec<CrossReferenceLink>) {
    for (reference, keywords) in REFERENCE_PATTERNS {
        let matched: Vec<&str> = keywords
            .iter()
            .filter(|kw| contains_term(passage, kw))
            .copied()
            .collect();
        if matched.len() < 2 {
            continue;
        }
        links.push(CrossReferenceLink {
            reference: reference.to_string(),
            relationship_type: "thematic_echo",
            strength: matched.len() as f64 / keywords.len() as f64,
            detection_method: "keyword_matching",
            evidence: json!({"matched_keywords": matched}),
        });
    }
}

fn detect_quotations(passage: &Passage, links: &mut Vec<CrossReferenceLink>) {
    let words = passage.normalized_words();

    for (phrase, references) in QUOTATION_PHRASES {
        let phrase_words: Vec<&str> = phrase.split(' ').collect();
        let n = phrase_words.len();
        if words.len() < n {
            continue;
        }

        for start in 0..=(words.len() - n) {
            let window_matches = words[start..start + n]
                .iter()
                .zip(phrase_words.iter())
                .all(|(w, p)| w == p);
            if !window_matches {
                continue;
            }

            // Longer phrases are stronger allusions; nearby prophetic
            // formulas add a small bonus.
            let context_start = start.saturating_sub(5);
            let context_end = (start + n + 5).min(words.len());
            let context_window = words[context_start..context_end].join(" ");
            let context_bonus = BIBLICAL_MARKERS
                .iter()
                .filter(|m| context_window.contains(*m))
                .count() as f64
                * 0.1;

            let strength = (n as f64 * 0.2 + context_bonus).min(1.0);
            let relationship = if n >= 3 {
                "direct_quotation"
            } else {
                "quotation_allusion"
            };

            for reference in *references {
                if *reference == passage.reference {
                    continue;
                }
                links.push(CrossReferenceLink {
                    reference: reference.to_string(),
                    relationship_type: relationship,
                    strength,
                    detection_method: "n_gram_quotation_detection",
                    evidence: json!({
                        "ngram": phrase,
                        "ngram_length": n,
                        "position": start,
                        "context_bonus": context_bonus,
                    }),
                });
            }
        }
    }
}

/// Combine method reliability, evidence strength, and same-testament
/// relevance into the final allusion strength.
fn rescore_links(passage: &Passage, links: &mut [CrossReferenceLink]) {
    for link in links.iter_mut() {
        let method_multiplier = match link.detection_method {
            "n_gram_quotation_detection" => 1.2,
            "opening_phrase_analysis" => 1.1,
            "theological_concept_matching" => 1.0,
            "keyword_matching" => 0.8,
            _ => 1.0,
        };

        let evidence_strength = match link.detection_method {
            "n_gram_quotation_detection" => {
                let n = link.evidence["ngram_length"].as_u64().unwrap_or(2) as f64;
                n / 4.0
            }
            "keyword_matching" => {
                let matched = link.evidence["matched_keywords"]
                    .as_array()
                    .map(|a| a.len())
                    .unwrap_or(0) as f64;
                (matched / 3.0).min(1.0)
            }
            _ => 1.0,
        };

        let contextual_relevance = if testament_of_reference(&link.reference) == passage.testament {
            1.1
        } else {
            1.0
        };

        link.strength =
            (link.strength * method_multiplier * evidence_strength * contextual_relevance).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn john_prologue_links_to_genesis() {
        let passage = Passage::new(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        );
        let output = cross_reference_detection(&passage);
        let refs = output.findings.array_of("cross_references").expect("refs");
        assert!(!refs.is_empty());
        assert!(refs
            .iter()
            .any(|r| r["reference"].as_str() == Some("Genesis 1:1")));
        // The passage never links to itself.
        assert!(refs
            .iter()
            .all(|r| r["reference"].as_str() != Some("John 1:1")));
    }

    #[test]
    fn quotation_windows_require_consecutive_words() {
        let passage = Passage::new("Test 1:1", "the beginning in was word the");
        let output = cross_reference_detection(&passage);
        assert_eq!(output.findings.usize_or("quotation_detections", 9), 0);
    }

    #[test]
    fn top_links_are_capped_at_seven() {
        let passage = Passage::new(
            "Test 1:1",
            "In the beginning was the word and the word was with god blessed are the poor in spirit",
        );
        let output = cross_reference_detection(&passage);
        assert!(output.findings.usize_or("reference_count", 99) <= 7);
    }
}
