use crate::analyzers::{contains_term, count_term, ratio, round4};
use crate::config;
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;

static CHRIST_TITLES: &[&str] = &[
    "christ",
    "jesus",
    "son of god",
    "son of man",
    "messiah",
    "savior",
    "lord",
    "king",
    "lamb",
    "shepherd",
];

static CHRIST_ACTIONS: &[&str] = &[
    "came", "died", "rose", "ascended", "will come", "saves", "heals", "teaches", "forgives",
];

/// Titles that only read christologically in context, with the context words
/// that license the reading (e.g. "word" alongside "beginning" and "god").
static CONTEXTUAL_TITLES: &[(&str, &[&str])] = &[
    ("word", &["beginning", "god", "with god"]),
    ("light", &["darkness", "world", "shine"]),
    ("bread", &["life", "heaven", "come down"]),
    ("way", &["truth", "life", "father"]),
];

/// Christ-centered content detection with contextual title recognition.
pub fn christological_analysis(passage: &Passage) -> AnalysisOutput {
    let mut detected_titles: Vec<String> = CHRIST_TITLES
        .iter()
        .filter(|t| contains_term(passage, t))
        .map(|t| t.to_string())
        .collect();

    let detected_actions: Vec<String> = CHRIST_ACTIONS
        .iter()
        .filter(|a| contains_term(passage, a))
        .map(|a| a.to_string())
        .collect();

    let mut contextual = Vec::new();
    for (title, context_words) in CONTEXTUAL_TITLES {
        if !contains_term(passage, title) {
            continue;
        }
        let matched: Vec<&str> = context_words
            .iter()
            .filter(|w| contains_term(passage, w))
            .copied()
            .collect();
        // Two context hits is the bar for reading the title christologically.
        if matched.len() >= 2 {
            contextual.push(json!({
                "title": title,
                "context_strength": round4(ratio(matched.len(), context_words.len())),
                "context_words": matched,
            }));
            if !detected_titles.iter().any(|t| t == title) {
                detected_titles.push(title.to_string());
            }
        }
    }

    let title_occurrences: usize = detected_titles.iter().map(|t| count_term(passage, t)).sum();
    let density = ratio(title_occurrences, passage.word_count());

    let thresholds = &config::get().thresholds;
    let focus_intensity = if density > thresholds.christological_high {
        "high"
    } else if density > thresholds.christological_medium {
        "medium"
    } else {
        "low"
    };

    let mut findings = Findings::new();
    findings.insert("christ_titles", json!(&detected_titles));
    findings.insert("contextual_christ_titles", json!(&contextual));
    findings.insert("christ_actions", json!(&detected_actions));
    findings.insert("christological_density", json!(round4(density)));
    findings.insert("focus_intensity", json!(focus_intensity));
    findings.insert("title_count", json!(detected_titles.len()));
    findings.insert("contextual_title_count", json!(contextual.len()));
    findings.insert("action_count", json!(detected_actions.len()));

    let mut insights = vec![format!(
        "Detected {} Christ titles: {}",
        detected_titles.len(),
        detected_titles.join(", ")
    )];
    if contextual.is_empty() {
        insights.push("No contextual Christ titles detected".to_string());
    } else {
        let names: Vec<&str> = contextual
            .iter()
            .filter_map(|c| c["title"].as_str())
            .collect();
        insights.push(format!(
            "Contextual Christ titles: {} ({})",
            contextual.len(),
            names.join(", ")
        ));
    }
    insights.push(format!(
        "Christological focus intensity: {focus_intensity} (density: {density:.3})"
    ));
    insights.push(format!(
        "Christ-related actions: {}",
        detected_actions.join(", ")
    ));

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.9,
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn john_prologue_reads_word_as_title() {
        let passage = Passage::new(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        );
        let output = christological_analysis(&passage);

        let titles = output.findings.array_of("christ_titles").expect("titles");
        assert!(titles.iter().any(|t| t.as_str() == Some("word")));

        let intensity = output
            .findings
            .str_of("focus_intensity")
            .expect("intensity");
        assert!(intensity == "medium" || intensity == "high");
    }

    #[test]
    fn plain_narrative_scores_low() {
        let passage = Passage::new(
            "Genesis 1:1",
            "In the beginning God created the heaven and the earth.",
        );
        let output = christological_analysis(&passage);
        assert_eq!(output.findings.str_of("focus_intensity"), Some("low"));
        assert_eq!(output.findings.f64_or("christological_density", 1.0), 0.0);
    }
}
