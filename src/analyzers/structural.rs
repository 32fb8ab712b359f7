use crate::analyzers::round2;
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;
use std::collections::BTreeMap;

/// Sentence and clause structure: counts, lengths, adjacent repetition.
pub fn structural_analysis(passage: &Passage) -> AnalysisOutput {
    let text = passage.text();
    let sentences: Vec<&str> = text
        .split(['.', '?', '!'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let words = passage.words();

    let sentence_count = sentences.len();
    let avg_sentence_length = if sentence_count == 0 {
        0.0
    } else {
        words.len() as f64 / sentence_count as f64
    };

    let questions = text.matches('?').count();
    let exclamations = text.matches('!').count();

    // Adjacent-bigram repetition as a parallelism proxy.
    let normalized = passage.normalized_words();
    let mut word_repetitions: BTreeMap<String, usize> = BTreeMap::new();
    for pair in normalized.windows(2) {
        *word_repetitions
            .entry(format!("{} {}", pair[0], pair[1]))
            .or_insert(0) += 1;
    }

    let complexity_score = avg_sentence_length * (1 + questions + exclamations) as f64;

    let mut findings = Findings::new();
    findings.insert("sentence_count", json!(sentence_count));
    findings.insert("average_sentence_length", json!((avg_sentence_length * 10.0).round() / 10.0));
    findings.insert("question_count", json!(questions));
    findings.insert("exclamation_count", json!(exclamations));
    findings.insert("word_repetitions", json!(word_repetitions));
    findings.insert("complexity_score", json!(round2(complexity_score)));

    let insights = vec![
        format!(
            "Passage contains {sentence_count} sentences with average length {avg_sentence_length:.1} words"
        ),
        format!("Contains {questions} questions and {exclamations} exclamations"),
        format!("Structural complexity score: {complexity_score:.1}"),
    ];

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
    fn sentence_splitting_counts_terminators() {
        let passage = Passage::new("Psalm 13:1", "How long, O Lord? Will you forget me forever!");
        let output = structural_analysis(&passage);
        assert_eq!(output.findings.usize_or("sentence_count", 0), 2);
        assert_eq!(output.findings.usize_or("question_count", 0), 1);
        assert_eq!(output.findings.usize_or("exclamation_count", 0), 1);
    }

    #[test]
    fn empty_passage_scores_zero() {
        let output = structural_analysis(&Passage::new("Empty 0:0", ""));
        assert_eq!(output.findings.usize_or("sentence_count", 9), 0);
        assert_eq!(output.findings.f64_or("complexity_score", 1.0), 0.0);
    }
}
