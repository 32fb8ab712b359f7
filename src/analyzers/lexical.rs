use crate::analyzers::{ratio, round2, round4};
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;

/// Word-level statistics: counts, diversity, hapax legomena, top frequencies.
pub fn lexical_analysis(passage: &Passage) -> AnalysisOutput {
    let words = passage.words();
    let word_freq = passage.word_freq();

    let total_words = words.len();
    let unique_words = word_freq.len();
    let diversity = ratio(unique_words, total_words);

    let avg_word_length = if total_words == 0 {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / total_words as f64
    };

    let hapax_count = word_freq.values().filter(|&&c| c == 1).count();

    // Top 5 by count, alphabetical on ties for stable output.
    let mut by_count: Vec<(&String, &usize)> = word_freq.iter().collect();
    by_count.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let most_frequent: Vec<(String, usize)> = by_count
        .into_iter()
        .take(5)
        .map(|(w, c)| (w.clone(), *c))
        .collect();

    let mut findings = Findings::new();
    findings.insert("word_count", json!(total_words));
    findings.insert("unique_words", json!(unique_words));
    findings.insert("lexical_diversity", json!(round4(diversity)));
    findings.insert("average_word_length", json!(round2(avg_word_length)));
    findings.insert("hapax_legomena_count", json!(hapax_count));
    findings.insert("most_frequent_words", json!(most_frequent));

    let insights = vec![
        format!("Passage contains {total_words} words with {unique_words} unique words"),
        format!("Lexical diversity: {diversity:.2}"),
        format!("Average word length: {avg_word_length:.1} characters"),
        format!("Hapax legomena: {hapax_count} words appearing only once"),
    ];

    AnalysisOutput {
        findings,
        insights,
        confidence: 1.0,
        links: Vec::new(),
    }
}
