pub mod metrics;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The ten fixed analytical dimensions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Lexical,
    Thematic,
    Structural,
    Christological,
    CrossReference,
    Literary,
    Ethical,
    Temporal,
    Eschatological,
    Historical,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Lexical,
        Dimension::Thematic,
        Dimension::Structural,
        Dimension::Christological,
        Dimension::CrossReference,
        Dimension::Literary,
        Dimension::Ethical,
        Dimension::Temporal,
        Dimension::Eschatological,
        Dimension::Historical,
    ];

    /// Name of the registered algorithm serving this dimension.
    pub fn algorithm_name(&self) -> &'static str {
        static ALGORITHM_NAMES: &[(Dimension, &str)] = &[
            (Dimension::Lexical, "lexical_analysis"),
            (Dimension::Thematic, "thematic_extraction"),
            (Dimension::Structural, "structural_analysis"),
            (Dimension::Christological, "christological_analysis"),
            (Dimension::CrossReference, "cross_reference_detection"),
            (Dimension::Literary, "literary_analysis"),
            (Dimension::Ethical, "ethical_analysis"),
            (Dimension::Temporal, "temporal_analysis"),
            (Dimension::Eschatological, "eschatological_analysis"),
            (Dimension::Historical, "historical_analysis"),
        ];

        ALGORITHM_NAMES
            .iter()
            .find(|(d, _)| d == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Dimension, &str)] = &[
            (Dimension::Lexical, "lexical"),
            (Dimension::Thematic, "thematic"),
            (Dimension::Structural, "structural"),
            (Dimension::Christological, "christological"),
            (Dimension::CrossReference, "cross_reference"),
            (Dimension::Literary, "literary"),
            (Dimension::Ethical, "ethical"),
            (Dimension::Temporal, "temporal"),
            (Dimension::Eschatological, "eschatological"),
            (Dimension::Historical, "historical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(d, _)| d == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Testament {
    Old,
    New,
}

impl std::fmt::Display for Testament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Testament::Old => write!(f, "Old"),
            Testament::New => write!(f, "New"),
        }
    }
}

/// A unit of biblical text with reference metadata.
///
/// Derived views (word list, frequency table, lowercase text, normalized
/// words) are computed at most once per instance and cached. `text` is
/// read-only after construction, so the cached views cannot go stale.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Passage {
    pub reference: String,
    text: String,
    pub version: String,
    pub testament: Testament,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub cross_references: Vec<String>,

    #[serde(skip)]
    words: OnceCell<Vec<String>>,
    #[serde(skip)]
    normalized: OnceCell<Vec<String>>,
    #[serde(skip)]
    normalized_text: OnceCell<String>,
    #[serde(skip)]
    word_freq: OnceCell<BTreeMap<String, usize>>,
    #[serde(skip)]
    text_lower: OnceCell<String>,
    #[serde(skip)]
    expanded_keywords: OnceCell<Vec<String>>,
}

impl Passage {
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
            version: "ESV".to_string(),
            testament: Testament::New,
            book: String::new(),
            chapter: 0,
            verse: 0,
            keywords: Vec::new(),
            themes: Vec::new(),
            cross_references: Vec::new(),
            words: OnceCell::new(),
            normalized: OnceCell::new(),
            normalized_text: OnceCell::new(),
            word_freq: OnceCell::new(),
            text_lower: OnceCell::new(),
            expanded_keywords: OnceCell::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_testament(mut self, testament: Testament) -> Self {
        self.testament = testament;
        self
    }

    pub fn with_location(mut self, book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        self.book = book.into();
        self.chapter = chapter;
        self.verse = verse;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_themes(mut self, themes: Vec<String>) -> Self {
        self.themes = themes;
        self
    }

    pub fn with_cross_references(mut self, refs: Vec<String>) -> Self {
        self.cross_references = refs;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw whitespace-split tokens.
    pub fn words(&self) -> &[String] {
        self.words
            .get_or_init(|| self.text.split_whitespace().map(str::to_string).collect())
    }

    /// Lowercased tokens with leading/trailing punctuation trimmed.
    pub fn normalized_words(&self) -> &[String] {
        self.normalized.get_or_init(|| {
            self.words()
                .iter()
                .map(|w| {
                    w.trim_matches(|c: char| !c.is_alphanumeric())
                        .to_lowercase()
                })
                .filter(|w| !w.is_empty())
                .collect()
        })
    }

    /// Normalized tokens rejoined with single spaces, for phrase matching.
    pub fn normalized_text(&self) -> &str {
        self.normalized_text
            .get_or_init(|| self.normalized_words().join(" "))
    }

    /// Frequency table over normalized words.
    pub fn word_freq(&self) -> &BTreeMap<String, usize> {
        self.word_freq.get_or_init(|| {
            let mut freq = BTreeMap::new();
            for word in self.normalized_words() {
                *freq.entry(word.clone()).or_insert(0) += 1;
            }
            freq
        })
    }

    pub fn text_lower(&self) -> &str {
        self.text_lower.get_or_init(|| self.text.to_lowercase())
    }

    pub fn word_count(&self) -> usize {
        self.words().len()
    }

    pub fn unique_word_count(&self) -> usize {
        self.word_freq().len()
    }

    pub fn lexical_diversity(&self) -> f64 {
        let count = self.word_count();
        if count == 0 {
            0.0
        } else {
            self.unique_word_count() as f64 / count as f64
        }
    }

    /// Provided keywords, or a scan of common theological terms when none
    /// were supplied.
    pub fn derived_keywords(&self) -> Vec<String> {
        if !self.keywords.is_empty() {
            return self.keywords.clone();
        }
        static COMMON_KEYWORDS: &[&str] = &[
            "god", "jesus", "spirit", "love", "faith", "lord", "heaven", "earth",
        ];
        let lower = self.text_lower();
        COMMON_KEYWORDS
            .iter()
            .filter(|kw| lower.contains(*kw))
            .map(|kw| kw.to_string())
            .collect()
    }

    /// Keywords broadened with their synonyms.
    pub fn expanded_keywords(&self) -> &[String] {
        self.expanded_keywords.get_or_init(|| {
            crate::lexicon::SynonymDictionary::global().expand_keywords(&self.derived_keywords())
        })
    }
}

/// A loosely-typed key/value map produced by one analyzer.
///
/// There is no fixed cross-analyzer schema; consumers read keys defensively
/// through the typed accessors, which return a default when a key is absent
/// or has an unexpected type. A dotted key walks nested objects.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Findings(BTreeMap<String, Value>);

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(key) {
            return Some(value);
        }
        // Dotted path into nested objects, e.g. "tense_distribution.future".
        let mut parts = key.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn usize_or(&self, key: &str, default: usize) -> usize {
        self.get(key)
            .and_then(Value::as_u64)
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    pub fn str_of(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn array_of(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// A conceptual link to another passage (a graph edge).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkedPassage {
    pub reference: String,
    pub relationship: String,
    pub insight: String,
}

/// What one algorithm returns for one passage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub findings: Findings,
    pub insights: Vec<String>,
    pub confidence: f64,
    #[serde(default)]
    pub links: Vec<LinkedPassage>,
}

impl Default for AnalysisOutput {
    fn default() -> Self {
        Self {
            findings: Findings::new(),
            insights: Vec::new(),
            confidence: 1.0,
            links: Vec::new(),
        }
    }
}

/// One algorithm's output stamped with provenance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlgorithmicResult {
    pub algorithm: String,
    pub reference: String,
    pub findings: Findings,
    pub insights: Vec<String>,
    pub confidence: f64,
    #[serde(default)]
    pub links: Vec<LinkedPassage>,
    pub timestamp: DateTime<Utc>,
}

/// One dimension's contribution to a multi-dimensional result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DimensionalAnalysis {
    pub dimension: Dimension,
    pub findings: Findings,
    pub insights: Vec<String>,
    pub confidence: f64,
    #[serde(default)]
    pub links: Vec<LinkedPassage>,
}

/// Full analysis of one passage across all available dimensions.
///
/// The dimension map iterates in a stable order, but that order carries no
/// semantic meaning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultiDimensionalResult {
    pub passage: Passage,
    pub dimensions: BTreeMap<Dimension, DimensionalAnalysis>,
    pub synthesis: String,
    pub multiplication_factor: usize,
    pub timestamp: DateTime<Utc>,
}

impl MultiDimensionalResult {
    pub fn total_insights(&self) -> usize {
        self.dimensions.values().map(|d| d.insights.len()).sum()
    }

    pub fn total_findings(&self) -> usize {
        self.dimensions.values().map(|d| d.findings.len()).sum()
    }

    pub fn average_confidence(&self) -> f64 {
        if self.dimensions.is_empty() {
            return 0.0;
        }
        self.dimensions.values().map(|d| d.confidence).sum::<f64>() / self.dimensions.len() as f64
    }
}

/// Aggregate statistics for a batch run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total_passages: usize,
    pub total_insights: usize,
    pub total_findings: usize,
    pub average_insights_per_passage: f64,
    pub average_findings_per_passage: f64,
    pub average_confidence: f64,
    pub processing_time_seconds: f64,
    pub processing_rate: f64,
    pub parallel: bool,
    pub algorithms_used: Vec<String>,
}

impl Default for BatchStatistics {
    fn default() -> Self {
        Self {
            total_passages: 0,
            total_insights: 0,
            total_findings: 0,
            average_insights_per_passage: 0.0,
            average_findings_per_passage: 0.0,
            average_confidence: 0.0,
            processing_time_seconds: 0.0,
            processing_rate: 0.0,
            parallel: false,
            algorithms_used: Vec::new(),
        }
    }
}

/// Result of a batch analysis over a passage list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchAnalysisResult {
    pub passages_analyzed: usize,
    pub total_insights: usize,
    pub average_confidence: f64,
    pub processing_time: f64,
    pub results: Vec<MultiDimensionalResult>,
    pub statistics: BatchStatistics,
    pub timestamp: DateTime<Utc>,
}

impl BatchAnalysisResult {
    pub fn empty() -> Self {
        Self {
            passages_analyzed: 0,
            total_insights: 0,
            average_confidence: 0.0,
            processing_time: 0.0,
            results: Vec::new(),
            statistics: BatchStatistics::default(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_views_are_normalized() {
        let passage = Passage::new(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        );
        assert_eq!(passage.word_count(), 17);
        assert_eq!(passage.word_freq().get("word"), Some(&3));
        assert_eq!(passage.word_freq().get("god"), Some(&2));
        assert!(passage.lexical_diversity() > 0.0);
    }

    #[test]
    fn empty_passage_has_zero_diversity() {
        let passage = Passage::new("Empty 0:0", "");
        assert_eq!(passage.word_count(), 0);
        assert_eq!(passage.lexical_diversity(), 0.0);
    }

    #[test]
    fn findings_dotted_lookup() {
        let mut findings = Findings::new();
        findings.insert(
            "tense_distribution",
            serde_json::json!({"past": 3, "future": 0}),
        );
        assert_eq!(findings.f64_or("tense_distribution.past", 0.0), 3.0);
        assert_eq!(findings.f64_or("tense_distribution.missing", 7.0), 7.0);
    }

    #[test]
    fn keywords_derived_from_common_terms() {
        let passage = Passage::new(
            "Genesis 1:1",
            "In the beginning God created the heaven and the earth.",
        );
        let keywords = passage.derived_keywords();
        assert!(keywords.contains(&"god".to_string()));
        assert!(keywords.contains(&"heaven".to_string()));
    }
}
