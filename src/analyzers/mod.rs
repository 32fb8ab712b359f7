use crate::core::{AlgorithmicResult, AnalysisOutput, Passage};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

pub mod christological;
pub mod cross_reference;
pub mod eschatological;
pub mod ethical;
pub mod historical;
pub mod lexical;
pub mod literary;
pub mod structural;
pub mod temporal;
pub mod thematic;

pub use christological::christological_analysis;
pub use cross_reference::cross_reference_detection;
pub use eschatological::eschatological_analysis;
pub use ethical::ethical_analysis;
pub use historical::historical_analysis;
pub use lexical::lexical_analysis;
pub use literary::literary_analysis;
pub use structural::structural_analysis;
pub use temporal::temporal_analysis;
pub use thematic::thematic_extraction;

/// A dimension algorithm: a pure function from passage to output.
pub type AlgorithmFn = fn(&Passage) -> AnalysisOutput;

/// Registry entry binding a name to an algorithm with metadata.
#[derive(Clone, Debug)]
pub struct AlgorithmPlugin {
    pub name: String,
    pub category: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: Vec<String>,
    function: AlgorithmFn,
}

struct BuiltinSpec {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    function: AlgorithmFn,
}

static BUILTIN_ALGORITHMS: &[BuiltinSpec] = &[
    BuiltinSpec {
        name: "lexical_analysis",
        category: "lexical",
        description: "Word patterns and statistical analysis",
        tags: &["language", "statistics", "vocabulary"],
        function: lexical_analysis,
    },
    BuiltinSpec {
        name: "thematic_extraction",
        category: "thematic",
        description: "Theological concept detection with regex",
        tags: &["theology", "concepts", "regex"],
        function: thematic_extraction,
    },
    BuiltinSpec {
        name: "structural_analysis",
        category: "structural",
        description: "Sentence and clause pattern analysis",
        tags: &["structure", "syntax", "grammar"],
        function: structural_analysis,
    },
    BuiltinSpec {
        name: "christological_analysis",
        category: "christological",
        description: "Christ-centered content detection",
        tags: &["christ", "messiah", "incarnation"],
        function: christological_analysis,
    },
    BuiltinSpec {
        name: "cross_reference_detection",
        category: "cross_reference",
        description: "Inter-textual connection detection",
        tags: &["connections", "references", "intertextuality"],
        function: cross_reference_detection,
    },
    BuiltinSpec {
        name: "literary_analysis",
        category: "literary",
        description: "Poetic and rhetorical device analysis",
        tags: &["poetry", "rhetoric", "devices"],
        function: literary_analysis,
    },
    BuiltinSpec {
        name: "ethical_analysis",
        category: "ethical",
        description: "Moral and prescriptive content analysis",
        tags: &["ethics", "morality", "prescription"],
        function: ethical_analysis,
    },
    BuiltinSpec {
        name: "temporal_analysis",
        category: "temporal",
        description: "Time-based pattern analysis",
        tags: &["time", "tense", "sequence"],
        function: temporal_analysis,
    },
    BuiltinSpec {
        name: "eschatological_analysis",
        category: "eschatological",
        description: "End-times theme detection",
        tags: &["eschatology", "prophecy", "end-times"],
        function: eschatological_analysis,
    },
    BuiltinSpec {
        name: "historical_analysis",
        category: "historical",
        description: "Historical context analysis",
        tags: &["history", "culture", "context"],
        function: historical_analysis,
    },
];

/// Name -> algorithm registry with category and tag indexing.
///
/// Lookup misses are reported as `None`; callers must check.
#[derive(Debug, Default)]
pub struct AlgorithmRegistry {
    plugins: BTreeMap<String, AlgorithmPlugin>,
    categories: BTreeMap<String, Vec<String>>,
    passage_cache: HashMap<String, Passage>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all ten built-in dimension algorithms registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for spec in BUILTIN_ALGORITHMS {
            registry.register_algorithm(
                spec.name,
                spec.function,
                spec.category,
                spec.description,
                spec.tags.iter().map(|t| t.to_string()).collect(),
            );
        }
        registry
    }

    pub fn register_algorithm(
        &mut self,
        name: &str,
        function: AlgorithmFn,
        category: &str,
        description: &str,
        tags: Vec<String>,
    ) {
        self.register(AlgorithmPlugin {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            version: "1.0".to_string(),
            author: "system".to_string(),
            tags,
            function,
        });
    }

    pub fn register(&mut self, plugin: AlgorithmPlugin) {
        let entry = self.categories.entry(plugin.category.clone()).or_default();
        if !entry.contains(&plugin.name) {
            entry.push(plugin.name.clone());
        }
        self.plugins.insert(plugin.name.clone(), plugin);
    }

    pub fn unregister(&mut self, name: &str) {
        if let Some(plugin) = self.plugins.remove(name) {
            if let Some(names) = self.categories.get_mut(&plugin.category) {
                names.retain(|n| n != name);
                if names.is_empty() {
                    self.categories.remove(&plugin.category);
                }
            }
        }
    }

    pub fn plugin_info(&self, name: &str) -> Option<&AlgorithmPlugin> {
        self.plugins.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn algorithm_names(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    /// All plugins, or those in one category.
    pub fn list_plugins(&self, category: Option<&str>) -> Vec<&AlgorithmPlugin> {
        match category {
            Some(cat) => self
                .categories
                .get(cat)
                .map(|names| names.iter().filter_map(|n| self.plugins.get(n)).collect())
                .unwrap_or_default(),
            None => self.plugins.values().collect(),
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    pub fn algorithms_by_tag(&self, tag: &str) -> Vec<&str> {
        self.plugins
            .values()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Apply one algorithm to a passage. Unknown name -> `None`.
    pub fn analyze_passage(&self, passage: &Passage, name: &str) -> Option<AlgorithmicResult> {
        let plugin = self.plugins.get(name)?;
        let output = (plugin.function)(passage);
        Some(AlgorithmicResult {
            algorithm: plugin.name.clone(),
            reference: passage.reference.clone(),
            findings: output.findings,
            insights: output.insights,
            confidence: output.confidence,
            links: output.links,
            timestamp: Utc::now(),
        })
    }

    /// Apply algorithms in sequence, skipping unknown names.
    pub fn chain_algorithms(&self, passage: &Passage, names: &[String]) -> Vec<AlgorithmicResult> {
        names
            .iter()
            .filter_map(|name| self.analyze_passage(passage, name))
            .collect()
    }

    /// Apply every algorithm in one category.
    pub fn analyze_by_category(&self, passage: &Passage, category: &str) -> Vec<AlgorithmicResult> {
        let names = self.categories.get(category).cloned().unwrap_or_default();
        self.chain_algorithms(passage, &names)
    }

    pub fn cache_passage(&mut self, passage: Passage) {
        let key = format!("{}_{}", passage.reference, passage.version);
        self.passage_cache.insert(key, passage);
    }

    pub fn cached_passage(&self, reference: &str, version: &str) -> Option<&Passage> {
        self.passage_cache.get(&format!("{reference}_{version}"))
    }
}

pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1_000.0).round() / 1_000.0
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Whole-word (or, for phrases, normalized substring) membership.
pub(crate) fn contains_term(passage: &Passage, term: &str) -> bool {
    if term.contains(' ') {
        passage.normalized_text().contains(term)
    } else {
        passage.word_freq().contains_key(term)
    }
}

/// Whole-word occurrence count; phrases count non-overlapping windows.
pub(crate) fn count_term(passage: &Passage, term: &str) -> usize {
    if term.contains(' ') {
        passage.normalized_text().matches(term).count()
    } else {
        passage.word_freq().get(term).copied().unwrap_or(0)
    }
}
