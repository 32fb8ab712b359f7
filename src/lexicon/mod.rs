//! Synonym lexicon for broadening theological keyword matches.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Canonical term -> synonym list. Built once, immutable thereafter.
static BIBLICAL_SYNONYMS: &[(&str, &[&str])] = &[
    // Creation
    ("create", &["make", "form", "fashion", "establish", "bring forth", "produce"]),
    ("beginning", &["start", "origin", "commencement", "inception", "genesis"]),
    // Salvation
    ("save", &["deliver", "rescue", "redeem", "liberate", "free"]),
    ("salvation", &["deliverance", "redemption", "rescue", "liberation"]),
    // Kingdom
    ("kingdom", &["realm", "domain", "empire", "sovereignty", "rule"]),
    ("king", &["ruler", "sovereign", "monarch", "lord", "prince"]),
    // Love
    ("love", &["affection", "devotion", "passion", "tenderness", "compassion"]),
    ("beloved", &["dear", "cherished", "precious", "darling"]),
    // Faith
    ("faith", &["belief", "trust", "confidence", "assurance", "conviction"]),
    ("believe", &["trust", "have faith", "accept", "credit"]),
    // Holiness
    ("holy", &["sacred", "divine", "consecrated", "sanctified", "pure"]),
    ("righteous", &["just", "upright", "moral", "virtuous", "godly"]),
    // Wisdom
    ("wise", &["prudent", "sagacious", "discerning", "insightful", "judicious"]),
    ("wisdom", &["understanding", "knowledge", "discernment", "insight"]),
    // Justice
    ("justice", &["fairness", "righteousness", "equity", "impartiality"]),
    ("judge", &["adjudicate", "decide", "determine", "rule"]),
    // Christological
    ("christ", &["messiah", "anointed", "savior", "redeemer"]),
    ("jesus", &["christ", "savior", "lord", "master"]),
    ("son of god", &["god's son", "divine son", "heavenly son"]),
    ("son of man", &["human son", "man's son", "mortal son"]),
    // Eschatological
    ("end", &["conclusion", "termination", "finish", "close"]),
    ("judgment", &["condemnation", "verdict", "sentence", "decision"]),
    ("heaven", &["paradise", "celestial realm", "eternal home"]),
    ("earth", &["world", "land", "ground", "terra firma"]),
];

/// Lookup table mapping canonical theological terms to synonym lists.
#[derive(Debug)]
pub struct SynonymDictionary {
    synonym_map: BTreeMap<&'static str, &'static [&'static str]>,
    reverse_map: BTreeMap<&'static str, &'static str>,
}

static GLOBAL: Lazy<SynonymDictionary> = Lazy::new(SynonymDictionary::build);

impl SynonymDictionary {
    fn build() -> Self {
        let mut synonym_map = BTreeMap::new();
        let mut reverse_map = BTreeMap::new();
        for (canonical, synonyms) in BIBLICAL_SYNONYMS {
            synonym_map.insert(*canonical, *synonyms);
            for synonym in *synonyms {
                reverse_map.insert(*synonym, *canonical);
            }
        }
        Self {
            synonym_map,
            reverse_map,
        }
    }

    /// The shared process-wide dictionary.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// All synonyms of a word (resolved through its canonical form).
    pub fn synonyms(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();
        let canonical = self
            .reverse_map
            .get(lower.as_str())
            .copied()
            .unwrap_or(lower.as_str());
        self.synonym_map
            .get(canonical)
            .map(|syns| syns.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Canonical form of a word, or the word itself when unknown.
    pub fn canonical_form(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        self.reverse_map
            .get(lower.as_str())
            .map(|c| c.to_string())
            .unwrap_or(lower)
    }

    /// Broaden a keyword list with all known synonyms, deduplicated.
    pub fn expand_keywords(&self, keywords: &[String]) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::new();
        for keyword in keywords {
            if !expanded.contains(keyword) {
                expanded.push(keyword.clone());
            }
            for synonym in self.synonyms(keyword) {
                if !expanded.contains(&synonym) {
                    expanded.push(synonym);
                }
            }
        }
        expanded
    }

    /// Which synonym forms of which keywords occur in `text` (expected
    /// lowercase).
    pub fn find_matches(&self, text: &str, keywords: &[String]) -> BTreeMap<String, Vec<String>> {
        let mut matches = BTreeMap::new();

        for keyword in keywords {
            let canonical = self.canonical_form(keyword);
            let mut forms = vec![canonical.clone()];
            forms.extend(self.synonyms(keyword));

            let found: Vec<String> = forms.into_iter().filter(|f| text.contains(f.as_str())).collect();
            if !found.is_empty() {
                matches.insert(keyword.clone(), found);
            }
        }

        matches
    }
}
