use crate::analyzers::{ratio, round4};
use crate::core::{AnalysisOutput, Findings, Passage};
use crate::lexicon::SynonymDictionary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeMap;

struct ThemeSpec {
    name: &'static str,
    patterns: &'static [&'static str],
    base_keywords: &'static [&'static str],
}

static THEME_SPECS: &[ThemeSpec] = &[
    ThemeSpec {
        name: "creation",
        patterns: &[
            r"\bcreat\w*\b",
            r"\bmade?\b",
            r"\bbeginning\b",
            r"\bheaven\b",
            r"\bearth\b",
            r"\bform\w*\b",
            r"\bestablish\w*\b",
        ],
        base_keywords: &["create", "beginning", "heaven", "earth"],
    },
    ThemeSpec {
        name: "salvation",
        patterns: &[
            r"\bsav\w*\b",
            r"\bredeem\w*\b",
            r"\bforgiv\w*\b",
            r"\bgrace\b",
            r"\bdeliver\w*\b",
            r"\brescu\w*\b",
        ],
        base_keywords: &["save", "salvation", "redeem", "grace"],
    },
    ThemeSpec {
        name: "kingdom",
        patterns: &[
            r"\bkingdom\b",
            r"\bking\w*\b",
            r"\brul\w*\b",
            r"\breign\w*\b",
            r"\bthrone\b",
            r"\bgovern\w*\b",
            r"\bauthority\b",
        ],
        base_keywords: &["kingdom", "king", "rule", "reign"],
    },
    ThemeSpec {
        name: "love",
        patterns: &[
            r"\blov\w*\b",
            r"\bbeloved\b",
            r"\bdear\w*\b",
            r"\bcherish\w*\b",
            r"\bcompassion\b",
            r"\bmerc\w*\b",
            r"\baffection\b",
        ],
        base_keywords: &["love", "beloved", "compassion"],
    },
    ThemeSpec {
        name: "faith",
        patterns: &[
            r"\bfaith\w*\b",
            r"\bbeliev\w*\b",
            r"\btrust\w*\b",
            r"\bhope\w*\b",
            r"\bconfid\w*\b",
        ],
        base_keywords: &["faith", "believe", "trust"],
    },
    ThemeSpec {
        name: "holiness",
        patterns: &[
            r"\bholy\b",
            r"\bsacred\b",
            r"\bpure\b",
            r"\brighteous\b",
            r"\bsanctif\w*\b",
            r"\bconsecrat\w*\b",
            r"\bdivine\b",
        ],
        base_keywords: &["holy", "sacred", "pure", "righteous"],
    },
    ThemeSpec {
        name: "wisdom",
        patterns: &[
            r"\bwis\w*\b",
            r"\bunderstand\w*\b",
            r"\bknowledg\w*\b",
            r"\bdiscern\w*\b",
            r"\binsight\b",
            r"\bintellig\w*\b",
        ],
        base_keywords: &["wise", "wisdom", "understanding"],
    },
    ThemeSpec {
        name: "justice",
        patterns: &[
            r"\bjust\w*\b",
            r"\brighteous\b",
            r"\bjudg\w*\b",
            r"\bfair\w*\b",
            r"\bequit\w*\b",
            r"\blaw\w*\b",
            r"\bvindicat\w*\b",
        ],
        base_keywords: &["justice", "righteous", "judge"],
    },
];

static COMPILED_THEMES: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    THEME_SPECS
        .iter()
        .map(|spec| {
            let regexes = spec
                .patterns
                .iter()
                .map(|p| Regex::new(p).expect("static theme pattern"))
                .collect();
            (spec.name, regexes)
        })
        .collect()
});

/// Theme detection over regex pattern lists plus synonym-dictionary matches.
pub fn thematic_extraction(passage: &Passage) -> AnalysisOutput {
    let text_lower = passage.text_lower();
    let dictionary = SynonymDictionary::global();

    let mut detected_themes: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    let mut synonym_matches: BTreeMap<&str, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    let mut total_matches = 0usize;

    for (spec, (name, regexes)) in THEME_SPECS.iter().zip(COMPILED_THEMES.iter()) {
        let mut matches: Vec<String> = Vec::new();
        for regex in regexes {
            for found in regex.find_iter(text_lower) {
                matches.push(found.as_str().to_string());
            }
        }

        let mut theme_keywords: Vec<String> = vec![name.to_string()];
        theme_keywords.extend(spec.base_keywords.iter().map(|k| k.to_string()));

        let theme_synonyms = dictionary.find_matches(text_lower, &theme_keywords);
        for forms in theme_synonyms.values() {
            matches.extend(forms.iter().cloned());
        }
        synonym_matches.insert(*name, theme_synonyms);

        // Dedup preserving first-seen order.
        let mut unique: Vec<String> = Vec::new();
        for m in matches {
            if !unique.contains(&m) {
                unique.push(m);
            }
        }

        if !unique.is_empty() {
            total_matches += unique.len();
            detected_themes.insert(*name, unique);
        }
    }

    let mut ranked: Vec<(&str, usize)> = detected_themes
        .iter()
        .map(|(name, matches)| (*name, matches.len()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let dominant_themes: Vec<String> = ranked
        .into_iter()
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect();

    let theme_density = ratio(total_matches, passage.word_count());
    let themes_with_synonyms = synonym_matches.values().filter(|m| !m.is_empty()).count();

    let mut findings = Findings::new();
    findings.insert("detected_themes", json!(&detected_themes));
    findings.insert("theme_count", json!(detected_themes.len()));
    findings.insert("total_theme_matches", json!(total_matches));
    findings.insert("dominant_themes", json!(&dominant_themes));
    findings.insert("theme_density", json!(round4(theme_density)));
    findings.insert("synonym_matches", json!(&synonym_matches));

    let insights = vec![
        format!(
            "Detected {} theological themes using regex and synonym matching",
            detected_themes.len()
        ),
        format!("Dominant themes: {}", dominant_themes.join(", ")),
        format!("Theme density: {theme_density:.3} matches per word"),
        format!("Synonym-enhanced matching found additional connections in {themes_with_synonyms} themes"),
    ];

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.95,
        links: Vec::new(),
    }
}
