//! Genre classification over eight fixed literary genres, scored by
//! weighted indicator hit-rates plus genre-specific heuristics drawn from
//! the dimension analyzers.

use crate::analyzers::{
    christological_analysis, contains_term, eschatological_analysis, ethical_analysis,
    literary_analysis, structural_analysis, temporal_analysis,
};
use crate::config;
use crate::core::Passage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

struct GenreProfile {
    name: &'static str,
    description: &'static str,
    key_features: &'static [&'static str],
    indicators: &'static [(&'static str, &'static [&'static str])],
}

/// Profiles are scored in this order; later bonus heuristics may read the
/// scores of earlier genres (gospel reads narrative).
static GENRE_PROFILES: &[GenreProfile] = &[
    GenreProfile {
        name: "narrative",
        description: "Story-like passages with chronological sequence",
        key_features: &["past_tense", "sequence_words", "character_actions", "plot_elements"],
        indicators: &[
            ("tense_markers", &["was", "were", "had", "did", "came", "went", "said", "told"]),
            ("sequence_words", &["then", "after", "before", "when", "next", "afterward"]),
            ("narrative_verbs", &["went", "came", "said", "saw", "heard", "told", "asked"]),
            ("character_indicators", &["he", "she", "they", "man", "woman", "people", "crowd"]),
        ],
    },
    GenreProfile {
        name: "poetry",
        description: "Poetic passages with parallelism and imagery",
        key_features: &["parallelism", "imagery", "rhythm", "metaphor"],
        indicators: &[
            ("parallel_structures", &["and", "but", "yet", "or", "nor", "for", "so"]),
            ("imagery_words", &["like", "as", "heart", "soul", "spirit", "voice", "cry"]),
            ("poetic_devices", &["metaphor", "simile", "personification", "symbol"]),
            ("rhythm_indicators", &["repetition", "pattern", "structure", "form"]),
        ],
    },
    GenreProfile {
        name: "prophecy",
        description: "Prophetic utterances with future orientation",
        key_features: &["future_tense", "judgment_themes", "divine_speech", "warning"],
        indicators: &[
            ("future_markers", &["will", "shall", "come", "arise", "establish", "destroy"]),
            ("prophetic_formulas", &["thus says", "hear the word", "oracle", "vision"]),
            ("judgment_words", &["judgment", "wrath", "punishment", "destruction", "repent"]),
            ("divine_speech", &["says the lord", "declares the lord", "word of the lord"]),
        ],
    },
    GenreProfile {
        name: "wisdom",
        description: "Wisdom literature with proverbs and instruction",
        key_features: &["instruction", "proverbs", "moral_teaching", "practical_advice"],
        indicators: &[
            ("wisdom_terms", &["wise", "wisdom", "understanding", "knowledge", "instruction"]),
            ("proverb_markers", &["whoever", "blessed is", "cursed is", "better to"]),
            ("instruction_words", &["listen", "hear", "pay attention", "learn", "teach"]),
            ("moral_terms", &["righteous", "wicked", "fool", "wise man", "foolish"]),
        ],
    },
    GenreProfile {
        name: "gospel",
        description: "Gospel narratives about Jesus' life and teachings",
        key_features: &["jesus_focus", "miracles", "teachings", "disciples"],
        indicators: &[
            ("jesus_titles", &["jesus", "christ", "son of man", "son of god", "master", "teacher"]),
            ("gospel_events", &["miracle", "healing", "teaching", "parable", "crucifixion"]),
            ("disciples", &["peter", "john", "james", "andrew", "philip", "bartholomew"]),
            ("gospel_locations", &["galilee", "jerusalem", "jordan", "sea of galilee", "synagogue"]),
        ],
    },
    GenreProfile {
        name: "epistle",
        description: "Letters with greetings, instruction, and exhortation",
        key_features: &["epistolary_form", "greetings", "exhortation", "church_focus"],
        indicators: &[
            ("epistolary_markers", &["grace", "peace", "brethren", "saints", "beloved"]),
            ("greetings", &["greetings", "grace to you", "mercy", "peace be with you"]),
            ("exhortation", &["therefore", "so then", "now", "finally", "brothers"]),
            ("church_terms", &["church", "assembly", "congregation", "fellowship", "ministry"]),
        ],
    },
    GenreProfile {
        name: "apocalyptic",
        description: "Apocalyptic literature with symbolic visions",
        key_features: &["symbolism", "visions", "cosmic_events", "end_times"],
        indicators: &[
            ("apocalyptic_symbols", &["beast", "dragon", "throne", "crown", "scroll", "seal"]),
            ("vision_language", &["saw", "beheld", "vision", "dream", "revelation", "appeared"]),
            ("cosmic_events", &["heaven", "earth", "stars", "angels", "thunder", "lightning"]),
            ("end_times", &["end", "last", "final", "eternal", "judgment", "kingdom"]),
        ],
    },
    GenreProfile {
        name: "historical",
        description: "Historical accounts and chronicles",
        key_features: &["historical_figures", "chronology", "events", "genealogies"],
        indicators: &[
            ("historical_figures", &["king", "queen", "priest", "prophet", "judge", "ruler"]),
            ("chronological_terms", &["year", "month", "day", "reign", "generation", "age"]),
            ("historical_events", &["war", "battle", "conquest", "building", "temple", "palace"]),
            ("genealogical_terms", &["son of", "father of", "begot", "descendants", "lineage"]),
        ],
    },
];

/// Result of classifying one passage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenreClassification {
    pub primary_genre: String,
    pub secondary_genres: Vec<String>,
    pub confidence_scores: BTreeMap<String, f64>,
    pub detection_features: BTreeMap<String, BTreeMap<String, usize>>,
    pub primary_features: Vec<String>,
    pub genre_description: String,
}

#[derive(Debug, Default)]
pub struct GenreDetector;

impl GenreDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify a passage. The primary genre is always one of the eight
    /// profiles; secondary genres never include the primary.
    pub fn classify(&self, passage: &Passage) -> GenreClassification {
        let temporal = temporal_analysis(passage);
        let structural = structural_analysis(passage);

        let mut confidence_scores: BTreeMap<String, f64> = BTreeMap::new();
        let mut detection_features = BTreeMap::new();

        for profile in GENRE_PROFILES {
            let mut score = 0.0;
            let mut features: BTreeMap<String, usize> = BTreeMap::new();

            for (indicator_type, indicators) in profile.indicators {
                let matches = indicators
                    .iter()
                    .filter(|i| contains_term(passage, i))
                    .count();

                let weight = match *indicator_type {
                    "tense_markers" if matches!(profile.name, "narrative" | "historical") => 1.5,
                    "future_markers" if profile.name == "prophecy" => 1.5,
                    "jesus_titles" if profile.name == "gospel" => 2.0,
                    "jesus_titles" => 0.5,
                    _ => 1.0,
                };

                score += matches as f64 / indicators.len() as f64 * weight;
                features.insert(indicator_type.to_string(), matches);
            }

            score += genre_bonus(profile.name, passage, &temporal, &structural, &confidence_scores);

            confidence_scores.insert(profile.name.to_string(), (score / 3.0).min(1.0));
            detection_features.insert(profile.name.to_string(), features);
        }

        // Strict argmax in profile order; first greatest wins.
        let mut primary = GENRE_PROFILES[0].name;
        let mut best = f64::MIN;
        for profile in GENRE_PROFILES {
            let score = confidence_scores[profile.name];
            if score > best {
                best = score;
                primary = profile.name;
            }
        }

        let threshold = config::get().thresholds.secondary_genre;
        let mut ranked: Vec<(&str, f64)> = confidence_scores
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let secondary_genres: Vec<String> = ranked
            .into_iter()
            .filter(|(name, score)| *name != primary && *score > threshold)
            .take(2)
            .map(|(name, _)| name.to_string())
            .collect();

        let profile = GENRE_PROFILES
            .iter()
            .find(|p| p.name == primary)
            .unwrap_or(&GENRE_PROFILES[0]);

        GenreClassification {
            primary_genre: primary.to_string(),
            secondary_genres,
            confidence_scores,
            detection_features,
            primary_features: profile.key_features.iter().map(|f| f.to_string()).collect(),
            genre_description: profile.description.to_string(),
        }
    }
}

fn tense_ratio(temporal: &crate::core::AnalysisOutput, tense: &str) -> f64 {
    let total = ["past", "present", "future"]
        .iter()
        .map(|t| temporal.findings.f64_or(&format!("tense_distribution.{t}"), 0.0))
        .sum::<f64>();
    if total == 0.0 {
        0.0
    } else {
        temporal
            .findings
            .f64_or(&format!("tense_distribution.{tense}"), 0.0)
            / total
    }
}

fn genre_bonus(
    genre: &str,
    passage: &Passage,
    temporal: &crate::core::AnalysisOutput,
    structural: &crate::core::AnalysisOutput,
    scores_so_far: &BTreeMap<String, f64>,
) -> f64 {
    let word_count = passage.word_count().max(1) as f64;

    match genre {
        "narrative" => {
            let past_ratio = tense_ratio(temporal, "past");
            let repetition_total: usize = structural
                .findings
                .get("word_repetitions")
                .and_then(|v| v.as_object())
                .map(|o| o.values().filter_map(|v| v.as_u64()).sum::<u64>() as usize)
                .unwrap_or(0);
            let sequence_ratio = repetition_total as f64 / word_count;
            (past_ratio + sequence_ratio) * 0.5
        }
        "poetry" => {
            let literary = literary_analysis(passage);
            let parallelism = literary
                .findings
                .get("repetition_patterns")
                .and_then(|v| v.as_object())
                .map(|o| o.len())
                .unwrap_or(0) as f64
                / word_count;
            let imagery = literary
                .findings
                .array_of("imagery_senses")
                .map(|a| a.len())
                .unwrap_or(0) as f64
                / 5.0;
            (parallelism + imagery) * 0.8
        }
        "prophecy" => {
            let future_ratio = tense_ratio(temporal, "future");
            let eschatological = eschatological_analysis(passage);
            let judgment_density = eschatological
                .findings
                .f64_or("eschatological_density", 0.0);
            (future_ratio + judgment_density) * 1.2
        }
        "wisdom" => {
            let ethical = ethical_analysis(passage);
            let imperative_density =
                ethical.findings.usize_or("imperative_count", 0) as f64 / word_count;
            let virtue_density = ethical.findings.usize_or("virtue_count", 0) as f64 / word_count;
            (imperative_density + virtue_density) * 1.5
        }
        "gospel" => {
            let christological = christological_analysis(passage);
            let jesus_density = christological
                .findings
                .f64_or("christological_density", 0.0);
            let narrative_influence = scores_so_far.get("narrative").copied().unwrap_or(0.0) * 0.3;
            (jesus_density + narrative_influence) * 1.8
        }
        "epistle" => {
            let markers = ["grace", "peace", "brethren", "therefore"]
                .iter()
                .filter(|m| contains_term(passage, m))
                .count();
            markers as f64 / word_count * 2.0
        }
        "apocalyptic" => {
            let symbols = ["beast", "throne", "scroll", "heaven", "earth"]
                .iter()
                .filter(|s| contains_term(passage, s))
                .count();
            symbols as f64 / word_count * 2.5
        }
        "historical" => {
            let historical = crate::analyzers::historical_analysis(passage);
            let density = historical.findings.f64_or("historical_density", 0.0);
            let chronology =
                temporal.findings.usize_or("sequence_indicators", 0) as f64 / word_count;
            (density + chronology) * 1.3
        }
        _ => 0.0,
    }
}
