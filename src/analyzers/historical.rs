use crate::analyzers::{contains_term, ratio, round4};
use crate::config;
use crate::core::{AnalysisOutput, Findings, Passage};
use serde_json::json;

static HISTORICAL_FIGURES: &[&str] = &[
    "abraham", "moses", "david", "solomon", "isaiah", "jeremiah", "paul", "peter", "jesus",
    "john", "mary", "joseph", "adam", "eve", "noah", "jacob", "esau",
];

static PLACES: &[&str] = &[
    "jerusalem", "egypt", "babylon", "rome", "nazareth", "galilee", "judea", "canaan", "sinai",
    "zion", "temple", "synagogue", "jordan",
];

static CULTURAL_PRACTICES: &[&str] = &[
    "sacrifice", "offering", "temple", "synagogue", "festival", "sabbath", "circumcision",
    "baptism", "prayer", "fasting", "tithe", "covenant",
];

static TIME_PERIODS: &[&str] = &[
    "ancient", "days", "generations", "forever", "eternal", "covenant", "beginning", "creation",
    "exodus", "kingdom", "exile", "return",
];

/// Historical and cultural context: figures, places, practices, periods.
pub fn historical_analysis(passage: &Passage) -> AnalysisOutput {
    let figures: Vec<&str> = HISTORICAL_FIGURES
        .iter()
        .filter(|f| contains_term(passage, f))
        .copied()
        .collect();
    let places: Vec<&str> = PLACES
        .iter()
        .filter(|p| contains_term(passage, p))
        .copied()
        .collect();
    let practices: Vec<&str> = CULTURAL_PRACTICES
        .iter()
        .filter(|p| contains_term(passage, p))
        .copied()
        .collect();
    let periods: Vec<&str> = TIME_PERIODS
        .iter()
        .filter(|p| contains_term(passage, p))
        .copied()
        .collect();

    let elements = figures.len() + places.len() + practices.len() + periods.len();
    let density = ratio(elements, passage.word_count());

    let thresholds = &config::get().thresholds;
    let context_type = if density > thresholds.historical_strong {
        "strongly_historical"
    } else if density > thresholds.historical_rooted {
        "historically_rooted"
    } else {
        "timeless_universal"
    };

    let mut findings = Findings::new();
    findings.insert("historical_figures", json!(&figures));
    findings.insert("places_mentioned", json!(&places));
    findings.insert("cultural_practices", json!(&practices));
    findings.insert("time_periods", json!(&periods));
    findings.insert("historical_density", json!(round4(density)));
    findings.insert("context_type", json!(context_type));
    findings.insert("historical_elements_count", json!(elements));

    let insights = vec![
        format!("Historical context: {context_type} (density: {density:.3})"),
        format!(
            "Historical figures: {}, Places: {}",
            figures.len(),
            places.len()
        ),
        format!(
            "Cultural practices: {}, Time periods: {}",
            practices.len(),
            periods.len()
        ),
    ];

    AnalysisOutput {
        findings,
        insights,
        confidence: 0.75,
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_history_is_strongly_historical() {
        let passage = Passage::new(
            "2 Kings 25:1",
            "Moses led the exodus from Egypt; David reigned in Jerusalem near the temple.",
        );
        let output = historical_analysis(&passage);
        assert_eq!(
            output.findings.str_of("context_type"),
            Some("strongly_historical")
        );
        assert!(output.findings.usize_or("historical_elements_count", 0) >= 5);
    }

    #[test]
    fn abstract_text_is_timeless() {
        let output = historical_analysis(&Passage::new("Test 1:1", "love is patient love is kind"));
        assert_eq!(
            output.findings.str_of("context_type"),
            Some("timeless_universal")
        );
    }
}
