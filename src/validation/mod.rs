//! Rule-based validation of analysis results.
//!
//! Rule conditions are data: a tagged-variant predicate tree over named
//! findings fields, combinable with all/any/not. Absent dimensions or
//! fields evaluate as 0.0 for numeric atoms and "" for string atoms, so a
//! rule can probe results defensively without special-casing gaps.

use crate::core::{Dimension, MultiDimensionalResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in rules file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Severity, &str)] = &[
            (Severity::Low, "low"),
            (Severity::Medium, "medium"),
            (Severity::High, "high"),
            (Severity::Critical, "critical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    fn apply(&self, left: f64, right: f64) -> bool {
        match self {
            CmpOp::Eq => left == right,
            CmpOp::Ne => left != right,
            CmpOp::Lt => left < right,
            CmpOp::Le => left <= right,
            CmpOp::Gt => left > right,
            CmpOp::Ge => left >= right,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrOp {
    Is,
    Contains,
}

/// A predicate over one analysis result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    All {
        conditions: Vec<Condition>,
    },
    Any {
        conditions: Vec<Condition>,
    },
    Not {
        condition: Box<Condition>,
    },
    ReferenceIs {
        reference: String,
    },
    TextContains {
        needle: String,
    },
    DimensionPresent {
        dimension: Dimension,
    },
    NumericFinding {
        dimension: Dimension,
        field: String,
        op: CmpOp,
        value: f64,
    },
    StringFinding {
        dimension: Dimension,
        field: String,
        op: StrOp,
        value: String,
    },
    /// Any element of an array finding (or its "reference" member, for
    /// arrays of objects) contains the needle, case-insensitively.
    ArrayFindingContains {
        dimension: Dimension,
        field: String,
        needle: String,
    },
}

impl Condition {
    pub fn evaluate(&self, result: &MultiDimensionalResult) -> bool {
        match self {
            Condition::All { conditions } => conditions.iter().all(|c| c.evaluate(result)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.evaluate(result)),
            Condition::Not { condition } => !condition.evaluate(result),
            Condition::ReferenceIs { reference } => result.passage.reference == *reference,
            Condition::TextContains { needle } => result
                .passage
                .text_lower()
                .contains(&needle.to_lowercase()),
            Condition::DimensionPresent { dimension } => {
                result.dimensions.contains_key(dimension)
            }
            Condition::NumericFinding {
                dimension,
                field,
                op,
                value,
            } => {
                let observed = result
                    .dimensions
                    .get(dimension)
                    .map(|d| d.findings.f64_or(field, 0.0))
                    .unwrap_or(0.0);
                op.apply(observed, *value)
            }
            Condition::StringFinding {
                dimension,
                field,
                op,
                value,
            } => {
                let observed = result
                    .dimensions
                    .get(dimension)
                    .and_then(|d| d.findings.str_of(field))
                    .unwrap_or("");
                match op {
                    StrOp::Is => observed == value,
                    StrOp::Contains => observed.contains(value.as_str()),
                }
            }
            Condition::ArrayFindingContains {
                dimension,
                field,
                needle,
            } => {
                let needle = needle.to_lowercase();
                result
                    .dimensions
                    .get(dimension)
                    .and_then(|d| d.findings.array_of(field))
                    .map(|entries| {
                        entries.iter().any(|entry| {
                            let text = entry
                                .as_str()
                                .or_else(|| entry.get("reference").and_then(Value::as_str))
                                .unwrap_or("");
                            text.to_lowercase().contains(&needle)
                        })
                    })
                    .unwrap_or(false)
            }
        }
    }

    /// Record the observed value of every finding this condition touches,
    /// keyed "dimension.field".
    fn collect_observations(
        &self,
        result: &MultiDimensionalResult,
        observations: &mut BTreeMap<String, Value>,
    ) {
        match self {
            Condition::All { conditions } | Condition::Any { conditions } => {
                for condition in conditions {
                    condition.collect_observations(result, observations);
                }
            }
            Condition::Not { condition } => condition.collect_observations(result, observations),
            Condition::NumericFinding {
                dimension, field, ..
            } => {
                let observed = result
                    .dimensions
                    .get(dimension)
                    .map(|d| d.findings.f64_or(field, 0.0))
                    .unwrap_or(0.0);
                observations.insert(format!("{dimension}.{field}"), Value::from(observed));
            }
            Condition::StringFinding {
                dimension, field, ..
            }
            | Condition::ArrayFindingContains {
                dimension, field, ..
            } => {
                let observed = result
                    .dimensions
                    .get(dimension)
                    .and_then(|d| d.findings.get(field))
                    .cloned()
                    .unwrap_or(Value::Null);
                observations.insert(format!("{dimension}.{field}"), observed);
            }
            _ => {}
        }
    }
}

/// A named validation rule over analysis results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationRule {
    pub name: String,
    pub description: String,
    pub condition: Condition,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub suggested_fix: String,
}

fn default_severity() -> Severity {
    Severity::Medium
}
fn default_category() -> String {
    "general".to_string()
}
fn default_enabled() -> bool {
    true
}

/// One triggered rule, with the observed values its condition referenced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub rule: String,
    pub category: String,
    pub severity: Severity,
    pub message: String,
    pub suggested_fix: String,
    pub observed: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub issues_found: usize,
    pub issues: Vec<ValidationIssue>,
    pub rules_evaluated: usize,
}

#[derive(Deserialize)]
struct RulesFile {
    rules: Vec<ValidationRule>,
}

/// Evaluates registered rules against analysis results.
#[derive(Debug, Default)]
pub struct ValidationEngine {
    rules: BTreeMap<String, ValidationRule>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine preloaded with the built-in consistency rules.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        for rule in default_rules() {
            engine.add_rule(rule);
        }
        engine
    }

    pub fn add_rule(&mut self, rule: ValidationRule) {
        self.rules.insert(rule.name.clone(), rule);
    }

    pub fn remove_rule(&mut self, name: &str) {
        self.rules.remove(name);
    }

    pub fn rule(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.get(name)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Load additional rules from a JSON file.
    pub fn load_rules_from_file(&mut self, path: &Path) -> Result<usize, RuleLoadError> {
        let content = std::fs::read_to_string(path)?;
        let file: RulesFile = serde_json::from_str(&content)?;
        let count = file.rules.len();
        for rule in file.rules {
            self.add_rule(rule);
        }
        Ok(count)
    }

    /// Evaluate every enabled rule against one result.
    pub fn validate(&self, result: &MultiDimensionalResult) -> ValidationReport {
        let mut issues = Vec::new();
        let mut evaluated = 0usize;

        for rule in self.rules.values() {
            if !rule.enabled {
                continue;
            }
            evaluated += 1;

            if rule.condition.evaluate(result) {
                let mut observed = BTreeMap::new();
                rule.condition.collect_observations(result, &mut observed);

                issues.push(ValidationIssue {
                    rule: rule.name.clone(),
                    category: rule.category.clone(),
                    severity: rule.severity,
                    message: if rule.message.is_empty() {
                        rule.description.clone()
                    } else {
                        rule.message.clone()
                    },
                    suggested_fix: rule.suggested_fix.clone(),
                    observed,
                });
            }
        }

        ValidationReport {
            passed: issues.is_empty(),
            issues_found: issues.len(),
            issues,
            rules_evaluated: evaluated,
        }
    }
}

fn default_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule {
            name: "john_1_1_christological_check".to_string(),
            description: "John 1:1 should have high christological content".to_string(),
            condition: Condition::All {
                conditions: vec![
                    Condition::ReferenceIs {
                        reference: "John 1:1".to_string(),
                    },
                    Condition::NumericFinding {
                        dimension: Dimension::Christological,
                        field: "christological_density".to_string(),
                        op: CmpOp::Le,
                        value: 0.0,
                    },
                ],
            },
            severity: Severity::High,
            category: "christological".to_string(),
            enabled: true,
            message: "John 1:1 is highly christological but scored 0 density".to_string(),
            suggested_fix: "Check contextual title detection for 'Word' (Logos)".to_string(),
        },
        ValidationRule {
            name: "beginning_cross_reference_check".to_string(),
            description: "Passages with 'beginning' should reference Genesis 1:1".to_string(),
            condition: Condition::All {
                conditions: vec![
                    Condition::TextContains {
                        needle: "beginning".to_string(),
                    },
                    Condition::Not {
                        condition: Box::new(Condition::ArrayFindingContains {
                            dimension: Dimension::CrossReference,
                            field: "cross_references".to_string(),
                            needle: "genesis".to_string(),
                        }),
                    },
                ],
            },
            severity: Severity::Medium,
            category: "cross_reference".to_string(),
            // Noisy on short passages; off until the echo tables grow.
            enabled: false,
            message: "'beginning' should connect to Genesis 1:1".to_string(),
            suggested_fix: "Add Genesis 1:1 to cross-references for passages mentioning 'beginning'"
                .to_string(),
        },
        ValidationRule {
            name: "lexical_thematic_consistency".to_string(),
            description: "High lexical diversity should correlate with complex themes".to_string(),
            condition: Condition::All {
                conditions: vec![
                    Condition::NumericFinding {
                        dimension: Dimension::Lexical,
                        field: "lexical_diversity".to_string(),
                        op: CmpOp::Gt,
                        value: 0.6,
                    },
                    Condition::NumericFinding {
                        dimension: Dimension::Thematic,
                        field: "theme_count".to_string(),
                        op: CmpOp::Lt,
                        value: 2.0,
                    },
                ],
            },
            severity: Severity::Low,
            category: "consistency".to_string(),
            enabled: true,
            message: "High lexical diversity suggests complex content but few themes detected"
                .to_string(),
            suggested_fix: "Review thematic analysis for additional theme detection".to_string(),
        },
        ValidationRule {
            name: "temporal_eschatological_consistency".to_string(),
            description: "Eschatological content should have future temporal markers".to_string(),
            condition: Condition::All {
                conditions: vec![
                    Condition::NumericFinding {
                        dimension: Dimension::Eschatological,
                        field: "eschatological_density".to_string(),
                        op: CmpOp::Gt,
                        value: 0.01,
                    },
                    Condition::NumericFinding {
                        dimension: Dimension::Temporal,
                        field: "tense_distribution.future".to_string(),
                        op: CmpOp::Eq,
                        value: 0.0,
                    },
                ],
            },
            severity: Severity::Medium,
            category: "temporal".to_string(),
            enabled: true,
            message: "Eschatological content found without future tense markers".to_string(),
            suggested_fix: "Check for future-oriented language in eschatological passages"
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MultiDimensionalAnalyzer;
    use crate::analyzers::AlgorithmRegistry;
    use crate::core::Passage;

    fn analyze(reference: &str, text: &str) -> MultiDimensionalResult {
        let registry = AlgorithmRegistry::with_builtins();
        MultiDimensionalAnalyzer::new(&registry).analyze(&Passage::new(reference, text))
    }

    #[test]
    fn john_prologue_passes_christological_check() {
        let engine = ValidationEngine::with_default_rules();
        let result = analyze(
            "John 1:1",
            "In the beginning was the Word, and the Word was with God, and the Word was God.",
        );
        let report = engine.validate(&result);
        assert!(!report
            .issues
            .iter()
            .any(|i| i.rule == "john_1_1_christological_check"));
    }

    #[test]
    fn disabled_rules_are_not_evaluated() {
        let engine = ValidationEngine::with_default_rules();
        let result = analyze("Test 1:1", "In the beginning was a garden.");
        let report = engine.validate(&result);
        // One of the four default rules ships disabled.
        assert_eq!(report.rules_evaluated, 3);
    }

    #[test]
    fn triggered_rule_reports_observed_values() {
        let mut engine = ValidationEngine::new();
        engine.add_rule(ValidationRule {
            name: "always_low_lexical".to_string(),
            description: "flags any diversity under 2".to_string(),
            condition: Condition::NumericFinding {
                dimension: Dimension::Lexical,
                field: "lexical_diversity".to_string(),
                op: CmpOp::Lt,
                value: 2.0,
            },
            severity: Severity::Low,
            category: "test".to_string(),
            enabled: true,
            message: "diversity below bound".to_string(),
            suggested_fix: String::new(),
        });

        let result = analyze("Test 1:1", "word word word");
        let report = engine.validate(&result);
        assert!(!report.passed);
        assert_eq!(report.issues_found, 1);
        let observed = &report.issues[0].observed;
        assert!(observed.contains_key("lexical.lexical_diversity"));
    }

    #[test]
    fn absent_dimension_evaluates_as_zero() {
        let condition = Condition::NumericFinding {
            dimension: Dimension::Christological,
            field: "christological_density".to_string(),
            op: CmpOp::Le,
            value: 0.0,
        };
        // Only lexical analysis registered, so the christological dimension
        // is absent and the field reads 0.0.
        let mut registry = AlgorithmRegistry::new();
        registry.register_algorithm(
            "lexical_analysis",
            crate::analyzers::lexical_analysis,
            "lexical",
            "",
            vec![],
        );
        let result =
            MultiDimensionalAnalyzer::new(&registry).analyze(&Passage::new("Test 1:1", "hello"));
        assert!(condition.evaluate(&result));
    }

    #[test]
    fn rules_roundtrip_through_json() {
        let rules = default_rules();
        let json = serde_json::to_string(&rules).expect("serialize");
        let parsed: Vec<ValidationRule> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.len(), rules.len());
        assert_eq!(parsed[0].name, rules[0].name);
    }
}
