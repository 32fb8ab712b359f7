use std::io::Write;
use versemap::validation::{CmpOp, Condition, Severity, ValidationEngine, ValidationRule};
use versemap::{AlgorithmRegistry, Dimension, MultiDimensionalAnalyzer, Passage};

fn analyze(reference: &str, text: &str) -> versemap::MultiDimensionalResult {
    let registry = AlgorithmRegistry::with_builtins();
    MultiDimensionalAnalyzer::new(&registry).analyze(&Passage::new(reference, text))
}

#[test]
fn default_rules_pass_on_the_john_prologue() {
    let engine = ValidationEngine::with_default_rules();
    let result = analyze(
        "John 1:1",
        "In the beginning was the Word, and the Word was with God, and the Word was God.",
    );
    let report = engine.validate(&result);
    assert!(
        !report
            .issues
            .iter()
            .any(|i| i.rule == "john_1_1_christological_check"),
        "the prologue must not trip the zero-density check"
    );
}

#[test]
fn christological_check_fires_when_density_is_zero() {
    // Run John 1:1 with only the lexical analyzer so christological
    // findings are absent and read as zero.
    let mut registry = AlgorithmRegistry::new();
    registry.register_algorithm(
        "lexical_analysis",
        versemap::analyzers::lexical_analysis,
        "lexical",
        "",
        vec![],
    );
    let result = MultiDimensionalAnalyzer::new(&registry).analyze(&Passage::new(
        "John 1:1",
        "In the beginning was the Word.",
    ));

    let engine = ValidationEngine::with_default_rules();
    let report = engine.validate(&result);
    assert!(report
        .issues
        .iter()
        .any(|i| i.rule == "john_1_1_christological_check"));
}

#[test]
fn rule_management_adds_and_removes() {
    let mut engine = ValidationEngine::with_default_rules();
    let initial = engine.rule_count();

    engine.add_rule(ValidationRule {
        name: "extra".to_string(),
        description: "extra rule".to_string(),
        condition: Condition::DimensionPresent {
            dimension: Dimension::Lexical,
        },
        severity: Severity::Low,
        category: "test".to_string(),
        enabled: true,
        message: String::new(),
        suggested_fix: String::new(),
    });
    assert_eq!(engine.rule_count(), initial + 1);

    engine.remove_rule("extra");
    assert_eq!(engine.rule_count(), initial);
    assert!(engine.rule("extra").is_none());
}

#[test]
fn rules_load_from_a_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{
            "rules": [
                {{
                    "name": "short_passage",
                    "description": "flags passages under five words",
                    "condition": {{
                        "type": "numeric_finding",
                        "dimension": "lexical",
                        "field": "word_count",
                        "op": "lt",
                        "value": 5.0
                    }},
                    "severity": "low",
                    "category": "length"
                }}
            ]
        }}"#
    )
    .expect("write rules");

    let mut engine = ValidationEngine::new();
    let loaded = engine
        .load_rules_from_file(file.path())
        .expect("rules load");
    assert_eq!(loaded, 1);

    let result = analyze("Test 1:1", "two words");
    let report = engine.validate(&result);
    assert!(!report.passed);
    assert_eq!(report.issues[0].rule, "short_passage");
    assert_eq!(report.issues[0].severity, Severity::Low);
}

#[test]
fn malformed_rules_file_is_a_typed_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "not json at all").expect("write");

    let mut engine = ValidationEngine::new();
    let error = engine
        .load_rules_from_file(file.path())
        .expect_err("must fail");
    assert!(error.to_string().contains("invalid JSON"));
}

#[test]
fn combinators_compose() {
    let result = analyze(
        "John 1:1",
        "In the beginning was the Word, and the Word was with God, and the Word was God.",
    );

    let condition = Condition::All {
        conditions: vec![
            Condition::TextContains {
                needle: "beginning".to_string(),
            },
            Condition::Any {
                conditions: vec![
                    Condition::ReferenceIs {
                        reference: "Nowhere 0:0".to_string(),
                    },
                    Condition::NumericFinding {
                        dimension: Dimension::Christological,
                        field: "christological_density".to_string(),
                        op: CmpOp::Gt,
                        value: 0.0,
                    },
                ],
            },
            Condition::Not {
                condition: Box::new(Condition::DimensionPresent {
                    dimension: Dimension::Lexical,
                }),
            },
        ],
    };
    // First two clauses hold, the negated third does not.
    assert!(!condition.evaluate(&result));
}
