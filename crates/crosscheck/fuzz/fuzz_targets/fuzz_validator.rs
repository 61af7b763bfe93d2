//! Fuzz target for integrity validation and suggestions.
//!
//! Arbitrary rows must never panic the validator, and the report must stay
//! internally consistent.

#![no_main]

use arbitrary::Arbitrary;
use crosscheck::{IntegrityValidator, Row, SuggestionEngine};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    facts: Vec<(String, String, String, Option<String>)>,
    references: Vec<(String, String, String)>,
}

fuzz_target!(|input: Input| {
    let facts: Vec<Row> = input
        .facts
        .into_iter()
        .map(|(topic, subtopic, industry, tier)| {
            let mut row = Row::new();
            row.insert("Topic".to_string(), topic);
            row.insert("Subtopic".to_string(), subtopic);
            row.insert("Industry".to_string(), industry);
            if let Some(tier) = tier {
                row.insert("Tier".to_string(), tier);
            }
            row
        })
        .collect();
    let references: Vec<Row> = input
        .references
        .into_iter()
        .map(|(topic, subtopic, industry)| {
            let mut row = Row::new();
            row.insert("Topic".to_string(), topic);
            row.insert("SubTopic".to_string(), subtopic);
            row.insert("Industry".to_string(), industry);
            row
        })
        .collect();

    let (report, index) = IntegrityValidator::new().validate_with_index(&facts, &references);
    assert_eq!(report.is_valid, report.errors.is_empty());

    for suggestion in SuggestionEngine::suggest(&report.errors, &index) {
        assert!(suggestion.ranked.len() <= 3);
    }
});
