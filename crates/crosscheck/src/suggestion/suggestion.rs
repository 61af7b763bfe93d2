//! Suggestion types for proposed key corrections.

use serde::{Deserialize, Serialize};

use crate::validation::CompositeKey;

/// One candidate replacement key and how well it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "combination")]
    pub candidate: CompositeKey,
    /// Sum of the three field scores, 1..=9.
    pub score: u8,
}

/// Proposed corrections for one invalid fact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// 1-based row number of the fact row.
    #[serde(rename = "row")]
    pub for_row_number: usize,
    /// The key that was not found.
    #[serde(rename = "invalid")]
    pub invalid_key: CompositeKey,
    /// Best candidates first; at most three.
    #[serde(rename = "suggestions")]
    pub ranked: Vec<RankedCandidate>,
}

impl Suggestion {
    /// Highest-scoring candidate, if any scored above zero.
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_wire_names() {
        let suggestion = Suggestion {
            for_row_number: 4,
            invalid_key: CompositeKey::new("Compliancee", "Audit Findings", "General"),
            ranked: vec![RankedCandidate {
                candidate: CompositeKey::new("Compliance", "Audit Findings", "General"),
                score: 8,
            }],
        };

        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["row"], 4);
        assert_eq!(json["invalid"]["Topic"], "Compliancee");
        assert_eq!(json["suggestions"][0]["combination"]["Topic"], "Compliance");
        assert_eq!(json["suggestions"][0]["score"], 8);
        assert_eq!(suggestion.best().map(|c| c.score), Some(8));
    }
}
