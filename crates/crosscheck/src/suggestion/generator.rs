//! Nearest-match ranking of reference keys.

use crate::validation::{CompositeKey, Issue, IssueKind, ReferenceKeyIndex};

use super::{RankedCandidate, Suggestion};

/// Most candidates kept per invalid row.
pub const MAX_CANDIDATES: usize = 3;

const EXACT_SCORE: u8 = 3;
const SUBSTRING_SCORE: u8 = 2;

/// Score one field: 3 for a case-insensitive exact match, 2 if either value
/// contains the other, otherwise 0. Values are trimmed first.
pub fn field_score(invalid: &str, candidate: &str) -> u8 {
    let invalid = invalid.trim().to_lowercase();
    let candidate = candidate.trim().to_lowercase();

    if invalid == candidate {
        EXACT_SCORE
    } else if candidate.contains(&invalid) || invalid.contains(&candidate) {
        SUBSTRING_SCORE
    } else {
        0
    }
}

/// Sum of the positional field scores (Topic/Topic, Subtopic/Subtopic,
/// Industry/Industry). Ranges 0..=9.
pub fn score_candidate(invalid: &CompositeKey, candidate: &CompositeKey) -> u8 {
    invalid
        .parts()
        .iter()
        .zip(candidate.parts().iter())
        .map(|(i, c)| field_score(i, c))
        .sum()
}

/// Produces ranked corrections for `invalid_combination` errors.
pub struct SuggestionEngine;

impl SuggestionEngine {
    /// One suggestion per `invalid_combination` issue, in issue order.
    ///
    /// Other issue kinds are ignored. An empty index yields suggestions
    /// with no candidates.
    pub fn suggest(errors: &[Issue], index: &ReferenceKeyIndex) -> Vec<Suggestion> {
        let suggestions: Vec<Suggestion> = errors
            .iter()
            .filter(|e| e.kind == IssueKind::InvalidCombination)
            .filter_map(|e| {
                let key = e.key.as_ref()?;
                Some(Suggestion {
                    for_row_number: e.row_number,
                    invalid_key: key.clone(),
                    ranked: Self::rank(key, index),
                })
            })
            .collect();

        tracing::debug!(
            suggestions = suggestions.len(),
            index_size = index.len(),
            "generated corrections"
        );

        suggestions
    }

    /// Top candidates for a single key, best first.
    ///
    /// Zero scores are dropped. The sort is stable, so equal scores keep the
    /// index's insertion order.
    pub fn rank(invalid: &CompositeKey, index: &ReferenceKeyIndex) -> Vec<RankedCandidate> {
        let mut matches: Vec<RankedCandidate> = index
            .iter()
            .map(|candidate| RankedCandidate {
                candidate: candidate.clone(),
                score: score_candidate(invalid, candidate),
            })
            .filter(|m| m.score > 0)
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(MAX_CANDIDATES);
        matches
    }
}
