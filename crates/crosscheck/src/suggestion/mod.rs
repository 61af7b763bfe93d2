//! Ranked corrections for fact rows whose key is not in the reference set.
//!
//! Scoring is a per-field exact/substring match summed over the three key
//! parts. Scores are shown to users as-is, so the rule is fixed:
//! 3 for an exact (case-insensitive) match, 2 when one value contains the
//! other, 0 otherwise.

mod generator;
mod suggestion;

pub use generator::{field_score, score_candidate, SuggestionEngine, MAX_CANDIDATES};
pub use suggestion::{RankedCandidate, Suggestion};
