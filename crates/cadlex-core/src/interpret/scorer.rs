//! Confidence scoring

/// Weight of the classifier's match strength
pub const MATCH_WEIGHT: f64 = 0.6;
/// Weight of the extractor's coverage ratio
pub const COVERAGE_WEIGHT: f64 = 0.4;
/// Subtracted when the classifier reported a tie
pub const AMBIGUITY_PENALTY: f64 = 0.2;

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// `clamp(0.6 * m + 0.4 * c - p, 0, 1)`; non-finite inputs count as 0
pub fn score(match_strength: f64, coverage: f64, ambiguity_penalty: f64) -> f64 {
    let raw = MATCH_WEIGHT * finite_or_zero(match_strength)
        + COVERAGE_WEIGHT * finite_or_zero(coverage)
        - finite_or_zero(ambiguity_penalty);
    raw.clamp(0.0, 1.0)
}
