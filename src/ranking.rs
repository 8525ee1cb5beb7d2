use std::cmp::Ordering;

use crate::data_models::ScoredCandidate;

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| match (a.similarity, b.similarity) {
        (Some(sa), Some(sb)) => sb.total_cmp(&sa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Sorts by score descending, then similarity descending.
/// `sort_by` is stable, so equal pairs keep retrieval order.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(compare);
    scored
}
