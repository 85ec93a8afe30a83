//! Diversity-first dataset selection
//!
//! Given the admission-eligible candidates of one dataset (in extraction
//! order) and a budget K, pick the subset to commit. The greedy round-robin
//! maximizes the number of distinct table-name signatures represented
//! before any signature repeats: one file per signature group per round,
//! groups ordered by first appearance, until K files are chosen or all
//! groups run dry. Later rounds fill the remaining slots with repeats.

use crate::types::CandidateFile;
use std::collections::VecDeque;

/// Choose up to `budget` candidates, diversity first.
///
/// Returns indices into `candidates`, in pick order. Selection is a pure
/// function over one dataset's candidates; commitment (fingerprint insertion
/// and ledger append) happens separately in [`crate::pool`].
pub fn select_diverse(candidates: &[CandidateFile], budget: usize) -> Vec<usize> {
    if budget == 0 || candidates.is_empty() {
        return Vec::new();
    }

    // Signature groups in first-appearance order, original order within
    let mut groups: Vec<(&str, VecDeque<usize>)> = Vec::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        let signature = candidate.name_signature.as_str();
        match groups.iter_mut().find(|(sig, _)| *sig == signature) {
            Some((_, members)) => members.push_back(idx),
            None => groups.push((signature, VecDeque::from([idx]))),
        }
    }

    let mut chosen = Vec::with_capacity(budget.min(candidates.len()));
    while chosen.len() < budget {
        let mut picked_any = false;
        for (_, members) in groups.iter_mut() {
            if chosen.len() >= budget {
                break;
            }
            if let Some(idx) = members.pop_front() {
                chosen.push(idx);
                picked_any = true;
            }
        }
        if !picked_any {
            break;
        }
    }

    chosen
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidates_with_signatures(signatures: &[&str]) -> Vec<CandidateFile> {
        signatures
            .iter()
            .enumerate()
            .map(|(i, sig)| CandidateFile {
                path: PathBuf::from(format!("/tmp/{}_{}.csv", sig, i)),
                original_name: format!("{}_{}.csv", sig, i),
                repaired_name: format!("{}_{}.csv", sig, i),
                degraded: false,
                name_signature: sig.to_string(),
                rows: 1000,
                cols: 5,
                size_bytes: 2048,
                fingerprint: format!("{:032x}", i),
            })
            .collect()
    }

    fn selected_signatures(signatures: &[&str], budget: usize) -> Vec<String> {
        let candidates = candidates_with_signatures(signatures);
        select_diverse(&candidates, budget)
            .into_iter()
            .map(|idx| candidates[idx].name_signature.clone())
            .collect()
    }

    #[test]
    fn test_one_per_signature_before_repeats() {
        assert_eq!(
            selected_signatures(&["a", "a", "a", "b", "c"], 3),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_repeats_fill_after_diversity_exhausted() {
        assert_eq!(selected_signatures(&["a", "a", "a"], 3), vec!["a", "a", "a"]);
    }

    #[test]
    fn test_six_file_scenario() {
        assert_eq!(
            selected_signatures(&["train", "train", "train", "test", "test", "val"], 5),
            vec!["train", "test", "val", "train", "test"]
        );
    }

    #[test]
    fn test_within_group_original_order() {
        let candidates = candidates_with_signatures(&["a", "a", "b"]);
        let picks = select_diverse(&candidates, 3);
        // a#0, b#2, then the second round takes a#1
        assert_eq!(picks, vec![0, 2, 1]);
    }

    #[test]
    fn test_budget_larger_than_candidates() {
        assert_eq!(selected_signatures(&["a", "b"], 5), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_budget_and_empty_input() {
        assert!(selected_signatures(&["a", "b"], 0).is_empty());
        assert!(select_diverse(&[], 5).is_empty());
    }
}
