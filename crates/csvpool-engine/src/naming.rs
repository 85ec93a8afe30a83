//! Table-name signatures
//!
//! A signature approximates "which logical table this file represents"
//! using nothing but the filename: split files like `train_1.csv` and
//! `train_2.csv` share the signature `train`. It is a lossy heuristic, used
//! only as the diversity key during selection, never for identity.

use regex::Regex;
use std::sync::LazyLock;

static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_\-]*\d+$").expect("hard-coded regex"));

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_\-]+").expect("hard-coded regex"));

/// Derive the normalized signature of a filename.
///
/// Strips any path prefix and extension, lowercases, removes one trailing
/// run of digits together with the separator run preceding it, and collapses
/// the remaining separator runs to single underscores.
pub fn name_signature(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let stem = match base.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => base,
    };

    let lowered = stem.to_lowercase();
    let trimmed = TRAILING_DIGITS.replace(&lowered, "");
    let collapsed = SEPARATOR_RUNS.replace_all(trimmed.trim(), "_");

    collapsed.trim_matches('_').to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_suffixes_share_signature() {
        assert_eq!(name_signature("train_1.csv"), "train");
        assert_eq!(name_signature("train_2.csv"), "train");
        assert_eq!(name_signature("TRAIN_003.csv"), "train");
    }

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(name_signature("test.csv"), "test");
        assert_eq!(name_signature("val.csv"), "val");
    }

    #[test]
    fn test_path_and_case_stripped() {
        assert_eq!(name_signature("data/raw/Sales Report 2021.csv"), "sales_report");
        assert_eq!(name_signature(r"archive\Train-07.csv"), "train");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(name_signature("city  -  population.csv"), "city_population");
        assert_eq!(name_signature("a__b--c.csv"), "a_b_c");
    }

    #[test]
    fn test_digits_only_stem() {
        assert_eq!(name_signature("20240101.csv"), "");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(name_signature("summary"), "summary");
    }

    #[test]
    fn test_internal_digits_kept() {
        // Only a trailing run is stripped; digits elsewhere are meaningful
        assert_eq!(name_signature("top100_movies.csv"), "top100_movies");
    }
}
