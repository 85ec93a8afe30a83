//! Archive entry name repair and filesystem-safe output names
//!
//! Cross-platform archive producers routinely store entry names in the
//! wrong encoding (GBK or Big5 bytes labelled as anything at all). Repair is
//! best-effort and never fails: the worst case degrades to a generic
//! placeholder, and the fingerprint suffix keeps the final name unique and
//! traceable regardless.

use csvpool_common::fingerprint::short_fingerprint;
use encoding_rs::{Encoding, BIG5, GBK, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a sanitized name stem
pub const MAX_NAME_LEN: usize = 120;

/// Placeholder stem used when a name sanitizes away to nothing
pub const FALLBACK_STEM: &str = "file";

static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("hard-coded regex"));

/// Result of repairing a raw archive entry name.
///
/// Both forms are preserved for the `orig_zip_name` / `fixed_zip_name`
/// audit columns of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairedName {
    /// Lossy rendering of the bytes as stored in the archive
    pub original: String,

    /// Best decoding found
    pub fixed: String,

    /// True when the fixed form still contains replacement characters
    pub degraded: bool,
}

/// Repair a raw archive entry name into valid text.
///
/// Valid UTF-8 is accepted as-is. Otherwise the raw bytes are decoded
/// against a list of candidate encodings and the decode with the fewest
/// replacement characters wins, with lossy UTF-8 as the floor. Never fails.
pub fn repair_entry_name(raw: &[u8]) -> RepairedName {
    if let Ok(name) = std::str::from_utf8(raw) {
        return RepairedName {
            original: name.to_string(),
            fixed: name.to_string(),
            degraded: false,
        };
    }

    let original = String::from_utf8_lossy(raw).into_owned();

    const CANDIDATES: [&Encoding; 3] = [UTF_8, GBK, BIG5];

    let mut best = original.clone();
    let mut best_score = replacement_count(&best);

    for encoding in CANDIDATES {
        let (decoded, _, _) = encoding.decode(raw);
        let score = replacement_count(&decoded);
        if score < best_score {
            best = decoded.into_owned();
            best_score = score;
        }
    }

    RepairedName {
        original,
        fixed: best,
        degraded: best_score > 0,
    }
}

fn replacement_count(s: &str) -> usize {
    s.chars().filter(|&c| c == '\u{FFFD}').count()
}

/// Restrict a name to filesystem-safe characters.
///
/// Anything outside `[0-9A-Za-z._-]` becomes an underscore; underscore runs
/// collapse; the result is trimmed and truncated to `max_len`. An empty
/// result degrades to [`FALLBACK_STEM`].
pub fn sanitize_filename(name: &str, max_len: usize) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let collapsed = UNDERSCORE_RUNS.replace_all(&mapped, "_");
    let mut trimmed = collapsed.trim_matches(|c| matches!(c, '_' | '.')).to_string();
    trimmed.truncate(max_len);

    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed
    }
}

/// Build the final pool filename for a candidate.
///
/// The stem comes from the sanitized name signature; the short fingerprint
/// suffix guarantees uniqueness even when two datasets independently
/// produce colliding stems.
pub fn output_name(stem: &str, fingerprint: &str) -> String {
    format!(
        "{}_{}.csv",
        sanitize_filename(stem, MAX_NAME_LEN),
        short_fingerprint(fingerprint)
    )
}
