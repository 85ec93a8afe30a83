//! Content fingerprinting for file deduplication
//!
//! A fingerprint is the MD5 digest of a file's bytes, rendered as a
//! lowercase hex string. Digest equality is the only basis for identity in
//! the pool; filenames are never compared.

use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Number of hex characters used when a fingerprint is embedded in a filename
pub const SHORT_FINGERPRINT_LEN: usize = 10;

/// Compute the fingerprint of a file on disk
pub fn fingerprint_file(path: impl AsRef<Path>) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    compute_fingerprint(&mut file)
}

/// Compute the fingerprint of any readable source
///
/// Reads in bounded chunks so memory use is independent of input size.
pub fn compute_fingerprint<R: Read>(reader: &mut R) -> Result<String> {
    let mut context = md5::Context::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        context.consume(&buffer[..bytes_read]);
    }

    Ok(hex::encode(context.compute().0))
}

/// Short form of a fingerprint, suitable as a filename suffix
pub fn short_fingerprint(digest: &str) -> &str {
    &digest[..digest.len().min(SHORT_FINGERPRINT_LEN)]
}
