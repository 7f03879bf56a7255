//! Bounded reads of referenced files.
//!
//! A referenced file is read once, up to a byte cap. Anything past the cap is
//! dropped without an error: the cap bounds memory for values that are
//! expected to be small (passwords, tokens, short keys). A short file is not
//! an error either.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Cause;

/// Read at most `max_bytes` from `path`.
///
/// With `trim`, leading and trailing whitespace (including trailing
/// newlines) is removed. Bytes that are not valid UTF-8, such as a
/// multi-byte character cut in half by the cap, are replaced with U+FFFD.
pub fn read_bounded(path: &Path, max_bytes: usize, trim: bool) -> Result<String, Cause> {
    let file = File::open(path).map_err(Cause::OpenFailed)?;

    let mut content = Vec::with_capacity(max_bytes.min(8 * 1024));
    file.take(max_bytes as u64)
        .read_to_end(&mut content)
        .map_err(Cause::ReadFailed)?;

    let content = String::from_utf8_lossy(&content);
    if trim {
        Ok(content.trim().to_string())
    } else {
        Ok(content.into_owned())
    }
}
