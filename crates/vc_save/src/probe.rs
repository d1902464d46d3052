//! Classification of files before parsing.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::result::{LoadResult, Rejected};

/// Reads the text of `path`, classifying unusable files.
///
/// The checks run in order: empty path, missing file, zero length, all
/// zero bytes, then UTF-8 decoding. A leading byte order mark is dropped.
pub(crate) fn read_text(path: &Path) -> Result<String, Rejected> {
    if path.as_os_str().is_empty() {
        return Err(Rejected::new(LoadResult::EmptyPathGiven));
    }

    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(Rejected::new(LoadResult::FileDoesNotExist)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(Rejected::new(LoadResult::FileDoesNotExist));
        }
        Err(err) => return Err(Rejected::other(err)),
    };

    if metadata.len() == 0 {
        return Err(Rejected::new(LoadResult::FileIsEmpty));
    }

    let bytes = fs::read(path).map_err(Rejected::other)?;

    // The file may have been truncated since the metadata was read.
    if bytes.is_empty() {
        return Err(Rejected::new(LoadResult::FileIsEmpty));
    }
    if is_all_null(&bytes) {
        return Err(Rejected::new(LoadResult::FileIsAllNull));
    }

    let mut text = String::from_utf8(bytes).map_err(Rejected::other)?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}

#[inline]
fn is_all_null(bytes: &[u8]) -> bool {
    bytes.iter().all(|&byte| byte == 0)
}
