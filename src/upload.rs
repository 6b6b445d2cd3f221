//! Upload file name validation.

use crate::config::BookFormat;
use crate::error::{AppError, Result};
use std::path::Path;

/// Name under which an uploaded file is stored in the library root.
///
/// Directory components (`/` or `\`) of the client-supplied name are dropped
/// and the extension must be one of the accepted [`BookFormat`]s. A name with
/// a blank stem gets a generated `upload-<uuid>` stem.
pub fn stored_name(filename: &str) -> Result<String> {
    let base = basename(filename);
    let path = Path::new(base);

    let ext = path.extension().map(|e| e.to_string_lossy());
    let format = ext
        .as_deref()
        .and_then(BookFormat::from_extension)
        .ok_or_else(|| {
            let shown = ext
                .as_deref()
                .map(|e| format!(".{}", e.to_lowercase()))
                .unwrap_or_default();
            AppError::UnsupportedFormat(shown)
        })?;

    let stem_blank = path
        .file_stem()
        .map(|s| s.to_string_lossy().trim().is_empty())
        .unwrap_or(true);

    if stem_blank {
        return Ok(format!(
            "upload-{}.{}",
            uuid::Uuid::new_v4(),
            format.extension()
        ));
    }

    Ok(base.to_string())
}

/// Final path segment of `name`, treating both separators as directory breaks.
pub fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
