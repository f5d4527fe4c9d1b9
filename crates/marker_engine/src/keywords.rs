use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeywordFileError {
    #[error("could not read keyword file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads a keyword file: one keyword or phrase per line, UTF-8. Lines are
/// trimmed, blank lines dropped, order preserved.
pub fn load_keyword_file(path: &Path) -> Result<Vec<String>, KeywordFileError> {
    let text = fs::read_to_string(path).map_err(|source| KeywordFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect())
}
