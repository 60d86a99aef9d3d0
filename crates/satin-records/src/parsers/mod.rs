//! Record-file parsers.

pub mod laser;
pub mod pin;

use std::path::PathBuf;

use thiserror::Error;

/// Errors while reading record files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    FormatError { line: usize, message: String },
}

/// A whitespace-separated token with the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
}

/// Split `content` into tokens, remembering line numbers.
pub(crate) fn tokens(content: &str) -> impl Iterator<Item = Token<'_>> {
    content
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| {
            line.split_whitespace()
                .map(move |text| Token { text, line: idx + 1 })
        })
}

/// Read a whole record file, mapping failures to [`ParseError::IoError`].
pub(crate) fn read_file(path: &std::path::Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::IoError {
        path: path.to_path_buf(),
        source,
    })
}
