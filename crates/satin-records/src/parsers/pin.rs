//! Parser for input-power files.
//!
//! ```text
//! 100
//! 200 300
//! ```
//! Every token is an integer power in watts. Order is preserved; it
//! becomes the row order of every report. Values are not range-checked.

use std::path::Path;

use super::{read_file, tokens, ParseError};

/// Parse input powers from a string.
pub fn parse_input_powers(content: &str) -> Result<Vec<i64>, ParseError> {
    tokens(content)
        .map(|tok| {
            tok.text.parse::<i64>().map_err(|_| ParseError::FormatError {
                line: tok.line,
                message: format!("Invalid input power: {}", tok.text),
            })
        })
        .collect()
}

/// Read and parse an input-power file.
pub fn load_input_powers(path: &Path) -> Result<Vec<i64>, ParseError> {
    let powers = parse_input_powers(&read_file(path)?)?;
    log::debug!("Loaded {} input powers from {}", powers.len(), path.display());
    Ok(powers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pin() {
        let powers = parse_input_powers("100\n200\n  300 \n").unwrap();
        assert_eq!(powers, vec![100, 200, 300]);
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(parse_input_powers("50 10 30").unwrap(), vec![50, 10, 30]);
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_input_powers("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_values_pass_through() {
        assert_eq!(parse_input_powers("0 -5").unwrap(), vec![0, -5]);
    }

    #[test]
    fn test_invalid_token_reports_line() {
        let err = parse_input_powers("100\n200\n3x0\n").unwrap_err();
        match err {
            ParseError::FormatError { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("3x0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_many_values_grow_past_initial_capacity() {
        let content: String = (1..=1000).map(|p| format!("{p}\n")).collect();
        let powers = parse_input_powers(&content).unwrap();
        assert_eq!(powers.len(), 1000);
        assert_eq!(powers[999], 1000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pin.dat");
        std::fs::write(&path, "100\n250\n").unwrap();
        assert_eq!(load_input_powers(&path).unwrap(), vec![100, 250]);
    }
}
