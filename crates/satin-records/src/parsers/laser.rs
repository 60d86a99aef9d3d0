//! Parser for device (laser) files.
//!
//! Each device is four whitespace-separated fields:
//! ```text
//! <output_path> <small_signal_gain> <discharge_pressure> <gain_medium_label>
//! p1.out 19.8 150 CO2/N2/He
//! ```
//! The gain is a float, the pressure an integer (kPa). Paths and labels
//! cannot contain whitespace.

use std::path::{Path, PathBuf};

use satin_core::DeviceConfig;

use super::{read_file, tokens, ParseError, Token};

const FIELDS_PER_DEVICE: usize = 4;

/// Parse device records from a string.
pub fn parse_devices(content: &str) -> Result<Vec<DeviceConfig>, ParseError> {
    let toks: Vec<Token> = tokens(content).collect();

    if toks.len() % FIELDS_PER_DEVICE != 0 {
        let start = toks.len() - toks.len() % FIELDS_PER_DEVICE;
        return Err(ParseError::FormatError {
            line: toks[start].line,
            message: format!(
                "Incomplete device record: expected 'path gain pressure label', got '{}'",
                toks[start..]
                    .iter()
                    .map(|t| t.text)
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
        });
    }

    toks.chunks_exact(FIELDS_PER_DEVICE)
        .map(|record| {
            let [path, gain, pressure, label] = [record[0], record[1], record[2], record[3]];

            let small_signal_gain: f64 = gain.text.parse().map_err(|_| ParseError::FormatError {
                line: gain.line,
                message: format!("Invalid small-signal gain: {}", gain.text),
            })?;
            let discharge_pressure: i64 =
                pressure.text.parse().map_err(|_| ParseError::FormatError {
                    line: pressure.line,
                    message: format!("Invalid discharge pressure: {}", pressure.text),
                })?;

            Ok(DeviceConfig {
                small_signal_gain,
                discharge_pressure,
                output_path: PathBuf::from(path.text),
                gain_medium_label: label.text.to_string(),
            })
        })
        .collect()
}

/// Read and parse a device file.
pub fn load_devices(path: &Path) -> Result<Vec<DeviceConfig>, ParseError> {
    let devices = parse_devices(&read_file(path)?)?;
    log::debug!("Loaded {} devices from {}", devices.len(), path.display());
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_simple_laser() {
        let content = "p1.out 19.8 150 CO2/N2/He\np2.out 22.0 120 CO2/He\n";
        let devices = parse_devices(content).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].output_path, PathBuf::from("p1.out"));
        assert_relative_eq!(devices[0].small_signal_gain, 19.8);
        assert_eq!(devices[0].discharge_pressure, 150);
        assert_eq!(devices[0].gain_medium_label, "CO2/N2/He");
        assert_eq!(devices[1].gain_medium_label, "CO2/He");
    }

    #[test]
    fn test_record_may_span_lines() {
        let devices = parse_devices("p1.out\n20.0 150\nCO2/N2/He\n").unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].discharge_pressure, 150);
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_devices("").unwrap().is_empty());
    }

    #[test]
    fn test_incomplete_record() {
        let err = parse_devices("p1.out 19.8 150 CO2\np2.out 20.0\n").unwrap_err();
        match err {
            ParseError::FormatError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("p2.out 20.0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_pressure() {
        let err = parse_devices("p1.out 19.8 1.5e2 CO2\n").unwrap_err();
        assert!(err.to_string().contains("discharge pressure"));
    }

    #[test]
    fn test_bad_gain() {
        let err = parse_devices("p1.out high 150 CO2\n").unwrap_err();
        assert!(err.to_string().contains("small-signal gain"));
    }
}
