//! Per-device text report.
//!
//! Layout:
//! ```text
//! Start date: <timestamp>
//!
//! Gaussian Beam
//!
//! Pressure in Main Discharge = 150kPa
//! Small-signal Gain = 20.0
//! CO2 via CO2/N2/He
//!
//! Pin    Pout    Sat. Int    ln(Pout/Pin)    Pout-Pin
//! (watts)    (watts)    (watts/cm2)        (watts)
//! 100    121.043    10000    0.191    21.043
//! ...
//!
//! End date: <timestamp>
//! ```
//! Columns are tab-separated.

use std::io::{self, Write};

use crate::types::{DeviceConfig, GaussianResult};

/// Source of the start/end timestamps written into reports.
pub trait ReportClock: Send + Sync {
    /// Current time, already formatted for the report.
    fn timestamp(&self) -> String;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ReportClock for SystemClock {
    fn timestamp(&self) -> String {
        chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S%.9f %z")
            .to_string()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl ReportClock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Write the report header: start date, device parameters and column titles.
pub fn write_header<W: Write>(out: &mut W, device: &DeviceConfig, started: &str) -> io::Result<()> {
    writeln!(out, "Start date: {}", started)?;
    writeln!(out)?;
    writeln!(out, "Gaussian Beam")?;
    writeln!(out)?;
    writeln!(out, "Pressure in Main Discharge = {}kPa", device.discharge_pressure)?;
    writeln!(out, "Small-signal Gain = {:4.1}", device.small_signal_gain)?;
    writeln!(out, "CO2 via {}", device.gain_medium_label)?;
    writeln!(out)?;
    writeln!(out, "Pin\t\tPout\t\tSat. Int\tln(Pout/Pin)\tPout-Pin")?;
    writeln!(out, "(watts)\t\t(watts)\t\t(watts/cm2)\t\t\t(watts)")
}

/// Format one result row (without the trailing newline).
pub fn format_row(result: &GaussianResult) -> String {
    format!(
        "{}\t\t{:7.3}\t\t{}\t\t{:5.3}\t\t{:7.3}",
        result.input_power,
        result.output_power,
        result.saturation_intensity,
        result.log_gain(),
        result.power_gain(),
    )
}

/// Write one row per result, in the order given.
pub fn write_rows<W: Write>(out: &mut W, results: &[GaussianResult]) -> io::Result<()> {
    for result in results {
        writeln!(out, "{}", format_row(result))?;
    }
    Ok(())
}

/// Write the closing end-date line.
pub fn write_footer<W: Write>(out: &mut W, finished: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "End date: {}", finished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn device() -> DeviceConfig {
        DeviceConfig {
            small_signal_gain: 20.0,
            discharge_pressure: 150,
            output_path: PathBuf::from("unused.out"),
            gain_medium_label: "CO2/N2/He".into(),
        }
    }

    #[test]
    fn test_header_layout() {
        let mut buf = Vec::new();
        write_header(&mut buf, &device(), "T0").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Start date: T0");
        assert_eq!(lines[2], "Gaussian Beam");
        assert_eq!(lines[4], "Pressure in Main Discharge = 150kPa");
        assert_eq!(lines[5], "Small-signal Gain = 20.0");
        assert_eq!(lines[6], "CO2 via CO2/N2/He");
        assert!(lines[8].starts_with("Pin\t\tPout"));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_small_gain_is_padded() {
        let mut d = device();
        d.small_signal_gain = 7.25;
        let mut buf = Vec::new();
        write_header(&mut buf, &d, "T0").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Small-signal Gain =  7.2\n") || text.contains("Small-signal Gain =  7.3\n"));
    }

    #[test]
    fn test_row_format() {
        let row = format_row(&GaussianResult {
            input_power: 100,
            saturation_intensity: 10_000,
            output_power: 121.0434,
        });
        let fields: Vec<&str> = row.split("\t\t").collect();
        assert_eq!(fields, vec!["100", "121.043", "10000", "0.191", " 21.043"]);
    }

    #[test]
    fn test_non_finite_values_written_verbatim() {
        let row = format_row(&GaussianResult {
            input_power: 0,
            saturation_intensity: 10_000,
            output_power: 0.0,
        });
        assert!(row.contains("NaN"));
    }

    #[test]
    fn test_footer() {
        let mut buf = Vec::new();
        write_footer(&mut buf, "T1").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\nEnd date: T1\n");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock("2024-01-01".into());
        assert_eq!(clock.timestamp(), "2024-01-01");
    }
}
