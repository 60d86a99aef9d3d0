//! # Satin Records
//!
//! Readers for the flat record files that feed a Satin run:
//!
//! - [`parsers::pin`] — input powers, one integer per token (`pin.dat`).
//! - [`parsers::laser`] — device tuples `outputPath gain pressure label`
//!   (`laser.dat`).
//!
//! Both formats are whitespace-delimited; line breaks carry no meaning
//! beyond separating tokens, but are tracked for error messages.

pub mod parsers;

pub use parsers::laser::{load_devices, parse_devices};
pub use parsers::pin::{load_input_powers, parse_input_powers};
pub use parsers::ParseError;
