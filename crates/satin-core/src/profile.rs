//! Axial-position correction table.
//!
//! Every axial sample `i` in the integration window carries a divergence
//! correction
//!
//! $p_i = \frac{2 z_i \, DZ}{Z_1^2 + z_i^2}, \quad z_i = (i - 4000) / 25$
//!
//! which the beam integrator subtracts from the per-step gain factor. The
//! table depends only on the sample index, so one table serves every
//! integration call of a run.

use serde::{Deserialize, Serialize};

use crate::constants::{AXIAL_CENTRE, AXIAL_DIVISOR, AXIAL_SAMPLES, DZ, Z1_SQ};

/// How the axial offset `(i - 4000) / 25` is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxialDivision {
    /// Divide in floating point: `(i - 4000) as f64 / 25.0`.
    #[default]
    Float,
    /// Divide as integers, truncating toward zero, then convert.
    /// Collapses every run of 25 neighbouring samples onto one offset.
    Truncating,
}

impl AxialDivision {
    /// Axial offset of sample `index`.
    pub fn offset(self, index: usize) -> f64 {
        let shifted = index as i64 - AXIAL_CENTRE;
        match self {
            AxialDivision::Float => shifted as f64 / AXIAL_DIVISOR as f64,
            AxialDivision::Truncating => (shifted / AXIAL_DIVISOR) as f64,
        }
    }
}

/// Dense table of axial correction coefficients, one per axial sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialProfile {
    division: AxialDivision,
    coefficients: Vec<f64>,
}

impl AxialProfile {
    /// Build the table for the fixed 8001-sample window.
    pub fn new(division: AxialDivision) -> Self {
        let coefficients = (0..AXIAL_SAMPLES)
            .map(|i| {
                let z_inc = division.offset(i);
                z_inc * 2.0 * DZ / (Z1_SQ + z_inc.powi(2))
            })
            .collect();

        Self {
            division,
            coefficients,
        }
    }

    pub fn division(&self) -> AxialDivision {
        self.division
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl Default for AxialProfile {
    fn default() -> Self {
        Self::new(AxialDivision::default())
    }
}

impl std::ops::Index<usize> for AxialProfile {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coefficients[index]
    }
}
