//! Physical and numerical constants of the gaussian-beam model.
//!
//! Lengths are in centimetres, so intensities come out in watts/cm².

use std::f64::consts::PI;

/// Beam-aperture radius (cm).
pub const RADIUS: f64 = 18e-2;

/// Beam waist (cm).
pub const W1: f64 = 3e-1;

/// Radial integration step (cm).
pub const DR: f64 = 2e-3;

/// Axial integration step (cm).
pub const DZ: f64 = 4e-2;

/// CO₂ laser wavelength (cm).
pub const LAMBDA: f64 = 10.6e-3;

/// Beam-aperture area π·RADIUS².
pub const AREA: f64 = PI * (RADIUS * RADIUS);

/// Rayleigh range π·W1²/λ.
pub const Z1: f64 = PI * (W1 * W1) / LAMBDA;

/// Z1², used in every axial profile entry.
pub const Z1_SQ: f64 = Z1 * Z1;

/// Annulus area factor 2π·DR; multiplied by r it gives the ring area.
pub const EXPR: f64 = 2.0 * PI * DR;

/// Number of axial samples in the profile window.
pub const AXIAL_SAMPLES: usize = 8001;

/// Index of the axial sample at z = 0.
pub const AXIAL_CENTRE: i64 = (AXIAL_SAMPLES / 2) as i64;

/// Samples per unit of axial offset.
pub const AXIAL_DIVISOR: i64 = 25;

/// Number of radial samples; radius runs over `k * DR` for `k` in `0..RADIAL_STEPS`,
/// so the outer edge at 0.5 cm is never sampled.
pub const RADIAL_STEPS: usize = 250;

/// Normalisation of the small-signal gain in the gain term.
pub const GAIN_NORMALISATION: f64 = 32e3;
