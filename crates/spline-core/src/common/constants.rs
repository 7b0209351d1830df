//! Unit conversions between GENIE natural units and cm².
//!
//! GENIE stores cross sections in GeV⁻²; one metre is 5.07e15 GeV⁻¹.

pub const METER: f64 = 5.07e15;
pub const CENTIMETER: f64 = 0.01 * METER;
pub const CM2: f64 = CENTIMETER * CENTIMETER;

/// Scale used by the text tables: values are written in units of 1e-38 cm².
pub const TABLE_SCALE: f64 = 1.0e-38;
pub const TABLE_UNIT_LABEL: &str = "x 10^(-38) cm2";

/// Converts a cross section in GeV⁻² into multiples of `scale` cm².
pub fn to_scaled_cm2(natural: f64, scale: f64) -> f64 {
    natural / CM2 / scale
}
