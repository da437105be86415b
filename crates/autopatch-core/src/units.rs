//! Conversion between physical lengths (micrometers) and integer grid units.

use serde::{Deserialize, Serialize};

use crate::error::PatchError;

/// Database resolution: micrometers per grid unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Resolution(f64);

impl Resolution {
    /// The common 1 nm database unit.
    pub const NANOMETER: Resolution = Resolution(0.001);

    pub fn new(um_per_unit: f64) -> Result<Self, PatchError> {
        if um_per_unit.is_finite() && um_per_unit > 0.0 {
            Ok(Self(um_per_unit))
        } else {
            Err(PatchError::InvalidConfiguration(format!(
                "resolution must be a positive number, got {um_per_unit}"
            )))
        }
    }

    pub fn um_per_unit(&self) -> f64 {
        self.0
    }

    /// Convert a physical length to grid units, truncating toward zero.
    pub fn to_grid_units(&self, length_um: f64) -> Result<i64, PatchError> {
        let units = (length_um / self.0).trunc();
        if !units.is_finite() || units.abs() > i64::MAX as f64 {
            return Err(PatchError::InvalidConfiguration(format!(
                "length {length_um} um is out of range at {} um per unit",
                self.0
            )));
        }
        Ok(units as i64)
    }

    /// Convert a width or size that must come out as at least one grid unit.
    pub fn to_positive_units(&self, name: &str, length_um: f64) -> Result<i64, PatchError> {
        if !(length_um > 0.0) {
            return Err(PatchError::InvalidConfiguration(format!(
                "{name} must be positive, got {length_um} um"
            )));
        }
        let units = self.to_grid_units(length_um)?;
        if units == 0 {
            return Err(PatchError::InvalidConfiguration(format!(
                "{name} of {length_um} um is below one grid unit ({} um)",
                self.0
            )));
        }
        Ok(units)
    }
}

impl TryFrom<f64> for Resolution {
    type Error = PatchError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Resolution> for f64 {
    fn from(res: Resolution) -> Self {
        res.0
    }
}

/// Convert `length_um` to grid units at `um_per_unit` resolution.
pub fn to_grid_units(length_um: f64, um_per_unit: f64) -> Result<i64, PatchError> {
    Resolution::new(um_per_unit)?.to_grid_units(length_um)
}

/// The `[lo, hi]` span of length `size` centered on `center`.
///
/// `lo = center - floor(size / 2)` and `hi = lo + size`; an odd size puts the
/// extra unit above the center.
pub fn centered_span(center: i64, size: i64) -> (i64, i64) {
    let lo = center - size.div_euclid(2);
    (lo, lo + size)
}
