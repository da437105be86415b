use serde::{Deserialize, Serialize};

use crate::error::PatchError;
use crate::layer::LayerSpec;
use crate::units::Resolution;

/// Parameters of the two-step auto-patching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchingConfig {
    pub electrode_layer: LayerSpec,
    /// Layer whose shape outlines become grid lines.
    pub writing_field_layer: LayerSpec,
    pub grid_layer: LayerSpec,
    pub patch_layer: LayerSpec,
    /// Grid line width in micrometers.
    pub grid_width: f64,
    /// Patch side length in micrometers.
    pub patch_size: f64,
}

impl Default for PatchingConfig {
    fn default() -> Self {
        Self {
            electrode_layer: LayerSpec::new(1, 0),
            writing_field_layer: LayerSpec::new(50, 0),
            grid_layer: LayerSpec::new(51, 0),
            patch_layer: LayerSpec::new(202, 0),
            grid_width: 1.0,
            patch_size: 8.0,
        }
    }
}

impl PatchingConfig {
    /// Validate against a resolution, returning the widths in grid units.
    pub fn resolve(&self, res: Resolution) -> Result<PatchingUnits, PatchError> {
        Ok(PatchingUnits {
            grid_width: res.to_positive_units("grid width", self.grid_width)?,
            patch_size: res.to_positive_units("patch size", self.patch_size)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Validated [`PatchingConfig`] lengths in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchingUnits {
    pub grid_width: i64,
    pub patch_size: i64,
}

/// Raw text fields as typed into an input form.
///
/// Layer fields take a layer number (`"6"`) or number and datatype (`"6/0"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchingForm {
    pub electrode_layer: String,
    pub writing_field_layer: String,
    pub grid_layer: String,
    pub patch_layer: String,
    pub grid_width: String,
    pub patch_size: String,
}

impl PatchingForm {
    pub fn parse(&self) -> Result<PatchingConfig, PatchError> {
        Ok(PatchingConfig {
            electrode_layer: parse_layer("electrode layer", &self.electrode_layer)?,
            writing_field_layer: parse_layer("writing field layer", &self.writing_field_layer)?,
            grid_layer: parse_layer("grid layer", &self.grid_layer)?,
            patch_layer: parse_layer("patch layer", &self.patch_layer)?,
            grid_width: parse_length("grid width", &self.grid_width)?,
            patch_size: parse_length("patch size", &self.patch_size)?,
        })
    }
}

fn parse_layer(field: &str, text: &str) -> Result<LayerSpec, PatchError> {
    text.parse().map_err(|_| {
        PatchError::InvalidConfiguration(format!("{field}: '{text}' is not a layer number"))
    })
}

fn parse_length(field: &str, text: &str) -> Result<f64, PatchError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PatchError::InvalidConfiguration(format!("{field}: '{text}' is not a number")))
}

/// Parameters of the uniform writing-field grid. All lengths in micrometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformGridConfig {
    pub grid_layer: LayerSpec,
    /// Side length of the whole exposure area.
    pub area_size: f64,
    /// Side length of one writing field.
    pub field_size: f64,
    pub line_width: f64,
    /// Lower-left corner of the area.
    pub x_left: f64,
    pub y_bottom: f64,
}

/// Validated [`UniformGridConfig`] in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformGridUnits {
    /// Interior boundaries per axis, counted on the micrometer sizes.
    pub num_lines: i64,
    pub area_size: i64,
    pub field_size: i64,
    pub line_width: i64,
    pub x_left: i64,
    pub y_bottom: i64,
}

impl UniformGridConfig {
    pub fn resolve(&self, res: Resolution) -> Result<UniformGridUnits, PatchError> {
        let area_size = res.to_positive_units("area size", self.area_size)?;
        let field_size = res.to_positive_units("field size", self.field_size)?;
        Ok(UniformGridUnits {
            num_lines: (self.area_size / self.field_size).floor() as i64 - 1,
            area_size,
            field_size,
            line_width: res.to_positive_units("line width", self.line_width)?,
            x_left: res.to_grid_units(self.x_left)?,
            y_bottom: res.to_grid_units(self.y_bottom)?,
        })
    }
}
