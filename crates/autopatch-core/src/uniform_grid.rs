//! Evenly spaced writing-field boundaries over a square exposure area.

use crate::config::{UniformGridConfig, UniformGridUnits};
use crate::edge_grid::GridReport;
use crate::error::{PatchError, Warning};
use crate::geometry::{Rect, Shape};
use crate::host::LayoutHost;
use crate::units::{centered_span, Resolution};

/// Interior field boundaries of the area, vertical and horizontal lines
/// interleaved.
///
/// Emits `num_lines` interior boundaries per axis, one field apart. Each line
/// runs across the full area and is `line_width` wide about its center. If the
/// field is not smaller than the area there are no lines.
pub fn uniform_grid_lines(units: &UniformGridUnits) -> Vec<Rect> {
    let UniformGridUnits {
        num_lines,
        area_size,
        field_size,
        line_width,
        x_left,
        y_bottom,
    } = *units;
    let mut lines = Vec::new();
    for i in 1..=num_lines {
        let (x1, x2) = centered_span(x_left + i * field_size, line_width);
        lines.push(Rect::new(x1, y_bottom, x2, y_bottom + area_size));

        let (y1, y2) = centered_span(y_bottom + i * field_size, line_width);
        lines.push(Rect::new(x_left, y1, x_left + area_size, y2));
    }
    lines
}

/// Draw the writing-field grid described by `config` onto its grid layer.
pub fn create_uniform_grid<H: LayoutHost + ?Sized>(
    host: &mut H,
    res: Resolution,
    config: &UniformGridConfig,
) -> Result<GridReport, PatchError> {
    let units = config.resolve(res)?;
    let lines = uniform_grid_lines(&units);

    let mut warnings = Vec::new();
    if lines.is_empty() {
        warnings.push(Warning::empty(
            "uniform grid",
            format!(
                "field size {} um does not divide area size {} um into more than one field",
                config.field_size, config.area_size
            ),
        ));
    }

    let handle = host.find_or_create_layer(config.grid_layer);
    let shapes_written = host.insert_shapes(handle, lines.into_iter().map(Shape::Rect).collect())?;
    log::info!("Grid created on layer {}.", config.grid_layer);

    Ok(GridReport {
        layer: config.grid_layer,
        shapes_written,
        pieces: shapes_written,
        warnings,
    })
}
