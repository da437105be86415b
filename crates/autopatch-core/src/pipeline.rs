//! The full auto-patching run: grid from writing fields, then patches where
//! the electrodes cross the grid.

use crate::config::PatchingConfig;
use crate::edge_grid::{edge_grid_region, write_edge_grid, GridReport};
use crate::error::{PatchError, Warning};
use crate::host::LayoutHost;
use crate::intersect::intersect_regions;
use crate::patch::{place_patches, PatchReport};
use crate::units::Resolution;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoPatchReport {
    pub grid: GridReport,
    pub patches: PatchReport,
}

impl AutoPatchReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.grid.warnings.iter().chain(self.patches.warnings.iter())
    }
}

/// Build the grid on `config.grid_layer` from the outlines on
/// `config.writing_field_layer`, then place patches on `config.patch_layer`
/// at each piece of electrode AND grid.
///
/// Everything is computed before the first write, so a rejected configuration
/// or input layer leaves the layout untouched. Shapes already on the grid
/// layer take part in the intersection.
pub fn auto_patch<H: LayoutHost + ?Sized>(
    host: &mut H,
    res: Resolution,
    config: &PatchingConfig,
) -> Result<AutoPatchReport, PatchError> {
    let units = config.resolve(res)?;
    for input in [config.writing_field_layer, config.electrode_layer] {
        if host.find_layer(input).is_none() {
            return Err(PatchError::MissingLayer(input));
        }
    }

    log::info!("Starting auto-patching process...");
    let grid = edge_grid_region(&*host, config.writing_field_layer, units.grid_width)?;

    let electrode = host
        .find_layer(config.electrode_layer)
        .ok_or(PatchError::MissingLayer(config.electrode_layer))?;
    let electrode_region = host.layer_region(electrode)?;
    let mut grid_shapes = match host.find_layer(config.grid_layer) {
        Some(handle) => host.shapes_of(handle)?,
        None => Vec::new(),
    };
    grid_shapes.extend(grid.to_shapes());
    let grid_region = host.region_of(&grid_shapes)?;
    let intersection = intersect_regions(
        &*host,
        &electrode_region,
        &grid_region,
        config.electrode_layer,
        config.grid_layer,
    )?;

    let grid = write_edge_grid(host, config.writing_field_layer, config.grid_layer, &grid)?;
    let mut patches = place_patches(host, &intersection.region, config.patch_layer, units.patch_size)?;
    if !intersection.warnings.is_empty() {
        patches.warnings = intersection.warnings;
    }

    log::info!("Process finished successfully!");
    Ok(AutoPatchReport { grid, patches })
}
