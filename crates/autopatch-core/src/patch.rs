//! Square patches centered on intersection pieces.

use crate::error::{PatchError, Warning};
use crate::geometry::{Rect, Shape};
use crate::host::LayoutHost;
use crate::intersect::intersect_layers;
use crate::layer::LayerSpec;
use crate::region::Region;
use crate::units::Resolution;

/// Outcome of patch placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub layer: LayerSpec,
    /// Intersection pieces processed.
    pub intersections: usize,
    pub patches: usize,
    pub warnings: Vec<Warning>,
}

/// One `size` x `size` square per piece of `region`, centered on the piece's
/// bounding-box center. Order follows the region's pieces.
pub fn patch_rects(region: &Region, size: i64) -> Vec<Rect> {
    region
        .iter()
        .map(|piece| Rect::centered_at(piece.bbox().center(), size, size))
        .collect()
}

/// Insert a patch for every piece of `region` into `patch_layer`.
pub fn place_patches<H: LayoutHost + ?Sized>(
    host: &mut H,
    region: &Region,
    patch_layer: LayerSpec,
    size: i64,
) -> Result<PatchReport, PatchError> {
    if size <= 0 {
        return Err(PatchError::InvalidConfiguration(format!(
            "patch size must be at least one grid unit, got {size}"
        )));
    }
    let patches: Vec<Shape> = patch_rects(region, size).into_iter().map(Shape::Rect).collect();

    let mut warnings = Vec::new();
    if patches.is_empty() {
        warnings.push(Warning::empty(
            "patch placement",
            format!("no shapes to place patches on for layer {patch_layer}"),
        ));
    }

    let handle = host.find_or_create_layer(patch_layer);
    let count = host.insert_shapes(handle, patches)?;
    log::info!("{count} patches created on layer {patch_layer}.");

    Ok(PatchReport {
        layer: patch_layer,
        intersections: region.len(),
        patches: count,
        warnings,
    })
}

/// Place patches of `patch_size_um` at every intersection of the electrode and
/// grid layers.
pub fn create_patches<H: LayoutHost + ?Sized>(
    host: &mut H,
    res: Resolution,
    electrode_layer: LayerSpec,
    grid_layer: LayerSpec,
    patch_layer: LayerSpec,
    patch_size_um: f64,
) -> Result<PatchReport, PatchError> {
    let size = res.to_positive_units("patch size", patch_size_um)?;
    let intersection = intersect_layers(&*host, electrode_layer, grid_layer)?;
    let mut report = place_patches(host, &intersection.region, patch_layer, size)?;

    // One empty-result warning is enough when there was nothing to intersect.
    if !intersection.warnings.is_empty() {
        report.warnings = intersection.warnings;
    }
    Ok(report)
}
