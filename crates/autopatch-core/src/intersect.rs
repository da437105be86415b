use crate::error::{PatchError, Warning};
use crate::host::LayoutHost;
use crate::layer::LayerSpec;
use crate::region::Region;

/// Result of intersecting two layers.
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Overlap of the two inputs, split into disjoint pieces.
    pub region: Region,
    pub warnings: Vec<Warning>,
}

impl Intersection {
    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }
}

/// Boolean AND of everything on layer `a` with everything on layer `b`.
///
/// Both layers must exist. No overlap is a warning, not an error.
pub fn intersect_layers<H: LayoutHost + ?Sized>(
    host: &H,
    a: LayerSpec,
    b: LayerSpec,
) -> Result<Intersection, PatchError> {
    let a_handle = host.find_layer(a).ok_or(PatchError::MissingLayer(a))?;
    let b_handle = host.find_layer(b).ok_or(PatchError::MissingLayer(b))?;

    let a_region = host.layer_region(a_handle)?;
    let b_region = host.layer_region(b_handle)?;
    intersect_regions(host, &a_region, &b_region, a, b)
}

/// Boolean AND of two already merged regions, labelled by the layers they
/// came from.
pub fn intersect_regions<H: LayoutHost + ?Sized>(
    host: &H,
    a_region: &Region,
    b_region: &Region,
    a: LayerSpec,
    b: LayerSpec,
) -> Result<Intersection, PatchError> {
    let region = host.boolean_and(a_region, b_region)?;

    let mut warnings = Vec::new();
    if region.is_empty() {
        warnings.push(Warning::empty(
            "intersection",
            format!("no intersections found between layer {a} and layer {b}"),
        ));
    } else {
        log::info!("Found {} intersection(s) between layer {a} and layer {b}.", region.len());
    }
    Ok(Intersection { region, warnings })
}
