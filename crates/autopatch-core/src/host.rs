use crate::error::HostError;
use crate::geometry::Shape;
use crate::kernel;
use crate::layer::{LayerHandle, LayerSpec};
use crate::region::Region;

/// The layout store and geometry engine that grid and patch operations run
/// against.
///
/// A host owns the layers and their shapes. Operations read shapes, compute
/// new geometry, and write it back through this trait; they never hold on to
/// host state between calls.
///
/// `region_of` and `boolean_and` default to the crate's rectilinear kernel.
/// Hosts with their own polygon engine should override both.
pub trait LayoutHost {
    /// Micrometers per grid unit of this layout.
    fn dbu(&self) -> f64;

    /// Look up an existing layer.
    fn find_layer(&self, spec: LayerSpec) -> Option<LayerHandle>;

    /// Look up a layer, creating it empty if absent.
    fn find_or_create_layer(&mut self, spec: LayerSpec) -> LayerHandle;

    /// Snapshot of the shapes currently on a layer.
    fn shapes_of(&self, layer: LayerHandle) -> Result<Vec<Shape>, HostError>;

    fn insert_shape(&mut self, layer: LayerHandle, shape: Shape) -> Result<(), HostError>;

    /// Remove every shape from a layer. The layer itself stays.
    fn clear_layer(&mut self, layer: LayerHandle) -> Result<(), HostError>;

    /// Merge shapes into a region of disjoint pieces.
    fn region_of(&self, shapes: &[Shape]) -> Result<Region, HostError> {
        kernel::merge(shapes)
    }

    fn boolean_and(&self, a: &Region, b: &Region) -> Result<Region, HostError> {
        Ok(kernel::and(a, b))
    }

    /// Merged region of everything on a layer.
    fn layer_region(&self, layer: LayerHandle) -> Result<Region, HostError> {
        let shapes = self.shapes_of(layer)?;
        self.region_of(&shapes)
    }

    /// Insert a batch of shapes, returning how many were written.
    fn insert_shapes(&mut self, layer: LayerHandle, shapes: Vec<Shape>) -> Result<usize, HostError> {
        let count = shapes.len();
        for shape in shapes {
            self.insert_shape(layer, shape)?;
        }
        Ok(count)
    }
}
