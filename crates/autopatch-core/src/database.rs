use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HostError;
use crate::geometry::Shape;
use crate::host::LayoutHost;
use crate::layer::{LayerHandle, LayerSpec};

/// Shapes stored on one layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerShapes {
    pub spec: LayerSpec,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

/// A flat, single-cell layout held in memory.
///
/// Serves as the standalone [`LayoutHost`] and as the snapshot format read and
/// written by the command-line driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryLayout {
    /// Layout identifier.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Layout (top cell) name.
    #[serde(default)]
    pub name: String,
    /// Database unit: micrometers per grid unit.
    pub dbu: f64,
    /// Layers in creation order; a handle is an index into this list.
    #[serde(default)]
    layers: Vec<LayerShapes>,
}

impl InMemoryLayout {
    pub fn new(name: &str, dbu: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            dbu,
            layers: Vec::new(),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Shapes on a layer by identity; empty if the layer does not exist.
    pub fn shapes_on(&self, spec: LayerSpec) -> &[Shape] {
        self.layers
            .iter()
            .find(|l| l.spec == spec)
            .map(|l| l.shapes.as_slice())
            .unwrap_or(&[])
    }

    /// Convenience for seeding layouts: insert shapes onto a layer by identity.
    pub fn add_shapes<I>(&mut self, spec: LayerSpec, shapes: I)
    where
        I: IntoIterator,
        I::Item: Into<Shape>,
    {
        let handle = self.find_or_create_layer(spec);
        self.layers[handle.0]
            .shapes
            .extend(shapes.into_iter().map(Into::into));
    }

    fn layer_mut(&mut self, handle: LayerHandle) -> Result<&mut LayerShapes, HostError> {
        self.layers
            .get_mut(handle.0)
            .ok_or(HostError::UnknownLayer(handle))
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl LayoutHost for InMemoryLayout {
    fn dbu(&self) -> f64 {
        self.dbu
    }

    fn find_layer(&self, spec: LayerSpec) -> Option<LayerHandle> {
        self.layers
            .iter()
            .position(|l| l.spec == spec)
            .map(LayerHandle)
    }

    fn find_or_create_layer(&mut self, spec: LayerSpec) -> LayerHandle {
        if let Some(handle) = self.find_layer(spec) {
            log::debug!("Layer {spec} already exists.");
            return handle;
        }
        log::debug!("Layer {spec} is created.");
        self.layers.push(LayerShapes {
            spec,
            shapes: Vec::new(),
        });
        LayerHandle(self.layers.len() - 1)
    }

    fn shapes_of(&self, layer: LayerHandle) -> Result<Vec<Shape>, HostError> {
        self.layers
            .get(layer.0)
            .map(|l| l.shapes.clone())
            .ok_or(HostError::UnknownLayer(layer))
    }

    fn insert_shape(&mut self, layer: LayerHandle, shape: Shape) -> Result<(), HostError> {
        self.layer_mut(layer)?.shapes.push(shape);
        Ok(())
    }

    fn clear_layer(&mut self, layer: LayerHandle) -> Result<(), HostError> {
        self.layer_mut(layer)?.shapes.clear();
        Ok(())
    }
}
