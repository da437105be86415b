use serde::Serialize;

use crate::error::PatchError;
use crate::geometry::Rect;
use crate::host::LayoutHost;
use crate::layer::LayerSpec;

/// One shape as listed by [`summarize_layer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeInfo {
    pub bbox: Option<Rect>,
    /// Area in square grid units.
    pub area: i64,
}

/// Contents of a layer: every shape with its area, and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSummary {
    pub layer: LayerSpec,
    pub shapes: Vec<ShapeInfo>,
    pub total_area: i64,
}

impl LayerSummary {
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

pub fn summarize_layer<H: LayoutHost + ?Sized>(
    host: &H,
    layer: LayerSpec,
) -> Result<LayerSummary, PatchError> {
    let handle = host.find_layer(layer).ok_or(PatchError::MissingLayer(layer))?;
    let shapes: Vec<ShapeInfo> = host
        .shapes_of(handle)?
        .iter()
        .map(|s| ShapeInfo {
            bbox: s.bbox(),
            area: s.area(),
        })
        .collect();
    let total_area = shapes.iter().map(|s| s.area).sum();
    log::debug!("Total shapes found on layer {layer}: {}", shapes.len());
    Ok(LayerSummary {
        layer,
        shapes,
        total_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryLayout;
    use crate::geometry::{Point, Polygon};

    #[test]
    fn test_summarize_counts_and_areas() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        let spec = LayerSpec::new(6, 0);
        layout.add_shapes(spec, [Rect::new(0, 0, 10, 10)]);
        layout.add_shapes(
            spec,
            [Polygon::new(vec![
                Point::new(0, 0),
                Point::new(4, 0),
                Point::new(4, 4),
                Point::new(0, 4),
            ])],
        );
        let summary = summarize_layer(&layout, spec).unwrap();
        assert_eq!(summary.shape_count(), 2);
        assert_eq!(summary.total_area, 116);
        assert_eq!(summary.shapes[1].bbox, Some(Rect::new(0, 0, 4, 4)));
    }

    #[test]
    fn test_summarize_missing_layer() {
        let layout = InMemoryLayout::new("top", 0.001);
        assert!(matches!(
            summarize_layer(&layout, LayerSpec::new(6, 0)),
            Err(PatchError::MissingLayer(_))
        ));
    }
}
