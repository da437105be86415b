//! Grid lines built from the outlines of existing shapes.
//!
//! Every boundary edge of every source shape is thickened into a rectangle of
//! the requested width, extended by half the width past both ends so that
//! lines meet cleanly at corners. The rectangles are merged into one region
//! and written to the destination layer.

use crate::error::{PatchError, Warning};
use crate::geometry::{Edge, Point, Polygon, Rect, Shape};
use crate::host::LayoutHost;
use crate::layer::LayerSpec;
use crate::region::Region;
use crate::units::Resolution;

/// Outcome of a grid-building operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridReport {
    pub layer: LayerSpec,
    /// Shapes inserted into the destination layer.
    pub shapes_written: usize,
    /// Connected pieces making up the grid.
    pub pieces: usize,
    pub warnings: Vec<Warning>,
}

impl GridReport {
    pub fn is_empty(&self) -> bool {
        self.shapes_written == 0
    }
}

/// Thicken one edge into a `width`-wide band extended by half the width past
/// both endpoints.
///
/// Axis-parallel edges give an exact [`Rect`]; slanted edges give a
/// quadrilateral with corners rounded to the grid.
pub fn extend_edge(edge: &Edge, width: i64) -> Shape {
    if edge.is_axis_aligned() {
        let a = Rect::centered_at(edge.start, width, width);
        let b = Rect::centered_at(edge.end, width, width);
        return Shape::Rect(a.union(&b));
    }

    let len = edge.length();
    let dx = (edge.end.x - edge.start.x) as f64 / len;
    let dy = (edge.end.y - edge.start.y) as f64 / len;
    let h = width as f64 / 2.0;
    let corner = |p: Point, along: f64, across: f64| {
        Point::new(
            (p.x as f64 + dx * along - dy * across).round() as i64,
            (p.y as f64 + dy * along + dx * across).round() as i64,
        )
    };
    Shape::Polygon(Polygon::new(vec![
        corner(edge.start, -h, -h),
        corner(edge.end, h, -h),
        corner(edge.end, h, h),
        corner(edge.start, -h, h),
    ]))
}

/// Grid bands for every boundary edge of `shape`.
pub fn edge_bands(shape: &Shape, width: i64) -> Vec<Shape> {
    shape
        .edges()
        .iter()
        .map(|edge| extend_edge(edge, width))
        .collect()
}

/// Merged grid bands along the outlines of every shape on `source`, without
/// writing anything.
pub fn edge_grid_region<H: LayoutHost + ?Sized>(
    host: &H,
    source: LayerSpec,
    width: i64,
) -> Result<Region, PatchError> {
    if width <= 0 {
        return Err(PatchError::InvalidConfiguration(format!(
            "grid width must be at least one grid unit, got {width}"
        )));
    }
    let source_handle = host
        .find_layer(source)
        .ok_or(PatchError::MissingLayer(source))?;

    let shapes = host.shapes_of(source_handle)?;
    let bands: Vec<Shape> = shapes.iter().flat_map(|s| edge_bands(s, width)).collect();
    log::debug!(
        "{} edge bands from {} shapes on layer {source}",
        bands.len(),
        shapes.len()
    );
    Ok(host.region_of(&bands)?)
}

/// Build grid lines of `width` grid units along the outlines of every shape on
/// `source`, writing the merged result to `dest`.
///
/// An existing but empty source layer yields an empty grid with a warning.
/// Repeated runs add to `dest`; clear it first for a fresh grid.
pub fn build_edge_grid<H: LayoutHost + ?Sized>(
    host: &mut H,
    source: LayerSpec,
    dest: LayerSpec,
    width: i64,
) -> Result<GridReport, PatchError> {
    let grid = edge_grid_region(&*host, source, width)?;
    write_edge_grid(host, source, dest, &grid)
}

/// Write a grid computed by [`edge_grid_region`] to `dest`.
pub(crate) fn write_edge_grid<H: LayoutHost + ?Sized>(
    host: &mut H,
    source: LayerSpec,
    dest: LayerSpec,
    grid: &Region,
) -> Result<GridReport, PatchError> {
    let mut warnings = Vec::new();
    if grid.is_empty() {
        warnings.push(Warning::empty(
            "edge grid",
            format!("layer {source} has no shapes to build a grid from"),
        ));
    }

    let dest_handle = host.find_or_create_layer(dest);
    let shapes_written = host.insert_shapes(dest_handle, grid.to_shapes())?;
    log::info!("Grid created on layer {dest} based on shapes from layer {source}.");

    Ok(GridReport {
        layer: dest,
        shapes_written,
        pieces: grid.len(),
        warnings,
    })
}

/// [`build_edge_grid`] with the width given in micrometers.
pub fn create_grid_from_shapes<H: LayoutHost + ?Sized>(
    host: &mut H,
    res: Resolution,
    source: LayerSpec,
    dest: LayerSpec,
    width_um: f64,
) -> Result<GridReport, PatchError> {
    let width = res.to_positive_units("grid width", width_um)?;
    build_edge_grid(host, source, dest, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryLayout;
    use crate::error::HostError;

    const FIELD: LayerSpec = LayerSpec { layer: 50, datatype: 0 };
    const GRID: LayerSpec = LayerSpec { layer: 51, datatype: 0 };

    #[test]
    fn test_extend_horizontal_edge() {
        let edge = Edge::new(Point::new(0, 0), Point::new(100, 0));
        assert_eq!(extend_edge(&edge, 10), Shape::Rect(Rect::new(-5, -5, 105, 5)));
    }

    #[test]
    fn test_extend_reversed_vertical_edge() {
        let edge = Edge::new(Point::new(0, 100), Point::new(0, 0));
        assert_eq!(extend_edge(&edge, 4), Shape::Rect(Rect::new(-2, -2, 2, 102)));
    }

    #[test]
    fn test_extend_odd_width_is_exact() {
        let edge = Edge::new(Point::new(0, 0), Point::new(10, 0));
        let Shape::Rect(r) = extend_edge(&edge, 3) else {
            panic!("expected a rectangle");
        };
        assert_eq!(r.height(), 3);
        assert_eq!(r.width(), 13);
    }

    #[test]
    fn test_extend_diagonal_edge() {
        let edge = Edge::new(Point::new(0, 0), Point::new(100, 100));
        let Shape::Polygon(p) = extend_edge(&edge, 10) else {
            panic!("expected a polygon");
        };
        assert_eq!(p.vertex_count(), 4);
        let bbox = p.bbox().unwrap();
        assert!(bbox.min.x < 0 && bbox.max.x > 100);
    }

    #[test]
    fn test_single_field_outline() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.add_shapes(FIELD, [Rect::new(0, 0, 1000, 1000)]);

        let report = build_edge_grid(&mut layout, FIELD, GRID, 10).unwrap();
        assert_eq!(report.pieces, 1);
        assert!(report.warnings.is_empty());

        let grid = layout.layer_region(layout.find_layer(GRID).unwrap()).unwrap();
        assert_eq!(grid.bbox(), Some(Rect::new(-5, -5, 1005, 1005)));
        // Frame area: outer square minus the inner hole.
        assert_eq!(grid.area(), 1010 * 1010 - 990 * 990);
    }

    #[test]
    fn test_adjacent_fields_share_lines() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.add_shapes(
            FIELD,
            [Rect::new(0, 0, 100, 100), Rect::new(100, 0, 200, 100)],
        );
        build_edge_grid(&mut layout, FIELD, GRID, 2).unwrap();
        let grid = layout.layer_region(layout.find_layer(GRID).unwrap()).unwrap();
        assert_eq!(grid.len(), 1);
        // Outer frame minus the two field interiors; the shared divider is
        // counted once.
        assert_eq!(grid.area(), 202 * 102 - 2 * 98 * 98);
    }

    #[test]
    fn test_empty_source_layer_is_not_an_error() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.find_or_create_layer(FIELD);
        let report = build_edge_grid(&mut layout, FIELD, GRID, 10).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(layout.find_layer(GRID).is_some());
        assert!(layout.shapes_on(GRID).is_empty());
    }

    #[test]
    fn test_missing_source_layer() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        let err = build_edge_grid(&mut layout, FIELD, GRID, 10).unwrap_err();
        assert!(matches!(err, PatchError::MissingLayer(spec) if spec == FIELD));
        assert!(layout.find_layer(GRID).is_none());
    }

    #[test]
    fn test_zero_width_rejected_before_writing() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.add_shapes(FIELD, [Rect::new(0, 0, 10, 10)]);
        assert!(matches!(
            build_edge_grid(&mut layout, FIELD, GRID, 0),
            Err(PatchError::InvalidConfiguration(_))
        ));
        assert!(layout.find_layer(GRID).is_none());
    }

    #[test]
    fn test_slanted_outline_rejected_by_rectilinear_kernel() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.add_shapes(
            FIELD,
            [Polygon::new(vec![
                Point::new(0, 0),
                Point::new(100, 0),
                Point::new(0, 100),
            ])],
        );
        let err = build_edge_grid(&mut layout, FIELD, GRID, 4).unwrap_err();
        assert!(matches!(err, PatchError::Host(HostError::NonManhattan { .. })));
        assert!(layout.find_layer(GRID).is_none());
    }

    #[test]
    fn test_region_is_computed_without_writing() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.add_shapes(FIELD, [Rect::new(0, 0, 100, 100)]);
        let grid = edge_grid_region(&layout, FIELD, 2).unwrap();
        assert_eq!(grid.bbox(), Some(Rect::new(-1, -1, 101, 101)));
        assert_eq!(layout.layer_count(), 1);
    }

    #[test]
    fn test_rerun_on_cleared_layer_is_identical() {
        let mut layout = InMemoryLayout::new("top", 0.001);
        layout.add_shapes(
            FIELD,
            [Rect::new(0, 0, 500, 500), Rect::new(500, 0, 1000, 500)],
        );
        build_edge_grid(&mut layout, FIELD, GRID, 6).unwrap();
        let first = layout.shapes_on(GRID).to_vec();

        let handle = layout.find_layer(GRID).unwrap();
        layout.clear_layer(handle).unwrap();
        build_edge_grid(&mut layout, FIELD, GRID, 6).unwrap();
        assert_eq!(layout.shapes_on(GRID), first.as_slice());
    }

    #[test]
    fn test_width_in_micrometers() {
        let mut layout = InMemoryLayout::new("top", 0.5);
        layout.add_shapes(FIELD, [Rect::new(0, 0, 100, 100)]);
        let res = Resolution::new(layout.dbu).unwrap();
        create_grid_from_shapes(&mut layout, res, FIELD, GRID, 2.0).unwrap();
        let grid = layout.layer_region(layout.find_layer(GRID).unwrap()).unwrap();
        assert_eq!(grid.bbox(), Some(Rect::new(-2, -2, 102, 102)));
        assert!(create_grid_from_shapes(&mut layout, res, FIELD, GRID, 0.25).is_err());
    }
}
