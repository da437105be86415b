//! Rectilinear boolean kernel.
//!
//! Backs the default [`LayoutHost`](crate::host::LayoutHost) region operations.
//! Geometry is handled as sets of axis-aligned rectangles: polygons are cut
//! into horizontal slabs, unions are normalized by a slab sweep, and
//! connectivity is resolved with an R-tree and union-find. Polygons with
//! slanted edges are rejected with [`HostError::NonManhattan`].

use std::collections::HashMap;

use crate::error::HostError;
use crate::geometry::{Polygon, Rect, Shape};
use crate::region::{Piece, Region};
use crate::spatial::SpatialIndex;

/// Merge shapes into a region of disjoint connected pieces.
pub fn merge(shapes: &[Shape]) -> Result<Region, HostError> {
    let mut rects = Vec::new();
    for shape in shapes {
        rects.extend(decompose(shape)?);
    }
    Ok(region_from_rects(rects))
}

/// Boolean AND of two regions.
pub fn and(a: &Region, b: &Region) -> Region {
    if a.is_empty() || b.is_empty() {
        return Region::new();
    }
    let b_rects: Vec<Rect> = b.rects().copied().collect();
    let index = SpatialIndex::build(&b_rects);

    let mut out = Vec::new();
    for ra in a.rects() {
        for entry in index.touching(ra) {
            if let Some(overlap) = ra.intersection(&entry.rect) {
                out.push(overlap);
            }
        }
    }
    region_from_rects(out)
}

/// Normalize arbitrary (possibly overlapping) rectangles into a region.
pub fn region_from_rects(rects: Vec<Rect>) -> Region {
    Region::from_pieces(connected_pieces(normalize(rects)))
}

/// Cut a shape into non-overlapping rectangles covering the same area.
pub fn decompose(shape: &Shape) -> Result<Vec<Rect>, HostError> {
    match shape {
        Shape::Rect(r) if r.is_degenerate() => Ok(Vec::new()),
        Shape::Rect(r) => Ok(vec![*r]),
        Shape::Polygon(p) => decompose_polygon(p),
    }
}

fn decompose_polygon(polygon: &Polygon) -> Result<Vec<Rect>, HostError> {
    let edges = polygon.edges();
    if let Some(slanted) = edges.iter().find(|e| !e.is_axis_aligned()) {
        return Err(HostError::NonManhattan {
            x1: slanted.start.x,
            y1: slanted.start.y,
            x2: slanted.end.x,
            y2: slanted.end.y,
        });
    }

    // (x, y_lo, y_hi) for every vertical edge
    let verticals: Vec<(i64, i64, i64)> = edges
        .iter()
        .filter(|e| e.is_vertical())
        .map(|e| (e.start.x, e.start.y.min(e.end.y), e.start.y.max(e.end.y)))
        .collect();

    let mut ys: Vec<i64> = polygon.vertices.iter().map(|p| p.y).collect();
    ys.sort_unstable();
    ys.dedup();

    let mut rects = Vec::new();
    for slab in ys.windows(2) {
        let (y0, y1) = (slab[0], slab[1]);
        let mut xs: Vec<i64> = verticals
            .iter()
            .filter(|(_, lo, hi)| *lo <= y0 && *hi >= y1)
            .map(|(x, _, _)| *x)
            .collect();
        xs.sort_unstable();
        // Even-odd: crossings pair up into filled spans.
        for span in xs.chunks_exact(2) {
            if span[0] < span[1] {
                rects.push(Rect::new(span[0], y0, span[1], y1));
            }
        }
    }
    Ok(rects)
}

/// Union of rectangles as a canonical set of disjoint rectangles.
///
/// Sweeps horizontal slabs bottom to top. Within a slab, covered x-intervals
/// are merged (abutting intervals included); a span identical to one that
/// ended at the slab's bottom extends that rectangle instead of starting a new
/// one. Output is ordered by lower edge, then left edge.
pub fn normalize(mut rects: Vec<Rect>) -> Vec<Rect> {
    rects.retain(|r| !r.is_degenerate());
    if rects.is_empty() {
        return rects;
    }
    rects.sort_by_key(|r| (r.min.y, r.min.x));

    let mut ys: Vec<i64> = rects.iter().flat_map(|r| [r.min.y, r.max.y]).collect();
    ys.sort_unstable();
    ys.dedup();

    let mut out: Vec<Rect> = Vec::new();
    let mut open: HashMap<(i64, i64), usize> = HashMap::new();
    let mut active: Vec<Rect> = Vec::new();
    let mut next = 0;

    for slab in ys.windows(2) {
        let (y0, y1) = (slab[0], slab[1]);
        while next < rects.len() && rects[next].min.y <= y0 {
            active.push(rects[next]);
            next += 1;
        }
        active.retain(|r| r.max.y > y0);

        let mut spans: Vec<(i64, i64)> = active.iter().map(|r| (r.min.x, r.max.x)).collect();
        spans.sort_unstable();
        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(spans.len());
        for (x0, x1) in spans {
            if let Some(last) = merged.last_mut() {
                if x0 <= last.1 {
                    last.1 = last.1.max(x1);
                    continue;
                }
            }
            merged.push((x0, x1));
        }

        let mut still_open = HashMap::with_capacity(merged.len());
        for span in merged {
            let idx = match open.get(&span) {
                Some(&idx) => {
                    out[idx].max.y = y1;
                    idx
                }
                None => {
                    out.push(Rect::new(span.0, y0, span.1, y1));
                    out.len() - 1
                }
            };
            still_open.insert(span, idx);
        }
        open = still_open;
    }

    out.sort_by_key(|r| (r.min.y, r.min.x));
    out
}

/// Group rectangles into connected pieces, keeping input order within and
/// across pieces.
pub fn connected_pieces(rects: Vec<Rect>) -> Vec<Piece> {
    let index = SpatialIndex::build(&rects);
    let mut parent: Vec<usize> = (0..rects.len()).collect();

    for (i, rect) in rects.iter().enumerate() {
        for entry in index.touching(rect) {
            if entry.index > i && rect.connects(&entry.rect) {
                let a = find(&mut parent, i);
                let b = find(&mut parent, entry.index);
                if a != b {
                    parent[a.max(b)] = a.min(b);
                }
            }
        }
    }

    let mut groups: Vec<Vec<Rect>> = Vec::new();
    let mut slot: HashMap<usize, usize> = HashMap::new();
    for (i, rect) in rects.iter().enumerate() {
        let root = find(&mut parent, i);
        let g = *slot.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[g].push(*rect);
    }
    groups.into_iter().map(Piece::new).collect()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn poly(points: &[(i64, i64)]) -> Shape {
        Shape::Polygon(Polygon::new(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        ))
    }

    #[test]
    fn test_decompose_l_shape() {
        let l_shape = poly(&[(0, 0), (20, 0), (20, 10), (10, 10), (10, 20), (0, 20)]);
        let rects = decompose(&l_shape).unwrap();
        assert_eq!(rects, vec![Rect::new(0, 0, 20, 10), Rect::new(0, 10, 10, 20)]);
    }

    #[test]
    fn test_decompose_u_shape_has_gap() {
        let u_shape = poly(&[
            (0, 0),
            (30, 0),
            (30, 20),
            (20, 20),
            (20, 10),
            (10, 10),
            (10, 20),
            (0, 20),
        ]);
        let rects = decompose(&u_shape).unwrap();
        let area: i64 = rects.iter().map(Rect::area).sum();
        assert_eq!(area, 30 * 20 - 10 * 10);
        assert_eq!(rects.len(), 3);
    }

    #[test]
    fn test_decompose_rejects_slanted_edges() {
        let tri = poly(&[(0, 0), (10, 0), (0, 10)]);
        assert!(matches!(
            decompose(&tri),
            Err(HostError::NonManhattan { x1: 10, y1: 0, x2: 0, y2: 10 })
        ));
    }

    #[test]
    fn test_normalize_merges_overlaps() {
        let rects = normalize(vec![Rect::new(0, 0, 10, 10), Rect::new(5, 0, 15, 10)]);
        assert_eq!(rects, vec![Rect::new(0, 0, 15, 10)]);
    }

    #[test]
    fn test_normalize_cross_is_disjoint() {
        let rects = normalize(vec![Rect::new(0, 4, 10, 6), Rect::new(4, 0, 6, 10)]);
        let area: i64 = rects.iter().map(Rect::area).sum();
        assert_eq!(area, 20 + 20 - 4);
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(a.intersection(b).is_none());
            }
        }
    }

    #[test]
    fn test_normalize_drops_degenerate() {
        assert!(normalize(vec![Rect::new(0, 0, 0, 10)]).is_empty());
    }

    #[test]
    fn test_merge_splits_disconnected() {
        let region = merge(&[
            Shape::Rect(Rect::new(0, 0, 10, 10)),
            Shape::Rect(Rect::new(10, 0, 20, 10)),
            Shape::Rect(Rect::new(30, 0, 40, 10)),
            Shape::Rect(Rect::new(40, 10, 50, 20)),
        ])
        .unwrap();
        // Abutting pair merges; corner contact stays separate.
        assert_eq!(region.len(), 3);
        assert_eq!(region.pieces()[0].bbox(), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_merge_is_deterministic() {
        let shapes = vec![
            Shape::Rect(Rect::new(4, 0, 6, 10)),
            Shape::Rect(Rect::new(0, 4, 10, 6)),
        ];
        let mut reversed = shapes.clone();
        reversed.reverse();
        assert_eq!(merge(&shapes).unwrap(), merge(&reversed).unwrap());
    }

    #[test]
    fn test_and_fragments_per_crossing() {
        let electrode = merge(&[Shape::Rect(Rect::new(0, 0, 100, 10))]).unwrap();
        let grid = merge(&[
            Shape::Rect(Rect::new(20, -50, 22, 50)),
            Shape::Rect(Rect::new(60, -50, 62, 50)),
        ])
        .unwrap();
        let result = and(&electrode, &grid);
        assert_eq!(result.len(), 2);
        assert_eq!(result.pieces()[0].bbox(), Rect::new(20, 0, 22, 10));
        assert_eq!(result.pieces()[1].bbox(), Rect::new(60, 0, 62, 10));
    }

    #[test]
    fn test_and_disjoint_is_empty() {
        let a = merge(&[Shape::Rect(Rect::new(0, 0, 10, 10))]).unwrap();
        let b = merge(&[Shape::Rect(Rect::new(10, 0, 20, 10))]).unwrap();
        assert!(and(&a, &b).is_empty());
        assert!(and(&a, &Region::new()).is_empty());
    }
}
