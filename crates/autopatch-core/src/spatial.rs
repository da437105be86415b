use rstar::{RTree, RTreeObject, AABB};

use crate::geometry::Rect;

/// An entry in the R-tree spatial index, referencing a rectangle by its index.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    /// Index into the caller's rectangle list.
    pub index: usize,
    pub rect: Rect,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[i64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.rect)
    }
}

fn envelope_of(rect: &Rect) -> AABB<[i64; 2]> {
    AABB::from_corners([rect.min.x, rect.min.y], [rect.max.x, rect.max.y])
}

/// Spatial index over rectangles, used to prune candidate pairs in the
/// boolean and connectivity passes.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Build the index over `rects`; entry indices follow slice order.
    pub fn build(rects: &[Rect]) -> Self {
        let entries = rects
            .iter()
            .enumerate()
            .map(|(index, rect)| SpatialEntry { index, rect: *rect })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// All entries whose closed bounds touch or overlap `rect`.
    pub fn touching(&self, rect: &Rect) -> Vec<&SpatialEntry> {
        let envelope = envelope_of(rect);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
