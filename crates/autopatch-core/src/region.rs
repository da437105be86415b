use crate::geometry::{Rect, Shape};

/// One connected piece of a region, stored as disjoint rectangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    rects: Vec<Rect>,
}

impl Piece {
    pub(crate) fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn bbox(&self) -> Rect {
        let mut bbox = self.rects[0];
        for r in &self.rects[1..] {
            bbox = bbox.union(r);
        }
        bbox
    }

    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }
}

/// An ephemeral set of geometry derived from layer contents.
///
/// A region is always merged: its pieces are pairwise disconnected and the
/// rectangles within a piece do not overlap. Every piece holds at least one
/// rectangle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pieces: Vec<Piece>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_pieces(pieces: Vec<Piece>) -> Self {
        debug_assert!(pieces.iter().all(|p| !p.rects.is_empty()));
        Self { pieces }
    }

    /// Number of disjoint pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// All rectangles of all pieces.
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.pieces.iter().flat_map(|p| p.rects.iter())
    }

    pub fn area(&self) -> i64 {
        self.pieces.iter().map(Piece::area).sum()
    }

    pub fn bbox(&self) -> Option<Rect> {
        self.pieces.iter().map(Piece::bbox).reduce(|a, b| a.union(&b))
    }

    /// The region as layer shapes, one rectangle per shape.
    pub fn to_shapes(&self) -> Vec<Shape> {
        self.rects().map(|r| Shape::Rect(*r)).collect()
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = &'a Piece;
    type IntoIter = std::slice::Iter<'a, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}
