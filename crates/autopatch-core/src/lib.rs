//! # Autopatch Core
//!
//! Grid-and-patch post-processing for IC layouts. Builds grid lines from the
//! outlines of writing-field shapes (or as a uniform field grid), intersects
//! them with electrode shapes, and drops square patches at the center of each
//! intersection.
//!
//! Layout storage and polygon booleans belong to a [`LayoutHost`]. The crate
//! ships [`InMemoryLayout`], a flat in-memory host backed by a rectilinear
//! boolean kernel.

pub mod config;
pub mod database;
pub mod edge_grid;
pub mod error;
pub mod geometry;
pub mod host;
pub mod inspect;
pub mod intersect;
pub mod kernel;
pub mod layer;
pub mod patch;
pub mod pipeline;
pub mod region;
pub mod spatial;
pub mod uniform_grid;
pub mod units;

pub use config::{PatchingConfig, PatchingForm, UniformGridConfig};
pub use database::InMemoryLayout;
pub use edge_grid::{build_edge_grid, create_grid_from_shapes, edge_grid_region, GridReport};
pub use error::{HostError, PatchError, Warning};
pub use geometry::{Edge, Point, Polygon, Rect, Shape};
pub use host::LayoutHost;
pub use inspect::{summarize_layer, LayerSummary};
pub use intersect::{intersect_layers, intersect_regions, Intersection};
pub use layer::{LayerHandle, LayerSpec};
pub use patch::{create_patches, place_patches, PatchReport};
pub use pipeline::{auto_patch, AutoPatchReport};
pub use region::{Piece, Region};
pub use uniform_grid::{create_uniform_grid, uniform_grid_lines};
pub use units::{to_grid_units, Resolution};
