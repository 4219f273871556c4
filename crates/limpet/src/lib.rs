#![forbid(unsafe_code)]

//! Headless arc-placement engine for paired cluster hierarchies.
//!
//! Two hierarchical clusterings over the same areas drive one diagram:
//! angular separation between areas encodes the "local" hierarchy, radial
//! distance the complementary "global" one. The engine extracts clusters from
//! the local hierarchy, resolves each one's global similarity, converts the
//! two scores into an angular span and a diameter, then assembles coordinates
//! greedily: seed the strongest cluster, then absorb the rest one at a time.
//!
//! Determinism is load-bearing: stable ordering everywhere, pure resolution,
//! and coordinates that are never rewritten once assigned.

pub mod cluster;
pub mod concentric;
pub mod error;
pub mod geom;
pub mod model;
pub mod place;
pub mod score;

pub use cluster::{Cluster, ClusterStub, PointMap, extract_clusters};
pub use concentric::{AREA_RING_RADIUS, concentric_diagram};
pub use error::{Error, Result};
pub use model::{
    ArcDiagram, Bounds, ConcentricDiagram, ConcentricLine, LayoutPoint, MergePoint, TraceAction,
    TraceStep,
};
pub use place::{Placement, PlacementOptions, PlacementStep, place, place_with_steps};
pub use score::{decorate, resolve};
