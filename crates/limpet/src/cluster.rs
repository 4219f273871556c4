//! The working cluster record and its extraction from the local hierarchy.

use crate::geom::{Point, point};
use cladarc_core::{AreaId, AreaTable, Dendrogram, MemberSet};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered point map; iteration order is placement order, which keeps
/// snapshots and serialized output deterministic.
pub type PointMap = IndexMap<AreaId, Point, FxBuildHasher>;

/// An undecorated cluster straight out of the local hierarchy: a member set and
/// the similarity at which the members were joined.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStub {
    pub members: MemberSet,
    pub sim_local: f64,
}

/// A decorated cluster, progressively enriched by the placement engine.
///
/// Invariant: once a member's coordinate is written into `points` it is never
/// rewritten or rescaled; later steps only insert coordinates for new members
/// (a merge rotates the joining structure's frame once, radius-preserving, as
/// its points are inserted).
#[derive(Debug, Clone)]
pub struct Cluster {
    pub members: MemberSet,
    pub sim_local: f64,
    /// Resolved through the global hierarchy, or the pairwise matrix mean.
    pub sim_global: f64,
    pub diameter: f64,
    /// Angular span in degrees, `180 * (1 - sim_local)`.
    pub theta: f64,
    /// Reference point of the cluster's local frame (origin for every cluster
    /// this engine produces).
    pub center: Point,
    /// Orientation reference in degrees; 0 is the fixed "north" midline.
    pub midline_angle: f64,
    pub points: PointMap,
}

impl Cluster {
    pub(crate) fn decorated(stub: &ClusterStub, sim_global: f64, diameter: f64) -> Self {
        Self {
            members: stub.members.clone(),
            sim_local: stub.sim_local,
            sim_global,
            diameter,
            theta: 180.0 * (1.0 - stub.sim_local),
            center: point(0.0, 0.0),
            midline_angle: 0.0,
            points: PointMap::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// One stub per internal node of the local hierarchy, in post-order (children
/// before parents). Post-order is the tie-break key for the later stable sort:
/// a child joined at the same similarity as its parent still sorts first.
pub fn extract_clusters(local: &Dendrogram) -> Vec<ClusterStub> {
    local
        .post_order()
        .into_iter()
        .map(|id| local.node(id))
        .filter(|node| !node.is_leaf())
        .map(|node| ClusterStub {
            members: node.members().clone(),
            sim_local: node.sim(),
        })
        .collect()
}

/// Comma-separated labels, for error messages.
pub(crate) fn format_members(table: &AreaTable, members: &MemberSet) -> String {
    let mut out = String::new();
    for id in members.iter() {
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str(table.label(id));
    }
    out
}
