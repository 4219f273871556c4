//! Serializable layout output consumed by rendering and interaction layers.

use crate::cluster::Cluster;
use crate::place::PlacementStep;
use cladarc_core::AreaTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }
}

/// Snapshot of a placed structure: the final diagram handed to renderers, or
/// one intermediate structure inside a [`TraceStep`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcDiagram {
    pub members: Vec<String>,
    pub sim_local: f64,
    pub sim_global: f64,
    pub diameter: f64,
    pub theta: f64,
    pub center: LayoutPoint,
    pub midline_angle: f64,
    /// Area label to coordinate, in placement order.
    pub points: IndexMap<String, LayoutPoint>,
}

impl ArcDiagram {
    pub fn from_cluster(cluster: &Cluster, table: &AreaTable) -> Self {
        Self {
            members: cluster
                .members
                .iter()
                .map(|id| table.label(id).to_string())
                .collect(),
            sim_local: cluster.sim_local,
            sim_global: cluster.sim_global,
            diameter: cluster.diameter,
            theta: cluster.theta,
            center: LayoutPoint {
                x: cluster.center.x,
                y: cluster.center.y,
            },
            midline_angle: cluster.midline_angle,
            points: cluster
                .points
                .iter()
                .map(|(&id, p)| (table.label(id).to_string(), LayoutPoint { x: p.x, y: p.y }))
                .collect(),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.values().map(|p| (p.x, p.y)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    Seed,
    AddMember,
    MergeClusters,
}

impl TraceAction {
    pub(crate) fn from_step(step: &PlacementStep) -> Self {
        match step {
            PlacementStep::Seed => Self::Seed,
            PlacementStep::AddMember { .. } => Self::AddMember,
            PlacementStep::MergeClusters { .. } => Self::MergeClusters,
        }
    }
}

/// One step of a traced run: the action taken, every active structure after
/// it, and the areas placed by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub action: TraceAction,
    pub structures: Vec<ArcDiagram>,
    pub highlighted: Vec<String>,
}

/// A concentric-ring rendition of a finished placement: every area pinned to
/// the innermost ring, one ring per hierarchy level, with explicit connector
/// geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentricDiagram {
    /// Ring radii, ascending, deduplicated. Always includes the area ring.
    pub circles: Vec<f64>,
    /// Area label to north-referenced angle on the area ring.
    pub positions: IndexMap<String, f64>,
    pub merge_points: Vec<MergePoint>,
    pub lines: Vec<ConcentricLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePoint {
    pub members: Vec<String>,
    pub radius: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConcentricLine {
    Radial {
        angle: f64,
        r_from: f64,
        r_to: f64,
    },
    Arc {
        radius: f64,
        angle_start: f64,
        angle_end: f64,
    },
}
