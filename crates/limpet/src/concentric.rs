//! Concentric-ring rendition of a finished placement.
//!
//! Areas keep the angles the placement engine gave them but all move to one
//! inner ring; each internal node of the local hierarchy becomes a ring whose
//! radius grows as its resolved global similarity shrinks, with explicit
//! radial and arc connectors tracing the hierarchy.

use crate::cluster::Cluster;
use crate::error::Result;
use crate::geom::point_angle;
use crate::model::{ConcentricDiagram, ConcentricLine, MergePoint};
use crate::score::resolve;
use cladarc_core::{Dendrogram, NodeId, SimilarityMatrix};
use rustc_hash::FxHashMap;

/// Radius of the ring every area sits on.
pub const AREA_RING_RADIUS: f64 = 0.5;

/// Builds the concentric diagram for `placement` (a finished run over the same
/// `local`/`global`/`matrix` inputs).
pub fn concentric_diagram(
    local: &Dendrogram,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
    placement: &Cluster,
) -> Result<ConcentricDiagram> {
    let table = matrix.table();

    let area_angle: FxHashMap<u32, f64> = placement
        .points
        .iter()
        .map(|(&id, &p)| (id, point_angle(p)))
        .collect();

    // (radius, angle) per visited node; post-order guarantees children are
    // resolved before their parent needs them.
    let mut node_anchor: FxHashMap<NodeId, (f64, f64)> = FxHashMap::default();
    let mut merge_points = Vec::new();
    let mut lines = Vec::new();
    let mut circles = vec![AREA_RING_RADIUS];

    for id in local.post_order() {
        let node = local.node(id);
        let Some((left, right)) = node.children() else {
            let area = node.members().as_slice()[0];
            let Some(&angle) = area_angle.get(&area) else {
                return Err(crate::error::Error::LabelSetMismatch {
                    message: format!("placement has no point for area {}", table.label(area)),
                });
            };
            node_anchor.insert(id, (AREA_RING_RADIUS, angle));
            continue;
        };

        let sim_global = resolve(node.members(), global, matrix)?;
        let radius = (1.0 + (1.0 - sim_global)) / 2.0;
        let (r1, a1) = node_anchor[&left];
        let (r2, a2) = node_anchor[&right];
        let angle = (a1 + a2) / 2.0;

        lines.push(ConcentricLine::Radial {
            angle: a1,
            r_from: r1,
            r_to: radius,
        });
        lines.push(ConcentricLine::Radial {
            angle: a2,
            r_from: r2,
            r_to: radius,
        });
        lines.push(ConcentricLine::Arc {
            radius,
            angle_start: a1.min(a2),
            angle_end: a1.max(a2),
        });

        merge_points.push(MergePoint {
            members: node
                .members()
                .iter()
                .map(|m| table.label(m).to_string())
                .collect(),
            radius,
            angle,
        });
        circles.push(radius);
        node_anchor.insert(id, (radius, angle));
    }

    circles.sort_by(f64::total_cmp);
    circles.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

    Ok(ConcentricDiagram {
        circles,
        positions: placement
            .points
            .iter()
            .map(|(&id, &p)| (table.label(id).to_string(), point_angle(p)))
            .collect(),
        merge_points,
        lines,
    })
}
