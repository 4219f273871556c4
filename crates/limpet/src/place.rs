//! The arc-placement state machine: seed, add-member and merge operations,
//! plus the orchestration driver.
//!
//! The driver walks decorated clusters in order of descending local similarity
//! and absorbs each one into a growing set of placed structures. Placement is
//! greedy and order-driven: it never backtracks, and a coordinate, once
//! assigned, is never touched again.

use crate::cluster::{Cluster, ClusterStub, extract_clusters, format_members};
use crate::error::{Error, Result};
use crate::geom::{point, point_angle, polar_point, rotate_about_origin};
use crate::model::{ArcDiagram, TraceAction, TraceStep};
use crate::score::decorate;
use cladarc_core::{AreaId, AreaTable, Dendrogram, MemberSet, SimilarityMatrix};

#[derive(Debug, Clone, Copy)]
pub struct PlacementOptions {
    /// Scale constant: a cluster's diameter is `unit / sim_global`.
    pub unit: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self { unit: 1.0 }
    }
}

/// How one sorted cluster relates to the structures built so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementStep {
    /// Every member is new: the cluster starts an independent structure.
    Seed,
    /// The cluster is one existing structure plus a single new area.
    AddMember {
        target: usize,
        new_area: AreaId,
        anchor: AreaId,
    },
    /// The cluster is the disjoint union of two existing structures.
    /// `base` was created earlier and keeps its frame fixed.
    MergeClusters {
        base: usize,
        other: usize,
        anchor_pair: (AreaId, AreaId),
    },
}

/// A finished run together with its per-step trace.
#[derive(Debug, Clone)]
pub struct Placement {
    /// The single surviving structure, covering every area.
    pub root: Cluster,
    pub steps: Vec<TraceStep>,
}

/// Places every area of the paired hierarchies; returns the final structure.
pub fn place(
    local: &Dendrogram,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
    options: &PlacementOptions,
) -> Result<Cluster> {
    run(local, global, matrix, options, None)
}

/// Like [`place`], additionally recording a snapshot after every step for
/// step-by-step consumers.
pub fn place_with_steps(
    local: &Dendrogram,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
    options: &PlacementOptions,
) -> Result<Placement> {
    let mut steps = Vec::new();
    let root = run(local, global, matrix, options, Some(&mut steps))?;
    Ok(Placement { root, steps })
}

fn run(
    local: &Dendrogram,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
    options: &PlacementOptions,
    mut trace: Option<&mut Vec<TraceStep>>,
) -> Result<Cluster> {
    check_universe(local, global, matrix)?;
    let table = matrix.table();

    let stubs: Vec<ClusterStub> = extract_clusters(local)
        .into_iter()
        .filter(|stub| stub.members.len() >= 2)
        .collect();
    if stubs.is_empty() {
        return Err(Error::EmptyHierarchy);
    }

    let mut clusters = stubs
        .iter()
        .map(|stub| decorate(stub, global, matrix, options.unit))
        .collect::<Result<Vec<_>>>()?;
    // Stable: equal similarities keep extraction (post-)order.
    clusters.sort_by(|a, b| b.sim_local.total_cmp(&a.sim_local));

    let mut engine = Engine {
        table,
        matrix,
        structures: Vec::new(),
        placed: MemberSet::default(),
    };

    for cluster in clusters {
        let step = engine.dispatch(&cluster)?;
        tracing::debug!(
            step = ?step,
            members = cluster.members.len(),
            sim_local = cluster.sim_local,
            "placement step"
        );
        let highlighted = engine.apply(&step, cluster);
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(TraceStep {
                action: TraceAction::from_step(&step),
                structures: engine
                    .structures
                    .iter()
                    .map(|s| ArcDiagram::from_cluster(s, table))
                    .collect(),
                highlighted: highlighted.iter().map(|&id| table.label(id).to_string()).collect(),
            });
        }
    }

    match engine.structures.len() {
        1 => Ok(engine.structures.pop().expect("one structure")),
        count => Err(Error::Disconnected { count }),
    }
}

fn check_universe(
    local: &Dendrogram,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
) -> Result<()> {
    if local.table() != matrix.table() || global.table() != matrix.table() {
        return Err(Error::LabelSetMismatch {
            message: "hierarchies and matrix were built over different area tables".to_string(),
        });
    }
    let local_members = local.node(local.root()).members();
    let global_members = global.node(global.root()).members();
    if local_members != global_members {
        return Err(Error::LabelSetMismatch {
            message: format!(
                "local hierarchy covers {{{}}} but global covers {{{}}}",
                format_members(matrix.table(), local_members),
                format_members(matrix.table(), global_members)
            ),
        });
    }
    Ok(())
}

struct Engine<'a> {
    table: &'a AreaTable,
    matrix: &'a SimilarityMatrix,
    /// Active structures in creation order.
    structures: Vec<Cluster>,
    /// Union of all structures' members.
    placed: MemberSet,
}

impl Engine<'_> {
    fn dispatch(&self, cluster: &Cluster) -> Result<PlacementStep> {
        if self.placed.is_disjoint(&cluster.members) {
            return Ok(PlacementStep::Seed);
        }

        for (index, structure) in self.structures.iter().enumerate() {
            if cluster.members.len() == structure.members.len() + 1
                && structure.members.is_subset(&cluster.members)
            {
                let new_area = cluster
                    .members
                    .sole_extra(&structure.members)
                    .expect("one extra member given the length check");
                if self.placed.contains(new_area) {
                    continue;
                }
                let anchor = self.best_anchor(structure, new_area);
                return Ok(PlacementStep::AddMember {
                    target: index,
                    new_area,
                    anchor,
                });
            }
        }

        for base in 0..self.structures.len() {
            for other in (base + 1)..self.structures.len() {
                let union = self.structures[base]
                    .members
                    .union(&self.structures[other].members);
                if union == cluster.members {
                    let anchor_pair =
                        self.best_anchor_pair(&self.structures[base], &self.structures[other]);
                    return Ok(PlacementStep::MergeClusters {
                        base,
                        other,
                        anchor_pair,
                    });
                }
            }
        }

        Err(Error::UnplaceableCluster {
            members: format_members(self.table, &cluster.members),
        })
    }

    /// The placed member most similar (global matrix) to the incoming area.
    /// Ties keep the lowest area index.
    fn best_anchor(&self, structure: &Cluster, new_area: AreaId) -> AreaId {
        let mut best = (f64::NEG_INFINITY, 0);
        for member in structure.members.iter() {
            let sim = self.matrix.get(member, new_area);
            if sim > best.0 {
                best = (sim, member);
            }
        }
        best.1
    }

    /// The cross-structure pair with maximum global similarity. Ties keep the
    /// first pair in member order.
    fn best_anchor_pair(&self, base: &Cluster, other: &Cluster) -> (AreaId, AreaId) {
        let mut best = (f64::NEG_INFINITY, (0, 0));
        for p in base.members.iter() {
            for q in other.members.iter() {
                let sim = self.matrix.get(p, q);
                if sim > best.0 {
                    best = (sim, (p, q));
                }
            }
        }
        best.1
    }

    /// Applies a dispatched step, consuming the decorated cluster. Returns the
    /// newly placed areas for trace highlighting.
    fn apply(&mut self, step: &PlacementStep, cluster: Cluster) -> Vec<AreaId> {
        let newly_placed: Vec<AreaId> = match step {
            PlacementStep::Seed => cluster.members.iter().collect(),
            PlacementStep::AddMember { new_area, .. } => vec![*new_area],
            PlacementStep::MergeClusters { .. } => Vec::new(),
        };

        match *step {
            PlacementStep::Seed => self.seed(cluster),
            PlacementStep::AddMember {
                target,
                new_area,
                anchor,
            } => self.add_member(target, new_area, anchor, cluster),
            PlacementStep::MergeClusters {
                base,
                other,
                anchor_pair,
            } => self.merge(base, other, anchor_pair, cluster),
        }

        self.placed = self
            .structures
            .iter()
            .fold(MemberSet::default(), |acc, s| acc.union(&s.members));
        newly_placed
    }

    /// Distributes the cluster's members along an arc of radius `diameter / 2`
    /// spanning `theta` degrees, centered on the reference midline. Members go
    /// in area-index order.
    fn seed(&mut self, mut cluster: Cluster) {
        let radius = cluster.radius();
        let count = cluster.members.len();
        let start = -cluster.theta / 2.0;
        let step = if count > 1 {
            cluster.theta / (count - 1) as f64
        } else {
            0.0
        };
        for (i, member) in cluster.members.iter().enumerate() {
            cluster
                .points
                .insert(member, polar_point(radius, start + step * i as f64));
        }
        cluster.center = point(0.0, 0.0);
        cluster.midline_angle = 0.0;
        self.structures.push(cluster);
    }

    /// Inserts the new area at the incoming cluster's own radius, fanned out
    /// half the incoming span beyond the anchor, away from the midline. All
    /// prior coordinates stay untouched; the structure's bookkeeping scalars
    /// take the incoming cluster's values.
    fn add_member(&mut self, target: usize, new_area: AreaId, anchor: AreaId, cluster: Cluster) {
        let structure = &mut self.structures[target];
        let anchor_angle = point_angle(structure.points[&anchor]);
        let dir = if anchor_angle >= structure.midline_angle {
            1.0
        } else {
            -1.0
        };
        let angle = anchor_angle + dir * cluster.theta / 2.0;
        let position = polar_point(cluster.radius(), angle);
        tracing::trace!(
            area = self.table.label(new_area),
            anchor = self.table.label(anchor),
            angle,
            radius = cluster.radius(),
            "add member"
        );

        structure.points.insert(new_area, position);
        structure.members = cluster.members;
        structure.sim_local = cluster.sim_local;
        structure.sim_global = cluster.sim_global;
        structure.diameter = cluster.diameter;
        structure.theta = cluster.theta;
        structure.center = point(0.0, 0.0);
        structure.midline_angle = 0.0;
    }

    /// Rigidly rotates the later structure's frame so its anchor lands half
    /// the merged span beyond the base anchor, then takes the union of the
    /// point maps. The base frame never moves; rotation preserves every
    /// radius. (An earlier design rescaled both frames to the merged
    /// diameter; that is gone and must stay gone.)
    fn merge(&mut self, base: usize, other: usize, anchor_pair: (AreaId, AreaId), cluster: Cluster) {
        let (p, q) = anchor_pair;
        let removed = self.structures.remove(other);
        let structure = &mut self.structures[base];

        let p_angle = point_angle(structure.points[&p]);
        let dir = if p_angle >= structure.midline_angle {
            1.0
        } else {
            -1.0
        };
        let rotation = (p_angle + dir * cluster.theta / 2.0) - point_angle(removed.points[&q]);
        tracing::trace!(
            anchor_base = self.table.label(p),
            anchor_other = self.table.label(q),
            rotation,
            "merge structures"
        );

        for (member, position) in removed.points {
            structure
                .points
                .insert(member, rotate_about_origin(position, rotation));
        }
        structure.members = cluster.members;
        structure.sim_local = cluster.sim_local;
        structure.sim_global = cluster.sim_global;
        structure.diameter = cluster.diameter;
        structure.theta = cluster.theta;
        structure.center = point(0.0, 0.0);
        structure.midline_angle = 0.0;
    }
}
