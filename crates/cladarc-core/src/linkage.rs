//! Greedy agglomerative clustering in similarity space.
//!
//! Works directly on a [`SimilarityMatrix`] (no similarity→distance detour):
//! repeatedly merge the pair of active clusters with the highest linkage
//! similarity until a single cluster remains. O(n³) over tens of areas.

use crate::area::MemberSet;
use crate::dendrogram::{Dendrogram, DendrogramBuilder, NodeId};
use crate::error::Result;
use crate::matrix::SimilarityMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linkage {
    /// Mean over all cross-cluster pairs.
    #[default]
    Average,
    /// Maximum over all cross-cluster pairs (single linkage).
    Single,
    /// Minimum over all cross-cluster pairs (complete linkage).
    Complete,
}

impl Linkage {
    fn between(self, matrix: &SimilarityMatrix, a: &MemberSet, b: &MemberSet) -> f64 {
        let mut acc: f64 = match self {
            Linkage::Average => 0.0,
            Linkage::Single => 0.0,
            Linkage::Complete => 1.0,
        };
        let mut count = 0usize;
        for x in a.iter() {
            for y in b.iter() {
                let s = matrix.get(x, y);
                match self {
                    Linkage::Average => acc += s,
                    Linkage::Single => acc = acc.max(s),
                    Linkage::Complete => acc = acc.min(s),
                }
                count += 1;
            }
        }
        match self {
            Linkage::Average => acc / count as f64,
            _ => acc,
        }
    }
}

/// One merge of the clustering run, in merge order. Serializable for
/// step-by-step matrix views.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LinkageStep {
    pub left: MemberSet,
    pub right: MemberSet,
    pub sim: f64,
}

/// Clusters the matrix's areas into a [`Dendrogram`], also returning the merge
/// log for step-by-step matrix views.
///
/// Ties on the best similarity go to the earliest pair in scan order, where
/// active clusters are scanned in creation order (leaves in table order, then
/// merged clusters oldest-first). No randomness anywhere.
pub fn cluster(
    matrix: &SimilarityMatrix,
    linkage: Linkage,
) -> Result<(Dendrogram, Vec<LinkageStep>)> {
    let mut builder = DendrogramBuilder::new(matrix.table());
    let mut active: Vec<(NodeId, MemberSet)> = Vec::with_capacity(matrix.len());
    for id in matrix.table().ids() {
        let node = builder.leaf_id(id)?;
        active.push((node, MemberSet::singleton(id)));
    }

    let mut steps = Vec::with_capacity(active.len().saturating_sub(1));
    while active.len() > 1 {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let sim = linkage.between(matrix, &active[i].1, &active[j].1);
                if best.is_none_or(|(_, _, b)| sim > b) {
                    best = Some((i, j, sim));
                }
            }
        }
        let (i, j, sim) = best.expect("at least two active clusters");

        let (right_node, right_members) = active.remove(j);
        let (left_node, left_members) = active.remove(i);
        tracing::debug!(
            sim,
            left = left_members.len(),
            right = right_members.len(),
            "linkage merge"
        );

        let merged = builder.join(left_node, right_node, sim)?;
        steps.push(LinkageStep {
            left: left_members.clone(),
            right: right_members.clone(),
            sim,
        });
        active.push((merged, left_members.union(&right_members)));
    }

    Ok((builder.build()?, steps))
}
