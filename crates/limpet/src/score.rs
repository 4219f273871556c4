//! Similarity resolution and cluster decoration.

use crate::cluster::{Cluster, ClusterStub, format_members};
use crate::error::{Error, Result};
use cladarc_core::{Dendrogram, MemberSet, SimilarityMatrix};

/// Resolves the complementary ("global") similarity for a member set.
///
/// Exact member-set equality against a global hierarchy node wins; otherwise
/// the arithmetic mean of the global matrix over all unordered member pairs.
/// There is no partial/overlap credit and no silent default: a set the
/// fallback cannot score is an error.
pub fn resolve(
    members: &MemberSet,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
) -> Result<f64> {
    if let Some(node) = global.find_by_members(members) {
        return Ok(node.sim());
    }

    if members.len() < 2 {
        return Err(Error::UnresolvableMembers {
            members: format_members(matrix.table(), members),
        });
    }

    let ids = members.as_slice();
    let mut total = 0.0;
    let mut count = 0usize;
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if a as usize >= matrix.len() || b as usize >= matrix.len() {
                return Err(Error::MissingPair {
                    a: label_or_index(matrix, a),
                    b: label_or_index(matrix, b),
                });
            }
            total += matrix.get(a, b);
            count += 1;
        }
    }
    Ok(total / count as f64)
}

fn label_or_index(matrix: &SimilarityMatrix, id: cladarc_core::AreaId) -> String {
    if (id as usize) < matrix.table().len() {
        matrix.table().label(id).to_string()
    } else {
        format!("#{id}")
    }
}

/// Attaches `sim_global`, `diameter` and `theta` to a stub.
///
/// `diameter = unit / sim_global`; a non-positive resolved similarity is a
/// domain error rather than a huge substitute diameter.
pub fn decorate(
    stub: &ClusterStub,
    global: &Dendrogram,
    matrix: &SimilarityMatrix,
    unit: f64,
) -> Result<Cluster> {
    let sim_global = resolve(&stub.members, global, matrix)?;
    if sim_global <= 0.0 {
        return Err(Error::NonPositiveSimilarity {
            members: format_members(matrix.table(), &stub.members),
            sim: sim_global,
        });
    }
    Ok(Cluster::decorated(stub, sim_global, unit / sim_global))
}
