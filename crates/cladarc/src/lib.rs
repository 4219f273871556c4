#![forbid(unsafe_code)]

//! `cladarc` turns two hierarchical clusterings of the same areas into one
//! arc diagram: angular separation encodes the local hierarchy, radial
//! distance the global one.
//!
//! The heavy lifting lives in the member crates — `cladarc-core` (matrices,
//! indices, dendrograms) and `limpet` (the placement engine). This crate
//! re-exports both and wires them into end-to-end pipelines; rendering the
//! resulting [`layout::ArcDiagram`] is left to the caller.

pub use cladarc_core::*;

pub mod layout {
    pub use limpet::{
        ArcDiagram, Bounds, Cluster, ClusterStub, ConcentricDiagram, ConcentricLine, LayoutPoint,
        MergePoint, Placement, PlacementOptions, PlacementStep, TraceAction, TraceStep,
        concentric_diagram, extract_clusters, place, place_with_steps,
    };
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] cladarc_core::Error),
    #[error(transparent)]
    Layout(#[from] limpet::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Full pipeline: cluster both matrices, place, snapshot.
///
/// Both matrices must be built over the same area table (same labels, same
/// order). The global matrix doubles as the resolver's pairwise fallback.
pub fn diagram_from_matrices(
    local: &SimilarityMatrix,
    global: &SimilarityMatrix,
    linkage: Linkage,
    options: &layout::PlacementOptions,
) -> Result<layout::ArcDiagram> {
    let (local_dendro, _) = cluster(local, linkage)?;
    let (global_dendro, _) = cluster(global, linkage)?;
    let root = limpet::place(&local_dendro, &global_dendro, global, options)?;
    Ok(layout::ArcDiagram::from_cluster(&root, global.table()))
}

/// Like [`diagram_from_matrices`], but keeps every intermediate state for
/// step-by-step viewers.
pub fn trace_from_matrices(
    local: &SimilarityMatrix,
    global: &SimilarityMatrix,
    linkage: Linkage,
    options: &layout::PlacementOptions,
) -> Result<Vec<layout::TraceStep>> {
    let (local_dendro, _) = cluster(local, linkage)?;
    let (global_dendro, _) = cluster(global, linkage)?;
    let placement = limpet::place_with_steps(&local_dendro, &global_dendro, global, options)?;
    Ok(placement.steps)
}

/// Full pipeline ending in the concentric-ring rendition.
pub fn concentric_from_matrices(
    local: &SimilarityMatrix,
    global: &SimilarityMatrix,
    linkage: Linkage,
    options: &layout::PlacementOptions,
) -> Result<layout::ConcentricDiagram> {
    let (local_dendro, _) = cluster(local, linkage)?;
    let (global_dendro, _) = cluster(global, linkage)?;
    let root = limpet::place(&local_dendro, &global_dendro, global, options)?;
    Ok(limpet::concentric_diagram(
        &local_dendro,
        &global_dendro,
        global,
        &root,
    )?)
}

/// Pipeline starting from presence/absence data: Jaccard similarity on both
/// sheets, then [`diagram_from_matrices`]. The sheets must list the same
/// areas in the same order.
pub fn diagram_from_presence(
    local: &PresenceMatrix,
    global: &PresenceMatrix,
    linkage: Linkage,
    options: &layout::PlacementOptions,
) -> Result<layout::ArcDiagram> {
    diagram_from_matrices(&local.jaccard(), &global.jaccard(), linkage, options)
}
