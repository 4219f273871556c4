#![forbid(unsafe_code)]

//! Data model for cladarc: interned area labels, validated similarity matrices,
//! presence/absence indices and agglomerative dendrograms.
//!
//! Everything here is headless and deterministic. Matrices and dendrograms are
//! built once, validated on entry and treated as read-only by the placement
//! engine (`limpet`).

pub mod area;
pub mod dendrogram;
pub mod error;
pub mod linkage;
pub mod matrix;
pub mod presence;

pub use area::{AreaId, AreaTable, MemberSet};
pub use dendrogram::{Dendrogram, DendrogramBuilder, NodeId};
pub use error::{Error, Result};
pub use linkage::{Linkage, LinkageStep, cluster};
pub use matrix::SimilarityMatrix;
pub use presence::PresenceMatrix;
