pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain error: a resolved global similarity of zero would make the
    /// cluster's diameter undefined.
    #[error("cluster {{{members}}} resolved to non-positive global similarity {sim}")]
    NonPositiveSimilarity { members: String, sim: f64 },

    /// Lookup error: the pairwise-average fallback needs an entry the global
    /// matrix does not carry.
    #[error("no global similarity entry for the pair ({a}, {b})")]
    MissingPair { a: String, b: String },

    /// Lookup error: a member set with fewer than two areas cannot be resolved
    /// through the pairwise fallback.
    #[error("cannot resolve a similarity for {{{members}}}: fewer than two members")]
    UnresolvableMembers { members: String },

    /// Structural error: the two hierarchies and the matrix do not share one
    /// area universe.
    #[error("inputs disagree on the area universe: {message}")]
    LabelSetMismatch { message: String },

    /// Structural error: a sorted cluster matches neither dispatch pattern
    /// (fresh seed, one new member, or union of two built structures).
    #[error("cluster {{{members}}} does not fit any placement step")]
    UnplaceableCluster { members: String },

    /// Structural error: the local hierarchy yields no placeable cluster.
    #[error("local hierarchy has no cluster with two or more members")]
    EmptyHierarchy,

    /// Structural error: the absorbed clusters did not converge to a single
    /// structure covering every area.
    #[error("placement finished with {count} disconnected structures")]
    Disconnected { count: usize },
}
