//! Binary clustering trees stored as an index-addressed node arena.

use crate::area::{AreaId, AreaTable, MemberSet};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
pub struct DendroNode {
    members: MemberSet,
    sim: f64,
    children: Option<(NodeId, NodeId)>,
}

impl DendroNode {
    pub fn members(&self) -> &MemberSet {
        &self.members
    }

    /// Similarity at which this node's children were joined. `1.0` for leaves
    /// (a leaf is trivially similar to itself).
    pub fn sim(&self) -> f64 {
        self.sim
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// An immutable binary clustering tree over an [`AreaTable`].
///
/// Built once through [`DendrogramBuilder`] (or [`crate::linkage::cluster`])
/// and treated as read-only afterwards. The builder enforces the structural
/// invariant that an internal node's member set is exactly the disjoint union
/// of its children's member sets.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    table: AreaTable,
    nodes: Vec<DendroNode>,
    root: NodeId,
}

impl Dendrogram {
    pub fn table(&self) -> &AreaTable {
        &self.table
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &DendroNode {
        &self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Post-order traversal from the root: children before parents.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.post_order_into(self.root, &mut out);
        out
    }

    fn post_order_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some((left, right)) = self.node(id).children {
            self.post_order_into(left, out);
            self.post_order_into(right, out);
        }
        out.push(id);
    }

    /// The node whose member set equals `members` exactly, if any. Member sets
    /// are unique within a well-formed tree, so the first hit is the only one.
    pub fn find_by_members(&self, members: &MemberSet) -> Option<&DendroNode> {
        self.nodes.iter().find(|n| n.members() == members)
    }
}

/// Grows a [`Dendrogram`] bottom-up: leaves first, then joins.
#[derive(Debug)]
pub struct DendrogramBuilder {
    table: AreaTable,
    nodes: Vec<DendroNode>,
    /// Nodes not yet consumed by a join; exactly one must remain at `build`.
    open: Vec<NodeId>,
}

impl DendrogramBuilder {
    pub fn new(table: &AreaTable) -> Self {
        Self {
            table: table.clone(),
            nodes: Vec::new(),
            open: Vec::new(),
        }
    }

    pub fn leaf(&mut self, label: &str) -> Result<NodeId> {
        let id = self.table.id(label)?;
        self.leaf_id(id)
    }

    pub fn leaf_id(&mut self, id: AreaId) -> Result<NodeId> {
        if id as usize >= self.table.len() {
            return Err(Error::InvalidDendrogram {
                message: format!("area id {id} out of range"),
            });
        }
        let node = NodeId(self.nodes.len() as u32);
        self.nodes.push(DendroNode {
            members: MemberSet::singleton(id),
            sim: 1.0,
            children: None,
        });
        self.open.push(node);
        Ok(node)
    }

    /// Joins two open subtrees. The builder is left untouched on error.
    pub fn join(&mut self, left: NodeId, right: NodeId, sim: f64) -> Result<NodeId> {
        if !(0.0..=1.0).contains(&sim) {
            return Err(Error::InvalidDendrogram {
                message: format!("join similarity {sim} outside [0, 1]"),
            });
        }
        for id in [left, right] {
            if !self.open.contains(&id) {
                return Err(Error::InvalidDendrogram {
                    message: format!("node {} already joined or unknown", id.0),
                });
            }
        }

        let (lm, rm) = (
            self.nodes[left.0 as usize].members.clone(),
            self.nodes[right.0 as usize].members.clone(),
        );
        if !lm.is_disjoint(&rm) {
            return Err(Error::InvalidDendrogram {
                message: "joined children share members".to_string(),
            });
        }
        self.open.retain(|&n| n != left && n != right);

        let node = NodeId(self.nodes.len() as u32);
        self.nodes.push(DendroNode {
            members: lm.union(&rm),
            sim,
            children: Some((left, right)),
        });
        self.open.push(node);
        Ok(node)
    }

    pub fn build(self) -> Result<Dendrogram> {
        match self.open.as_slice() {
            [root] => Ok(Dendrogram {
                root: *root,
                table: self.table,
                nodes: self.nodes,
            }),
            [] => Err(Error::InvalidDendrogram {
                message: "empty dendrogram".to_string(),
            }),
            open => Err(Error::InvalidDendrogram {
                message: format!("{} unjoined subtrees remain", open.len()),
            }),
        }
    }
}
