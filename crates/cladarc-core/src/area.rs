//! Area label interning and canonical member sets.
//!
//! All matrices, dendrograms and placements for one run are built over a single
//! [`AreaTable`], so member-set comparisons reduce to comparing small sorted
//! index vectors instead of string sets.

use crate::error::{Error, Result};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

pub type AreaId = u32;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Interns area labels to dense `u32` indices, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AreaTable {
    labels: FxIndexSet<String>,
}

/// Order-sensitive: ids are positional, so the same labels in a different
/// order are a different table. (`IndexSet`'s own equality ignores order.)
impl PartialEq for AreaTable {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len() && self.labels.iter().eq(other.labels.iter())
    }
}

impl Eq for AreaTable {}

impl AreaTable {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = FxIndexSet::default();
        for label in labels {
            let label = label.into();
            if !set.insert(label.clone()) {
                return Err(Error::DuplicateArea { label });
            }
        }
        if set.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { labels: set })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn id(&self, label: &str) -> Result<AreaId> {
        self.labels
            .get_index_of(label)
            .map(|i| i as AreaId)
            .ok_or_else(|| Error::UnknownArea {
                label: label.to_string(),
            })
    }

    /// Panics if `id` is out of range; ids only come from this table.
    pub fn label(&self, id: AreaId) -> &str {
        self.labels
            .get_index(id as usize)
            .map(String::as_str)
            .expect("area id out of range")
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = AreaId> {
        0..self.labels.len() as AreaId
    }
}

/// A set of area ids in canonical form: sorted, deduplicated.
///
/// Derived equality/hashing is meaningful because the representation is
/// canonical; two sets over the same [`AreaTable`] are equal iff they cover the
/// same areas. Serializes as a plain id array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberSet {
    ids: Vec<AreaId>,
}

impl MemberSet {
    pub fn singleton(id: AreaId) -> Self {
        Self { ids: vec![id] }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: AreaId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[AreaId] {
        &self.ids
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut ids = Vec::with_capacity(self.ids.len() + other.ids.len());
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            match self.ids[i].cmp(&other.ids[j]) {
                std::cmp::Ordering::Less => {
                    ids.push(self.ids[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    ids.push(other.ids[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    ids.push(self.ids[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        ids.extend_from_slice(&self.ids[i..]);
        ids.extend_from_slice(&other.ids[j..]);
        Self { ids }
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            match self.ids[i].cmp(&other.ids[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return false,
            }
        }
        true
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.ids.iter().all(|id| other.contains(*id))
    }

    /// The single id in `self` and not in `other`, if there is exactly one.
    pub fn sole_extra(&self, other: &Self) -> Option<AreaId> {
        let mut extra = None;
        for id in &self.ids {
            if !other.contains(*id) {
                if extra.is_some() {
                    return None;
                }
                extra = Some(*id);
            }
        }
        extra
    }
}

impl FromIterator<AreaId> for MemberSet {
    fn from_iter<I: IntoIterator<Item = AreaId>>(iter: I) -> Self {
        let mut ids: Vec<AreaId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}
