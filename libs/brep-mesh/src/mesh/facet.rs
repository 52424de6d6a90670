//! # Facet Record

use super::geometry::NormalCache;
use super::EdgeId;

/// A mesh facet: a directed cycle of boundary edges.
#[derive(Debug, Clone)]
pub struct Facet {
    pub(crate) name: u32,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) normal: NormalCache,
}

impl Facet {
    pub(crate) fn new(name: u32) -> Self {
        Self {
            name,
            edges: Vec::new(),
            normal: NormalCache::default(),
        }
    }

    /// Stable external identity.
    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    /// Boundary edges in traversal order.
    #[inline]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Number of boundary edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the boundary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
