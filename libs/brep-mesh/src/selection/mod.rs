//! # Selections
//!
//! A selection is a set of element handles over exactly one domain. It never
//! owns elements: handles of replaced elements are removed from registered
//! selections by the mesh, and stop resolving everywhere else.
//!
//! ## Conversion
//!
//! ```text
//! vertex ──MIN: both poles──▶ edge ──MIN: whole boundary──▶ facet
//! vertex ◀──── any pole ───── edge ◀──── any boundary ───── facet
//! ```
//!
//! Vertex↔facet conversions always go through edges.

mod convert;
mod registry;

use std::collections::BTreeSet;
use std::fmt;

use crate::mesh::{EdgeId, FacetId, Mesh, VertexId};

/// Element domain of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    /// Vertices
    Vertex,
    /// Edges
    Edge,
    /// Facets
    Facet,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Vertex => write!(f, "vertex"),
            Domain::Edge => write!(f, "edge"),
            Domain::Facet => write!(f, "facet"),
        }
    }
}

/// Policy used when mapping a selection onto another domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvertMode {
    /// Keep elements fully covered by the source ("all of")
    Min,
    /// Keep elements touched by the source ("any of")
    Max,
}

/// A set of elements of one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Vertex selection
    Vertices(BTreeSet<VertexId>),
    /// Edge selection
    Edges(BTreeSet<EdgeId>),
    /// Facet selection
    Facets(BTreeSet<FacetId>),
}

/// Element handle types that can be held in a [`Selection`].
pub trait Element: slotmap::Key + Ord {
    /// Domain of the element.
    const DOMAIN: Domain;

    /// Typed view of a selection of this domain.
    fn set(sel: &Selection) -> Option<&BTreeSet<Self>>;

    /// Mutable typed view of a selection of this domain.
    fn set_mut(sel: &mut Selection) -> Option<&mut BTreeSet<Self>>;

    /// Wraps a typed set.
    fn wrap(set: BTreeSet<Self>) -> Selection;

    /// Returns true if the element is alive in `mesh`.
    fn is_alive(self, mesh: &Mesh) -> bool;

    /// External name of a live element.
    fn name(self, mesh: &Mesh) -> Option<u32>;

    /// Resolves an external name.
    fn by_name(mesh: &Mesh, name: u32) -> Option<Self>;

    /// Every live element of the domain.
    fn all(mesh: &Mesh) -> BTreeSet<Self>;
}

impl Element for VertexId {
    const DOMAIN: Domain = Domain::Vertex;

    fn set(sel: &Selection) -> Option<&BTreeSet<Self>> {
        match sel {
            Selection::Vertices(set) => Some(set),
            _ => None,
        }
    }

    fn set_mut(sel: &mut Selection) -> Option<&mut BTreeSet<Self>> {
        match sel {
            Selection::Vertices(set) => Some(set),
            _ => None,
        }
    }

    fn wrap(set: BTreeSet<Self>) -> Selection {
        Selection::Vertices(set)
    }

    fn is_alive(self, mesh: &Mesh) -> bool {
        mesh.vertex(self).is_some()
    }

    fn name(self, mesh: &Mesh) -> Option<u32> {
        mesh.vertex(self).map(|v| v.name())
    }

    fn by_name(mesh: &Mesh, name: u32) -> Option<Self> {
        mesh.vertex_by_name(name)
    }

    fn all(mesh: &Mesh) -> BTreeSet<Self> {
        mesh.vertices().map(|(id, _)| id).collect()
    }
}

impl Element for EdgeId {
    const DOMAIN: Domain = Domain::Edge;

    fn set(sel: &Selection) -> Option<&BTreeSet<Self>> {
        match sel {
            Selection::Edges(set) => Some(set),
            _ => None,
        }
    }

    fn set_mut(sel: &mut Selection) -> Option<&mut BTreeSet<Self>> {
        match sel {
            Selection::Edges(set) => Some(set),
            _ => None,
        }
    }

    fn wrap(set: BTreeSet<Self>) -> Selection {
        Selection::Edges(set)
    }

    fn is_alive(self, mesh: &Mesh) -> bool {
        mesh.edge(self).is_some()
    }

    fn name(self, mesh: &Mesh) -> Option<u32> {
        mesh.edge(self).map(|e| e.name())
    }

    fn by_name(mesh: &Mesh, name: u32) -> Option<Self> {
        mesh.edge_by_name(name)
    }

    fn all(mesh: &Mesh) -> BTreeSet<Self> {
        mesh.edges().map(|(id, _)| id).collect()
    }
}

impl Element for FacetId {
    const DOMAIN: Domain = Domain::Facet;

    fn set(sel: &Selection) -> Option<&BTreeSet<Self>> {
        match sel {
            Selection::Facets(set) => Some(set),
            _ => None,
        }
    }

    fn set_mut(sel: &mut Selection) -> Option<&mut BTreeSet<Self>> {
        match sel {
            Selection::Facets(set) => Some(set),
            _ => None,
        }
    }

    fn wrap(set: BTreeSet<Self>) -> Selection {
        Selection::Facets(set)
    }

    fn is_alive(self, mesh: &Mesh) -> bool {
        mesh.facet(self).is_some()
    }

    fn name(self, mesh: &Mesh) -> Option<u32> {
        mesh.facet(self).map(|f| f.name())
    }

    fn by_name(mesh: &Mesh, name: u32) -> Option<Self> {
        mesh.facet_by_name(name)
    }

    fn all(mesh: &Mesh) -> BTreeSet<Self> {
        mesh.facets().map(|(id, _)| id).collect()
    }
}

impl Selection {
    /// Creates an empty selection of the given domain.
    pub fn new(domain: Domain) -> Self {
        match domain {
            Domain::Vertex => Selection::Vertices(BTreeSet::new()),
            Domain::Edge => Selection::Edges(BTreeSet::new()),
            Domain::Facet => Selection::Facets(BTreeSet::new()),
        }
    }

    /// Domain of the selection.
    pub fn domain(&self) -> Domain {
        match self {
            Selection::Vertices(_) => Domain::Vertex,
            Selection::Edges(_) => Domain::Edge,
            Selection::Facets(_) => Domain::Facet,
        }
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        match self {
            Selection::Vertices(set) => set.len(),
            Selection::Edges(set) => set.len(),
            Selection::Facets(set) => set.len(),
        }
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deselects everything, keeping the domain.
    pub fn clear(&mut self) {
        *self = Selection::new(self.domain());
    }

    /// Typed view; `None` when the domain differs.
    pub fn get<E: Element>(&self) -> Option<&BTreeSet<E>> {
        E::set(self)
    }

    /// Selected vertices, if this is a vertex selection.
    pub fn vertices(&self) -> Option<&BTreeSet<VertexId>> {
        VertexId::set(self)
    }

    /// Selected edges, if this is an edge selection.
    pub fn edges(&self) -> Option<&BTreeSet<EdgeId>> {
        EdgeId::set(self)
    }

    /// Selected facets, if this is a facet selection.
    pub fn facets(&self) -> Option<&BTreeSet<FacetId>> {
        FacetId::set(self)
    }

    /// Returns true if `id` is selected.
    pub fn contains<E: Element>(&self, id: E) -> bool {
        E::set(self).is_some_and(|set| set.contains(&id))
    }

    /// Selects `id`; returns false if it was already selected or belongs to
    /// another domain.
    pub fn insert<E: Element>(&mut self, id: E) -> bool {
        E::set_mut(self).is_some_and(|set| set.insert(id))
    }

    /// Deselects `id`; returns true if it was selected.
    pub fn remove<E: Element>(&mut self, id: E) -> bool {
        E::set_mut(self).is_some_and(|set| set.remove(&id))
    }

    /// Flips the membership of `id`.
    pub fn toggle<E: Element>(&mut self, id: E) {
        if let Some(set) = E::set_mut(self) {
            if !set.remove(&id) {
                set.insert(id);
            }
        }
    }

    /// Adds every element of `other`, which must share the domain.
    pub fn union_with(&mut self, other: &Selection) {
        match (self, other) {
            (Selection::Vertices(a), Selection::Vertices(b)) => a.extend(b.iter().copied()),
            (Selection::Edges(a), Selection::Edges(b)) => a.extend(b.iter().copied()),
            (Selection::Facets(a), Selection::Facets(b)) => a.extend(b.iter().copied()),
            (dest, src) => log::warn!("cannot merge a {} selection into a {} one", src.domain(), dest.domain()),
        }
    }

    /// Removes every element of `other`, which must share the domain.
    pub fn subtract(&mut self, other: &Selection) {
        match (self, other) {
            (Selection::Vertices(a), Selection::Vertices(b)) => a.retain(|x| !b.contains(x)),
            (Selection::Edges(a), Selection::Edges(b)) => a.retain(|x| !b.contains(x)),
            (Selection::Facets(a), Selection::Facets(b)) => a.retain(|x| !b.contains(x)),
            (dest, src) => log::warn!("cannot subtract a {} selection from a {} one", src.domain(), dest.domain()),
        }
    }
}

impl From<BTreeSet<VertexId>> for Selection {
    fn from(set: BTreeSet<VertexId>) -> Self {
        Selection::Vertices(set)
    }
}

impl From<BTreeSet<EdgeId>> for Selection {
    fn from(set: BTreeSet<EdgeId>) -> Self {
        Selection::Edges(set)
    }
}

impl From<BTreeSet<FacetId>> for Selection {
    fn from(set: BTreeSet<FacetId>) -> Self {
        Selection::Facets(set)
    }
}

#[cfg(test)]
mod tests;
