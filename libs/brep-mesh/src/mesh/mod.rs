//! # Mesh Data Structure
//!
//! The mesh owns every vertex, edge and facet of one model together with
//! its named selections, bases and colors. Elements live in generation-checked
//! slotmap arenas, so a handle to a replaced element simply stops resolving.

mod attributes;
mod edge;
mod facet;
mod geometry;
mod topology;
mod vertex;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use glam::DVec3;
use slotmap::{new_key_type, SlotMap};

use crate::config::KernelConfig;
use crate::selection::{Element, Selection};

pub use attributes::{Basis, Color, Instance};
pub use edge::{Edge, Pole, Side};
pub use facet::Facet;
pub use vertex::{Vertex, VertexAttributes};

new_key_type! {
    /// Handle to a vertex.
    pub struct VertexId;
    /// Handle to an edge.
    pub struct EdgeId;
    /// Handle to a facet.
    pub struct FacetId;
}

/// Element counts of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshStats {
    /// Live vertices
    pub vertices: usize,
    /// Live edges
    pub edges: usize,
    /// Live facets
    pub facets: usize,
}

impl MeshStats {
    /// Euler characteristic `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.facets as i64
    }
}

/// A winged boundary-representation mesh.
///
/// # Example
///
/// ```rust
/// use brep_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// mesh.cube(None).unwrap();
/// let stats = mesh.stats();
/// assert_eq!((stats.vertices, stats.edges, stats.facets), (8, 12, 6));
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) edges: SlotMap<EdgeId, Edge>,
    pub(crate) facets: SlotMap<FacetId, Facet>,
    vertex_names: HashMap<u32, VertexId>,
    edge_names: HashMap<u32, EdgeId>,
    facet_names: HashMap<u32, FacetId>,
    next_vertex: u32,
    next_edge: u32,
    next_facet: u32,
    pub(crate) selections: BTreeMap<u32, Selection>,
    pub(crate) bases: BTreeMap<u32, Basis>,
    pub(crate) colors: BTreeMap<u32, Color>,
    /// Fans touched since the last `settle`
    pub(crate) dirty_fans: BTreeSet<VertexId>,
    /// Bumped on every position or topology change; stamps cached normals
    pub(crate) epoch: u64,
    config: KernelConfig,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh with the default configuration.
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    /// Creates an empty mesh whose arenas are sized from `config`.
    pub fn with_config(config: KernelConfig) -> Self {
        let capacity = config.capacity;
        Self {
            vertices: SlotMap::with_capacity_and_key(capacity),
            edges: SlotMap::with_capacity_and_key(config.edge_capacity()),
            facets: SlotMap::with_capacity_and_key(capacity),
            vertex_names: HashMap::with_capacity(capacity),
            edge_names: HashMap::with_capacity(config.edge_capacity()),
            facet_names: HashMap::with_capacity(capacity),
            next_vertex: 0,
            next_edge: 0,
            next_facet: 0,
            selections: BTreeMap::new(),
            bases: BTreeMap::new(),
            colors: BTreeMap::new(),
            dirty_fans: BTreeSet::new(),
            epoch: 0,
            config,
        }
    }

    /// Configuration the mesh was built with.
    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Returns true if the mesh holds no element.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.facets.is_empty()
    }

    /// Counts live elements.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertices.len(),
            edges: self.edges.len(),
            facets: self.facets.len(),
        }
    }

    #[inline]
    pub(crate) fn touch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    // =========================================================================
    // FACTORIES
    // =========================================================================

    /// Adds an unlinked vertex.
    ///
    /// A vertex attached to the root frame (`basis == 0`) cannot carry a
    /// skin ratio; it is forced to 0.
    pub fn new_vertex(&mut self, position: DVec3, basis: u32, skin_ratio: f32, uv: (f32, f32)) -> VertexId {
        debug_assert!(basis > 0 || skin_ratio == 0.0, "root basis has no parent");
        let skin_ratio = if basis == 0 { 0.0 } else { skin_ratio };
        self.new_vertex_with(VertexAttributes {
            position,
            uv,
            basis,
            skin_ratio,
            color: 0,
        })
    }

    /// Adds an unlinked vertex interpolated between `v1` and `v2`.
    ///
    /// See [`VertexAttributes::average`] for how attributes are blended.
    pub fn new_vertex_average(&mut self, v1: VertexId, v2: VertexId, ratio: f64) -> VertexId {
        let attrs = VertexAttributes::average(&self.vertices[v1].attrs, &self.vertices[v2].attrs, ratio);
        self.new_vertex_with(attrs)
    }

    /// Adds an unlinked copy of `v` (same attributes, empty fan).
    pub(crate) fn duplicate_vertex(&mut self, v: VertexId) -> VertexId {
        let attrs = self.vertices[v].attrs;
        self.new_vertex_with(attrs)
    }

    pub(crate) fn new_vertex_with(&mut self, attrs: VertexAttributes) -> VertexId {
        let name = self.next_vertex;
        self.next_vertex += 1;
        let id = self.vertices.insert(Vertex::new(name, attrs));
        self.vertex_names.insert(name, id);
        id
    }

    /// Adds an edge from `v1` (SOUTH) to `v2` (NORTH). No facet is linked.
    pub fn new_edge(&mut self, v1: VertexId, v2: VertexId) -> EdgeId {
        debug_assert_ne!(v1, v2, "an edge joins two distinct vertices");
        let name = self.next_edge;
        self.next_edge += 1;
        let id = self.edges.insert(Edge::new(name, v1, v2));
        self.edge_names.insert(name, id);
        id
    }

    /// Adds a facet bounded by `edges`, given in direct order when `direct`
    /// is true and in reverse order otherwise.
    ///
    /// The side each edge takes is inferred from the shared vertex with the
    /// following edge. Edges receiving their second side enter the fans of
    /// both poles. An empty list builds an empty facet.
    pub fn new_facet(&mut self, edges: &[EdgeId], direct: bool) -> FacetId {
        let f = self.new_empty_facet();
        let ordered: Vec<EdgeId> = if direct {
            edges.to_vec()
        } else {
            edges.iter().rev().copied().collect()
        };
        self.facets[f].edges = ordered.clone();
        for (i, &prev) in ordered.iter().enumerate() {
            let cur = ordered[(i + 1) % ordered.len()];
            let prev_north = self.edges[prev].pole(Pole::North);
            let side = if self.edges[cur].touches(prev_north) {
                Side::West
            } else {
                debug_assert!(
                    self.edges[cur].touches(self.edges[prev].pole(Pole::South)),
                    "consecutive facet edges share a vertex"
                );
                Side::East
            };
            self.edge_add_facet(prev, f, side);
        }
        f
    }

    pub(crate) fn new_empty_facet(&mut self) -> FacetId {
        let name = self.next_facet;
        self.next_facet += 1;
        let id = self.facets.insert(Facet::new(name));
        self.facet_names.insert(name, id);
        self.touch();
        id
    }

    // =========================================================================
    // REPLACEMENT
    // =========================================================================

    /// Destroys `old` and substitutes `rep` for it in every registered
    /// selection that held `old`.
    pub fn replace_vertex(&mut self, old: VertexId, rep: Option<VertexId>) {
        if let Some(v) = self.vertices.remove(old) {
            self.vertex_names.remove(&v.name);
        }
        self.dirty_fans.remove(&old);
        self.replace_in_selections(old, rep);
        self.touch();
    }

    /// Destroys `old` and substitutes `rep` for it in every registered
    /// selection that held `old`.
    pub fn replace_edge(&mut self, old: EdgeId, rep: Option<EdgeId>) {
        if let Some(e) = self.edges.remove(old) {
            self.edge_names.remove(&e.name);
        }
        self.replace_in_selections(old, rep);
        self.touch();
    }

    /// Destroys `old` and substitutes `rep` for it in every registered
    /// selection that held `old`.
    pub fn replace_facet(&mut self, old: FacetId, rep: Option<FacetId>) {
        if let Some(f) = self.facets.remove(old) {
            self.facet_names.remove(&f.name);
        }
        self.replace_in_selections(old, rep);
        self.touch();
    }

    fn replace_in_selections<E: Element>(&mut self, old: E, rep: Option<E>) {
        for sel in self.selections.values_mut() {
            if sel.remove(old) {
                if let Some(rep) = rep {
                    sel.insert(rep);
                }
            }
        }
    }

    // =========================================================================
    // LOOKUP & ENUMERATION
    // =========================================================================

    /// Returns the vertex behind `id`, if alive.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Returns the edge behind `id`, if alive.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Returns the facet behind `id`, if alive.
    #[inline]
    pub fn facet(&self, id: FacetId) -> Option<&Facet> {
        self.facets.get(id)
    }

    /// Live vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    /// Live edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    /// Live facets.
    pub fn facets(&self) -> impl Iterator<Item = (FacetId, &Facet)> {
        self.facets.iter()
    }

    /// Looks a vertex up by its external name.
    pub fn vertex_by_name(&self, name: u32) -> Option<VertexId> {
        self.vertex_names.get(&name).copied()
    }

    /// Looks an edge up by its external name.
    pub fn edge_by_name(&self, name: u32) -> Option<EdgeId> {
        self.edge_names.get(&name).copied()
    }

    /// Looks a facet up by its external name.
    pub fn facet_by_name(&self, name: u32) -> Option<FacetId> {
        self.facet_names.get(&name).copied()
    }

    /// Moves a vertex.
    pub fn set_position(&mut self, v: VertexId, position: DVec3) {
        if let Some(vertex) = self.vertices.get_mut(v) {
            vertex.attrs.position = position;
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests;
