//! # Domain Conversion
//!
//! Typed conversions between element domains, following the MIN/MAX table:
//!
//! | from → to      | MIN                          | MAX                     |
//! |----------------|------------------------------|-------------------------|
//! | vertex → edge  | both poles selected          | any pole selected       |
//! | edge → vertex  | any pole                     | any pole                |
//! | edge → facet   | whole boundary selected      | any boundary edge       |
//! | facet → edge   | any bounding edge            | any bounding edge       |
//!
//! Dead handles in the source are ignored.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec3;

use crate::mesh::{EdgeId, FacetId, Mesh, Side, VertexId};

use super::{ConvertMode, Domain, Selection};

impl Mesh {
    /// Edges incident to the given vertices; MIN keeps edges whose two poles
    /// are both given.
    pub fn vertices_to_edges(&self, vertices: &BTreeSet<VertexId>, mode: ConvertMode) -> BTreeSet<EdgeId> {
        let mut count: BTreeMap<EdgeId, usize> = BTreeMap::new();
        for v in vertices.iter().filter_map(|&v| self.vertex(v)) {
            for &e in v.fan() {
                *count.entry(e).or_default() += 1;
            }
        }
        count
            .into_iter()
            .filter(|&(_, n)| mode == ConvertMode::Max || n >= 2)
            .map(|(e, _)| e)
            .collect()
    }

    /// Poles of the given edges.
    pub fn edges_to_vertices(&self, edges: &BTreeSet<EdgeId>) -> BTreeSet<VertexId> {
        edges
            .iter()
            .filter_map(|&e| self.edge(e))
            .flat_map(|edge| edge.poles)
            .collect()
    }

    /// Facets bordering the given edges; MIN keeps facets whose whole
    /// boundary is given.
    pub fn edges_to_facets(&self, edges: &BTreeSet<EdgeId>, mode: ConvertMode) -> BTreeSet<FacetId> {
        let mut count: BTreeMap<FacetId, usize> = BTreeMap::new();
        for edge in edges.iter().filter_map(|&e| self.edge(e)) {
            for f in Side::ALL.iter().filter_map(|&s| edge.side(s)) {
                *count.entry(f).or_default() += 1;
            }
        }
        count
            .into_iter()
            .filter(|&(f, n)| match mode {
                ConvertMode::Max => true,
                ConvertMode::Min => self.facet(f).is_some_and(|facet| n >= facet.len()),
            })
            .map(|(f, _)| f)
            .collect()
    }

    /// Boundary edges of the given facets.
    pub fn facets_to_edges(&self, facets: &BTreeSet<FacetId>) -> BTreeSet<EdgeId> {
        facets
            .iter()
            .filter_map(|&f| self.facet(f))
            .flat_map(|facet| facet.edges().iter().copied())
            .collect()
    }

    /// Vertex footprint of any selection. Both modes agree towards vertices.
    pub fn selection_vertices(&self, sel: &Selection) -> BTreeSet<VertexId> {
        match sel {
            Selection::Vertices(set) => set.iter().copied().filter(|&v| self.vertex(v).is_some()).collect(),
            Selection::Edges(set) => self.edges_to_vertices(set),
            Selection::Facets(set) => self.edges_to_vertices(&self.facets_to_edges(set)),
        }
    }

    /// Edge footprint of any selection.
    pub fn selection_edges(&self, sel: &Selection, mode: ConvertMode) -> BTreeSet<EdgeId> {
        match sel {
            Selection::Vertices(set) => self.vertices_to_edges(set, mode),
            Selection::Edges(set) => set.iter().copied().filter(|&e| self.edge(e).is_some()).collect(),
            Selection::Facets(set) => self.facets_to_edges(set),
        }
    }

    /// Facet footprint of any selection.
    pub fn selection_facets(&self, sel: &Selection, mode: ConvertMode) -> BTreeSet<FacetId> {
        match sel {
            Selection::Vertices(set) => self.edges_to_facets(&self.vertices_to_edges(set, mode), mode),
            Selection::Edges(set) => self.edges_to_facets(set, mode),
            Selection::Facets(set) => set.iter().copied().filter(|&f| self.facet(f).is_some()).collect(),
        }
    }

    /// Converts a selection to another domain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{ConvertMode, Domain, Mesh, Selection};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// let all: Selection = mesh.vertices().map(|(id, _)| id).collect::<std::collections::BTreeSet<_>>().into();
    /// let edges = mesh.convert(&all, Domain::Edge, ConvertMode::Max);
    /// assert_eq!(edges.len(), 12);
    /// let back = mesh.convert(&edges, Domain::Vertex, ConvertMode::Min);
    /// assert_eq!(back.len(), 8);
    /// ```
    pub fn convert(&self, sel: &Selection, domain: Domain, mode: ConvertMode) -> Selection {
        match domain {
            Domain::Vertex => Selection::Vertices(self.selection_vertices(sel)),
            Domain::Edge => Selection::Edges(self.selection_edges(sel, mode)),
            Domain::Facet => Selection::Facets(self.selection_facets(sel, mode)),
        }
    }

    /// Dilates a selection by `level` rings of adjacency, then tightens it
    /// back to its own domain with MIN.
    pub fn propagate(&self, sel: &Selection, level: u32) -> Selection {
        let mut current = sel.clone();
        for _ in 0..level {
            let vertices = self.convert(&current, Domain::Vertex, ConvertMode::Max);
            current = self.convert(&vertices, Domain::Facet, ConvertMode::Max);
        }
        if current.domain() != sel.domain() {
            current = self.convert(&current, sel.domain(), ConvertMode::Min);
        }
        current
    }

    /// Mean position of the vertex footprint of a selection, or `None` when
    /// it is empty.
    pub fn center(&self, sel: &Selection) -> Option<DVec3> {
        let vertices = self.selection_vertices(sel);
        if vertices.is_empty() {
            return None;
        }
        let sum: DVec3 = vertices.iter().map(|&v| self.vertex_position(v)).sum();
        Some(sum / vertices.len() as f64)
    }
}
