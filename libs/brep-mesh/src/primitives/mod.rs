//! # Primitive Seeds
//!
//! Closed seed shapes a model starts from: the five platonic solids plus
//! two-sided flat triangle and square. Every shape is described by a
//! [`Polyhedron`] table and added through [`Mesh::add_polyhedron`].

mod flat;
mod platonic;

pub use flat::{SQUARE, TRIANGLE};
pub use platonic::{CUBE, DODECAHEDRON, ICOSAHEDRON, OCTAHEDRON, TETRAHEDRON};

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, FacetId, Mesh, VertexId};
use crate::selection::{Domain, Selection};

/// Index tables describing a closed polyhedral shape.
///
/// Edges index `vertices`; facets list edge indices in direct boundary
/// order, consecutive edges sharing a vertex.
#[derive(Debug, Clone, Copy)]
pub struct Polyhedron<'a> {
    /// Vertex positions
    pub vertices: &'a [[f64; 3]],
    /// Edges as (SOUTH, NORTH) vertex indices
    pub edges: &'a [[usize; 2]],
    /// Facet boundaries as edge indices
    pub facets: &'a [&'a [usize]],
}

impl Polyhedron<'_> {
    /// Euler characteristic `V - E + F` of the tables.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.facets.len() as i64
    }

    fn check(&self) -> MeshResult<()> {
        if self.euler_characteristic() != 2 {
            return Err(MeshError::invalid_parameter(
                "add_polyhedron",
                format!("Euler characteristic is {}, expected 2", self.euler_characteristic()),
            ));
        }
        let nv = self.vertices.len();
        if let Some([a, b]) = self.edges.iter().find(|[a, b]| *a >= nv || *b >= nv || a == b) {
            return Err(MeshError::invalid_parameter(
                "add_polyhedron",
                format!("bad edge ({a}, {b}) over {nv} vertices"),
            ));
        }
        let ne = self.edges.len();
        if self.facets.iter().any(|f| f.len() < 2 || f.iter().any(|&e| e >= ne)) {
            return Err(MeshError::invalid_parameter("add_polyhedron", "bad facet boundary"));
        }
        Ok(())
    }
}

impl Mesh {
    /// Adds a closed shape described by `shape`.
    ///
    /// When `selection` is given, the new elements of its domain are added
    /// to it; a missing selection is created as a facet selection.
    pub fn add_polyhedron(&mut self, shape: &Polyhedron<'_>, selection: Option<u32>) -> MeshResult<()> {
        shape.check()?;
        if let Some(id) = selection {
            if self.selection(id).is_none() {
                self.new_selection(id, Domain::Facet)?;
            }
        }

        let vertices: Vec<VertexId> = shape
            .vertices
            .iter()
            .map(|&[x, y, z]| self.new_vertex(DVec3::new(x, y, z), 0, 0.0, (0.0, 0.0)))
            .collect();
        let edges: Vec<EdgeId> = shape
            .edges
            .iter()
            .map(|&[a, b]| self.new_edge(vertices[a], vertices[b]))
            .collect();
        let facets: Vec<FacetId> = shape
            .facets
            .iter()
            .map(|boundary| {
                let ring: Vec<EdgeId> = boundary.iter().map(|&e| edges[e]).collect();
                self.new_facet(&ring, true)
            })
            .collect();
        self.settle();
        log::debug!(
            "added polyhedron: {} vertices, {} edges, {} facets",
            vertices.len(),
            edges.len(),
            facets.len()
        );

        if let Some(id) = selection {
            let added = match self.selection(id).map(Selection::domain) {
                Some(Domain::Vertex) => Selection::Vertices(vertices.into_iter().collect()),
                Some(Domain::Edge) => Selection::Edges(edges.into_iter().collect()),
                _ => Selection::Facets(facets.into_iter().collect()),
            };
            if let Some(sel) = self.selections.get_mut(&id) {
                sel.union_with(&added);
            }
        }
        Ok(())
    }

    /// Adds a regular tetrahedron inscribed in the unit cube.
    pub fn tetrahedron(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&TETRAHEDRON, selection)
    }

    /// Adds a unit cube centered on the origin.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::Mesh;
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(Some(1)).unwrap();
    /// assert_eq!(mesh.selection(1).unwrap().len(), 6);
    /// ```
    pub fn cube(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&CUBE, selection)
    }

    /// Adds a regular octahedron with vertices at distance 0.5 on each axis.
    pub fn octahedron(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&OCTAHEDRON, selection)
    }

    /// Adds a regular icosahedron centered on the origin.
    pub fn icosahedron(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&ICOSAHEDRON, selection)
    }

    /// Adds a regular dodecahedron centered on the origin.
    pub fn dodecahedron(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&DODECAHEDRON, selection)
    }

    /// Adds a two-sided equilateral triangle inscribed in the unit circle of
    /// the XY plane.
    pub fn triangle(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&TRIANGLE, selection)
    }

    /// Adds a two-sided square of side 2 in the XY plane.
    pub fn square(&mut self, selection: Option<u32>) -> MeshResult<()> {
        self.add_polyhedron(&SQUARE, selection)
    }
}
