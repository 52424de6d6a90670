//! # Edge Cuts
//!
//! Subdivides edges by inserting vertices, either evenly spaced along each
//! selected edge or where edges cross a plane.

use std::collections::BTreeSet;

use config::constants::EPSILON;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, Mesh, Pole};
use crate::selection::{ConvertMode, Selection};

impl Mesh {
    /// Inserts `n` evenly spaced vertices on every edge of selection `id`.
    /// The result holds the new vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Domain, Mesh};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// mesh.new_selection(1, Domain::Edge).unwrap();
    /// let first = mesh.edges().next().map(|(_, e)| e.name()).unwrap();
    /// mesh.add_single(1, first).unwrap();
    ///
    /// mesh.cut(1, 3, Some(2)).unwrap();
    /// assert_eq!(mesh.selection(2).unwrap().len(), 3);
    /// assert_eq!(mesh.stats().edges, 15);
    /// ```
    pub fn cut(&mut self, id: u32, n: u32, result: Option<u32>) -> MeshResult<()> {
        if n == 0 {
            return Err(MeshError::invalid_parameter("cut", "at least one cut is required"));
        }
        let edges = self.selection_required::<EdgeId>(id, "cut")?;
        self.result_required(result, "cut")?;
        let mut vertices = BTreeSet::new();
        for &e in &edges {
            // e keeps shrinking toward its SOUTH pole
            for i in 0..n {
                self.edge_cut(e, 1.0 - 1.0 / f64::from(n + 1 - i));
                vertices.insert(self.edge_pole(e, Pole::North));
            }
        }
        self.settle();
        log::debug!("cut {} edges {} times", edges.len(), n);
        self.output_selection(id, result, Selection::Vertices(vertices))
    }

    /// Cuts every edge of selection `id` (converted with MAX) crossing the
    /// plane through `center` orthogonal to `normal`, at the crossing point.
    ///
    /// The result holds the NORTH pole of every edge meeting the plane. For a
    /// cut edge that is the inserted vertex; edges lying on the plane are
    /// kept too, so a closed section yields a closed loop.
    pub fn plane_cut(&mut self, id: u32, center: DVec3, normal: DVec3, result: Option<u32>) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        self.result_required(result, "plane_cut")?;
        let edges = self.selection_edges(&sel, ConvertMode::Max);
        let mut vertices = BTreeSet::new();
        let mut cuts = 0;
        for &e in &edges {
            let ss = (self.vertex_position(self.edge_pole(e, Pole::South)) - center).dot(normal);
            let sn = (self.vertex_position(self.edge_pole(e, Pole::North)) - center).dot(normal);
            let product = ss * sn;
            if product < -EPSILON {
                self.edge_cut(e, (ss / (ss - sn)).abs());
                cuts += 1;
            }
            // strict: a product of exactly EPSILON is off the plane
            if product < EPSILON {
                vertices.insert(self.edge_pole(e, Pole::North));
            }
        }
        self.settle();
        log::debug!("plane cut: {} of {} edges crossed", cuts, edges.len());
        self.output_selection(id, result, Selection::Vertices(vertices))
    }
}
