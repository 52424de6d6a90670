//! # Mirror
//!
//! Reflects the surface through the plane of a seed facet. The seed is
//! removed and its boundary becomes the seam shared by the original and the
//! reflected halves.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, FacetId, Mesh, Pole, VertexId};
use crate::selection::{Domain, Selection};

/// Memoized reflection of the original elements.
#[derive(Default)]
struct Reflection {
    vertices: BTreeMap<VertexId, VertexId>,
    edges: BTreeMap<EdgeId, EdgeId>,
    facets: BTreeMap<FacetId, FacetId>,
}

impl Mesh {
    /// Mirrors the mesh through the plane of the first facet of selection
    /// `id`.
    ///
    /// The result holds the reflected elements in the domain of the existing
    /// `result` selection, or facets when it does not exist yet.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::Mesh;
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(Some(1)).unwrap();
    /// mesh.mirror(1, Some(2)).unwrap();
    ///
    /// assert_eq!(mesh.selection(2).unwrap().len(), 5);
    /// let stats = mesh.stats();
    /// assert_eq!((stats.vertices, stats.edges, stats.facets), (12, 20, 10));
    /// mesh.validate().unwrap();
    /// ```
    pub fn mirror(&mut self, id: u32, result: Option<u32>) -> MeshResult<()> {
        let facets = self.selection_required::<FacetId>(id, "mirror")?;
        let seed = *facets.first().ok_or(MeshError::EmptySelection { operation: "mirror" })?;
        self.result_required(result, "mirror")?;
        let domain = result
            .and_then(|r| self.selection(r))
            .map_or(Domain::Facet, |sel| sel.domain());

        let reflection = self.mirror_facet(seed);
        let mut out = Selection::new(domain);
        match &mut out {
            Selection::Vertices(set) => set.extend(reflection.vertices.iter().filter(|(o, m)| o != m).map(|(_, m)| *m)),
            Selection::Edges(set) => set.extend(reflection.edges.iter().filter(|(o, m)| o != m).map(|(_, m)| *m)),
            Selection::Facets(set) => set.extend(reflection.facets.values().copied()),
        }
        self.output_selection(id, result, out)
    }

    fn mirror_facet(&mut self, seed: FacetId) -> Reflection {
        self.settle();
        let center = self.facet_center(seed);
        let normal = self.facet_normal(seed);
        let mut reflection = Reflection::default();

        // the seam maps onto itself
        let mut pending = Vec::new();
        let seam: Vec<EdgeId> = self.facet(seed).map(|f| f.edges().to_vec()).unwrap_or_default();
        for (i, &e) in seam.iter().enumerate() {
            let v = self.facet_vertex(seed, i);
            reflection.vertices.insert(v, v);
            reflection.edges.insert(e, e);
            pending.extend(self.facet_neighbor(seed, i));
        }
        for &e in &seam {
            self.edge_remove_facet(e, seed);
        }
        self.replace_facet(seed, None);
        pending.reverse();

        let mut created = BTreeSet::new();
        while let Some(f) = pending.pop() {
            if created.contains(&f) || reflection.facets.contains_key(&f) {
                continue;
            }
            let boundary: Vec<EdgeId> = self.facets[f].edges().to_vec();
            let mut mirrored = Vec::with_capacity(boundary.len());
            for &e in &boundary {
                let m = match reflection.edges.get(&e).copied() {
                    Some(m) => m,
                    None => {
                        let [south, north] = Pole::ALL.map(|p| {
                            let v = self.edge_pole(e, p);
                            self.mirror_vertex(&mut reflection, v, center, normal)
                        });
                        let m = self.new_edge(south, north);
                        reflection.edges.insert(e, m);
                        m
                    }
                };
                mirrored.push(m);
            }
            let image = self.new_facet(&mirrored, false);
            reflection.facets.insert(f, image);
            created.insert(image);
            for i in (0..boundary.len()).rev() {
                if let Some(next) = self.facet_neighbor(f, i) {
                    if next != image {
                        pending.push(next);
                    }
                }
            }
        }
        self.settle();
        log::debug!(
            "mirror: {} facets, {} vertices reflected",
            reflection.facets.len(),
            reflection.vertices.iter().filter(|(o, m)| o != m).count()
        );
        reflection
    }

    fn mirror_vertex(&mut self, reflection: &mut Reflection, v: VertexId, center: DVec3, normal: DVec3) -> VertexId {
        if let Some(&m) = reflection.vertices.get(&v) {
            return m;
        }
        let mut attrs = self.vertices[v].attrs;
        let s = (attrs.position - center).dot(normal);
        attrs.position -= normal * (2.0 * s);
        let m = self.new_vertex_with(attrs);
        reflection.vertices.insert(v, m);
        m
    }
}
