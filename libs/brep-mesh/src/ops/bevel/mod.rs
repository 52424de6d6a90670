//! # Bevel
//!
//! Replaces beveled vertices by corner facets and beveled edges by side
//! facets.
//!
//! Around every beveled vertex a ring of *covertices* is placed: one on each
//! unbeveled edge at `ratio` from the vertex, and one between each pair of
//! consecutive beveled edges. Consecutive covertices are joined by vertex
//! *coedges*; three or more of them close a corner facet. Each beveled edge
//! gets two parallel coedges, one per side, closed into a side facet by the
//! vertex coedges at its ends. Finally the facets around the beveled
//! vertices are rewired onto the new elements and the originals destroyed.
//!
//! ```text
//!        │                │   │
//!   ─────●─────     →   ──●───●──
//!        │ v              │ ╲ │
//!                         ●───●
//! ```

use std::collections::{BTreeMap, BTreeSet};

use config::constants::BEVSMOOTH_RATIO;

use crate::error::MeshResult;
use crate::mesh::{EdgeId, FacetId, Mesh, Pole, Side, VertexAttributes, VertexId};
use crate::selection::{ConvertMode, Domain, Selection};

/// Offset ring built around one beveled vertex, indexed like its fan.
#[derive(Debug, Clone)]
struct CornerRing {
    /// Fan of the vertex when the bevel started
    fan: Vec<EdgeId>,
    /// Covertex owned by each fan position
    covertices: Vec<Option<VertexId>>,
    /// Coedge arriving on each covertex
    coedges: Vec<Option<EdgeId>>,
}

impl CornerRing {
    fn position(&self, e: EdgeId) -> Option<usize> {
        self.fan.iter().position(|&x| x == e)
    }

    /// Covertex `shift` positions away from `e` (0 or -1). A missing
    /// covertex at shift 0 defers to the next position.
    fn covertex(&self, e: EdgeId, shift: isize) -> Option<VertexId> {
        let n = self.fan.len();
        let i = (self.position(e)? as isize + shift).rem_euclid(n as isize) as usize;
        self.covertices[i].or_else(|| if shift >= 0 { self.covertices[(i + 1) % n] } else { None })
    }

    /// Vertex coedge closing the side facet of beveled edge `e`.
    fn coedge(&self, e: EdgeId) -> Option<EdgeId> {
        let i = self.position(e)?;
        self.coedges[i].or(self.coedges[(i + 1) % self.fan.len()])
    }
}

impl Mesh {
    /// Bevels selection `id` by `ratio`.
    ///
    /// A vertex selection bevels those vertices alone; an edge selection
    /// bevels its edges; a facet selection bevels every edge bounding it.
    /// The result holds the new corner and side facets.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Domain, Mesh};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// mesh.new_selection(1, Domain::Vertex).unwrap();
    /// let corner = mesh.vertices().next().map(|(_, v)| v.name()).unwrap();
    /// mesh.add_single(1, corner).unwrap();
    ///
    /// mesh.bevel(1, 0.25, Some(2)).unwrap();
    /// let stats = mesh.stats();
    /// assert_eq!((stats.vertices, stats.edges, stats.facets), (10, 15, 7));
    /// mesh.validate().unwrap();
    /// ```
    pub fn bevel(&mut self, id: u32, ratio: f64, result: Option<u32>) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        self.result_required(result, "bevel")?;
        let (edges, vertices) = match &sel {
            Selection::Vertices(_) => (BTreeSet::new(), self.selection_vertices(&sel)),
            Selection::Edges(_) | Selection::Facets(_) => (self.selection_edges(&sel, ConvertMode::Min), BTreeSet::new()),
        };
        let facets = self.bevel_elements(&edges, &vertices, ratio);
        self.output_selection(id, result, Selection::Facets(facets))
    }

    /// Rounds selection `id` by `level` successive bevels. The selection is
    /// left holding the facets of the rounded region.
    pub fn bevsmooth(&mut self, id: u32, level: u32) -> MeshResult<()> {
        self.convert_selection(id, Domain::Facet, ConvertMode::Max, Some(id))?;
        for _ in 0..level {
            self.bevel(id, BEVSMOOTH_RATIO, Some(id))?;
            self.convert_selection(id, Domain::Edge, ConvertMode::Min, Some(id))?;
            self.convert_selection(id, Domain::Facet, ConvertMode::Min, Some(id))?;
        }
        Ok(())
    }

    /// Bevels `edges` and `extra` vertices, returning the new facets.
    pub(crate) fn bevel_elements(
        &mut self,
        edges: &BTreeSet<EdgeId>,
        extra: &BTreeSet<VertexId>,
        ratio: f64,
    ) -> BTreeSet<FacetId> {
        self.settle();
        let mut vertices = self.edges_to_vertices(edges);
        vertices.extend(extra.iter().copied().filter(|&v| self.vertex(v).is_some()));
        let facets = self.edges_to_facets(&self.vertices_to_edges(&vertices, ConvertMode::Max), ConvertMode::Max);

        let mut result = BTreeSet::new();
        let mut rings: BTreeMap<VertexId, CornerRing> = BTreeMap::new();
        for &v in &vertices {
            if let Some(ring) = self.corner_ring(v, edges, ratio, &mut result) {
                rings.insert(v, ring);
            }
        }
        log::debug!("bevel: {} covertex rings around {} facets", rings.len(), facets.len());

        let mut coedges: BTreeMap<EdgeId, [EdgeId; 2]> = BTreeMap::new();
        for &e in edges {
            let [south, north] = Pole::ALL.map(|p| self.edge_pole(e, p));
            let (Some(south_ring), Some(north_ring)) = (rings.get(&south), rings.get(&north)) else {
                continue;
            };
            let corners = (
                south_ring.covertex(e, 0),
                north_ring.covertex(e, -1),
                south_ring.covertex(e, -1),
                north_ring.covertex(e, 0),
            );
            let (Some(sw), Some(nw), Some(se), Some(ne)) = corners else {
                log::warn!("bevel: edge #{} has no covertex on one side", self.edges[e].name());
                continue;
            };
            if sw != se || nw != ne {
                let west = self.new_edge(sw, nw);
                let east = self.new_edge(se, ne);
                let ring: Vec<EdgeId> = [Some(west), south_ring.coedge(e), Some(east), north_ring.coedge(e)]
                    .into_iter()
                    .flatten()
                    .collect();
                result.insert(self.new_facet(&ring, true));
                coedges.insert(e, [west, east]);
            } else {
                log::warn!("bevel: isolated edge #{} cannot be beveled", self.edges[e].name());
                rings.remove(&south);
                rings.remove(&north);
                self.replace_vertex(sw, None);
                self.replace_vertex(nw, None);
            }
        }

        for &f in &facets {
            self.bevel_splice_facet(f, &rings, &coedges);
        }
        for &f in &facets {
            self.bevel_reattach_facet(f, &rings);
        }

        for &v in rings.keys() {
            self.replace_vertex(v, None);
        }
        for &e in coedges.keys() {
            self.replace_edge(e, None);
        }
        self.settle();
        result
    }

    /// Places the covertices of `v` and links them; a ring of three or more
    /// is closed by a corner facet added to `result`.
    fn corner_ring(
        &mut self,
        v: VertexId,
        beveled: &BTreeSet<EdgeId>,
        ratio: f64,
        result: &mut BTreeSet<FacetId>,
    ) -> Option<CornerRing> {
        let fan = self.vertices[v].fan.clone();
        let n = fan.len();
        let mut covertices = vec![None; n];
        for i in 0..n {
            let far = self.edge_other_vertex(fan[i], v);
            if !beveled.contains(&fan[i]) {
                covertices[i] = Some(self.new_vertex_average(v, far, ratio));
            } else if beveled.contains(&fan[(i + 1) % n]) {
                let next_far = self.edge_other_vertex(fan[(i + 1) % n], v);
                let mid = VertexAttributes::average(&self.vertices[far].attrs, &self.vertices[next_far].attrs, 0.5);
                let attrs = VertexAttributes::average(&self.vertices[v].attrs, &mid, 2.0 * ratio);
                covertices[i] = Some(self.new_vertex_with(attrs));
            }
        }

        let placed: Vec<(usize, VertexId)> = covertices
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
            .collect();
        let (&(first_i, first), &(last_i, last)) = (placed.first()?, placed.last()?);
        let mut coedges = vec![None; n];
        for pair in placed.windows(2) {
            coedges[pair[1].0] = Some(self.new_edge(pair[0].1, pair[1].1));
        }
        if placed.len() > 2 {
            coedges[first_i] = Some(self.new_edge(last, first));
            let ring: Vec<EdgeId> = coedges.iter().flatten().copied().collect();
            result.insert(self.new_facet(&ring, true));
        } else if placed.len() == 2 {
            coedges[first_i] = coedges[last_i];
        }
        Some(CornerRing {
            fan,
            covertices,
            coedges,
        })
    }

    /// First rewiring pass over a facet around beveled vertices: beveled
    /// edges give way to their coedge on the facet's side, and corners
    /// between two unbeveled edges receive the vertex coedge.
    fn bevel_splice_facet(
        &mut self,
        f: FacetId,
        rings: &BTreeMap<VertexId, CornerRing>,
        coedges: &BTreeMap<EdgeId, [EdgeId; 2]>,
    ) {
        let Some(mut left) = self.facets[f].edges.last().copied() else {
            return;
        };
        let mut i = 0;
        while i < self.facet_len(f) {
            let right = self.facet_edge(f, i);
            let v = self.facet_vertex(f, i);
            if let Some(pair) = coedges.get(&left) {
                let side = self.facet_side(f, left);
                self.facet_change_edge(f, left, pair[side.index()], false);
            } else if let (Some(ring), false) = (rings.get(&v), coedges.contains_key(&right)) {
                self.bevel_corner_split(f, i, ring);
                if i > 0 {
                    i += 1;
                }
            }
            left = right;
            i += 1;
        }
    }

    /// Inserts the vertex coedge into `f` after the edge preceding corner `i`.
    fn bevel_corner_split(&mut self, f: FacetId, i: usize, ring: &CornerRing) {
        let len = self.facet_len(f);
        let previous = self.facet_edge(f, (i + len - 1) % len);
        let slot = ring.position(previous);
        let Some((coedge, covertex)) = slot.and_then(|k| ring.coedges[k].zip(ring.covertices[k])) else {
            log::warn!("bevel: facet #{} corner {} has no coedge", self.facets[f].name(), i);
            return;
        };
        let side = if self.edge_pole(coedge, Pole::North) == covertex {
            Side::East
        } else {
            Side::West
        };
        self.edge_add_facet(coedge, f, side);
        self.facet_add_edge_next(f, previous, coedge);
    }

    /// Second rewiring pass: consecutive boundary edges that no longer meet
    /// are re-poled onto the covertex, away from the beveled vertex.
    fn bevel_reattach_facet(&mut self, f: FacetId, rings: &BTreeMap<VertexId, CornerRing>) {
        let Some(mut left) = self.facets[f].edges.last().copied() else {
            return;
        };
        let mut left_pole = match self.facet_side(f, left) {
            Side::West => Pole::North,
            Side::East => Pole::South,
        };
        for i in 0..self.facet_len(f) {
            let right = self.facet_edge(f, i);
            let right_pole = match self.facet_side(f, right) {
                Side::West => Pole::South,
                Side::East => Pole::North,
            };
            let left_v = self.edge_pole(left, left_pole);
            let right_v = self.edge_pole(right, right_pole);
            if left_v != right_v {
                if rings.contains_key(&left_v) {
                    self.edge_set_pole(left, left_pole, right_v);
                    self.vertex_add_edge(right_v, left);
                } else {
                    self.edge_set_pole(right, right_pole, left_v);
                    self.vertex_add_edge(left_v, right);
                }
            }
            left = right;
            left_pole = !right_pole;
        }
    }
}
