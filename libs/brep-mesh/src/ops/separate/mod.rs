//! # Separate
//!
//! Cuts the surface open along closed loops of edges and caps both lips.
//!
//! Each loop is walked once. Its vertices are duplicated, a parallel coedge
//! is built per loop edge, and the facets on the separated side move onto
//! the coedges together with the vertex connections on that side. The
//! original loop and the coloop are then closed by one facet each.

use std::collections::BTreeSet;

use crate::error::MeshResult;
use crate::mesh::{EdgeId, FacetId, Mesh, Pole, Side, VertexId};
use crate::selection::{ConvertMode, Selection};

impl Mesh {
    /// Separates along the edge loops of selection `id`. The result holds
    /// the two capping facets of every loop; a non-edge selection yields an
    /// empty result.
    ///
    /// Edges that do not close a loop are ignored. The source selection is
    /// left as is.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Domain, Mesh};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// let (f, _) = mesh.facets().next().unwrap();
    /// mesh.new_selection(1, Domain::Edge).unwrap();
    /// for i in 0..4 {
    ///     let name = mesh.edge(mesh.facet_edge(f, i)).unwrap().name();
    ///     mesh.add_single(1, name).unwrap();
    /// }
    ///
    /// mesh.separate(1, Some(2)).unwrap();
    /// assert_eq!(mesh.selection(2).unwrap().len(), 2);
    /// let stats = mesh.stats();
    /// assert_eq!((stats.vertices, stats.edges, stats.facets), (12, 16, 8));
    /// mesh.validate().unwrap();
    /// ```
    pub fn separate(&mut self, id: u32, result: Option<u32>) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        self.result_required(result, "separate")?;
        let caps = match &sel {
            Selection::Edges(_) => {
                let edges = self.selection_edges(&sel, ConvertMode::Min);
                self.separate_edges(edges)
            }
            _ => BTreeSet::new(),
        };
        self.output_selection(id, result, Selection::Facets(caps))
    }

    /// Extracts loops greedily from `remaining` and separates each one.
    pub(crate) fn separate_edges(&mut self, mut remaining: BTreeSet<EdgeId>) -> BTreeSet<FacetId> {
        self.settle();
        let mut caps = BTreeSet::new();
        let mut loops = 0;
        while !remaining.is_empty() {
            if let Some(chain) = self.extract_loop(&mut remaining) {
                caps.extend(self.separate_loop(&chain));
                loops += 1;
            }
        }
        self.settle();
        log::debug!("separate: {} loops, {} caps", loops, caps.len());
        caps
    }

    /// Chains edges out of `remaining` until the chain closes on itself.
    /// Chained edges are consumed even when no loop closes.
    fn extract_loop(&self, remaining: &mut BTreeSet<EdgeId>) -> Option<Vec<EdgeId>> {
        let mut chain: Vec<EdgeId> = Vec::new();
        loop {
            let mut grown = false;
            let candidates: Vec<EdgeId> = remaining.iter().copied().collect();
            for e in candidates {
                let attaches = chain.last().map_or(true, |&last| self.edges_connected(e, last));
                if !attaches {
                    continue;
                }
                remaining.remove(&e);
                chain.push(e);
                grown = true;
                if chain.len() > 2 && self.edges_connected(chain[0], e) {
                    return Some(chain);
                }
            }
            if !grown {
                return None;
            }
        }
    }

    /// Separates one closed loop of at least three edges and returns its
    /// two caps.
    fn separate_loop(&mut self, chain: &[EdgeId]) -> [FacetId; 2] {
        let n = chain.len();
        let mut coloop = Vec::with_capacity(n);
        let mut last_v: [Option<VertexId>; 2] = [None; 2];
        let mut last_cov: [Option<VertexId>; 2] = [None; 2];
        let mut first: Option<(VertexId, VertexId)> = None;
        // the first edge is separated on its EAST side
        let mut side = Side::East;
        let mut direct = true;

        for (i, &e) in chain.iter().enumerate() {
            let mut v = Pole::ALL.map(|p| self.edge_pole(e, p));
            let mut cov = v;
            let mut joined = None;
            for pole in Pole::ALL {
                let matched = Pole::ALL.into_iter().find(|&p| last_v[p.index()] == Some(v[pole.index()]));
                match matched {
                    Some(prev) => {
                        cov[pole.index()] = last_cov[prev.index()].unwrap_or(v[pole.index()]);
                        joined = Some(pole);
                        if prev == pole {
                            // successive edges run opposite ways
                            side = !side;
                        }
                        if i == 1 {
                            direct = prev == Pole::South;
                            let other = (!prev).index();
                            if let (Some(fv), Some(fc)) = (last_v[other], last_cov[other]) {
                                first = Some((fv, fc));
                            }
                        }
                    }
                    None if i + 1 < n => cov[pole.index()] = self.duplicate_vertex(v[pole.index()]),
                    None => match first {
                        Some((fv, fc)) => {
                            v[pole.index()] = fv;
                            cov[pole.index()] = fc;
                        }
                        None => log::warn!("separate: loop does not close on its first vertex"),
                    },
                }
            }

            let co = self.new_edge(cov[0], cov[1]);
            coloop.push(co);
            if let Some(f) = self.edge_side(e, side) {
                self.facet_change_edge(f, e, co, false);
            }
            if let (true, Some(pole)) = (i > 0, joined) {
                let (p, q) = (pole.index(), (!pole).index());
                let forward = matches!((pole, side), (Pole::South, Side::East) | (Pole::North, Side::West));
                if forward {
                    self.vertex_move_connections(v[p], cov[p], chain[i - 1], e);
                    if i + 1 == n {
                        self.vertex_move_connections(v[q], cov[q], e, chain[0]);
                    }
                } else {
                    self.vertex_move_connections(v[p], cov[p], e, chain[i - 1]);
                    if i + 1 == n {
                        self.vertex_move_connections(v[q], cov[q], chain[0], e);
                    }
                }
            }
            last_v = v.map(Some);
            last_cov = cov.map(Some);
        }

        [self.new_facet(chain, direct), self.new_facet(&coloop, !direct)]
    }
}
