//! # Zap
//!
//! Removes vertices by merging them into a neighbor, and edges by merging
//! them into a collinear continuation. Facets left with two edges collapse
//! into a single edge.

use std::collections::BTreeSet;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, Mesh, Side, VertexId};
use crate::selection::Selection;

impl Mesh {
    /// Zaps every element of selection `id` and empties it.
    ///
    /// Facet selections zap the vertices of their facets. Elements that
    /// cannot be merged are skipped with a warning; elements destroyed by an
    /// earlier zap of the same call are ignored.
    pub fn zap(&mut self, id: u32) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        let mut skipped = 0;
        match &sel {
            Selection::Edges(edges) => {
                for &e in edges {
                    if self.edge(e).is_some() {
                        if let Err(err) = self.zap_edge(e) {
                            log::warn!("zap: {}", err);
                            skipped += 1;
                        }
                    }
                }
            }
            Selection::Vertices(_) | Selection::Facets(_) => {
                let vertices: BTreeSet<VertexId> = self.selection_vertices(&sel);
                for v in vertices {
                    if self.vertex(v).is_some() {
                        if let Err(err) = self.zap_vertex(v) {
                            log::warn!("zap: {}", err);
                            skipped += 1;
                        }
                    }
                }
            }
        }
        log::debug!("zap: {} of {} elements skipped", skipped, sel.len());
        self.empty_selection(id)
    }

    /// Merges `v` into its nearest neighbor.
    ///
    /// A neighbor is eligible only when it shares no edge with a fan
    /// neighbor of `v` other than the two next to it, so the merge never
    /// creates a duplicate edge outside the two collapsing facets.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Mesh, Pole};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// let (e, _) = mesh.edges().next().unwrap();
    /// mesh.edge_cut(e, 0.5);
    /// let mid = mesh.edge_pole(e, Pole::North);
    ///
    /// mesh.zap_vertex(mid).unwrap();
    /// let stats = mesh.stats();
    /// assert_eq!((stats.vertices, stats.edges, stats.facets), (8, 12, 6));
    /// mesh.validate().unwrap();
    /// ```
    pub fn zap_vertex(&mut self, v: VertexId) -> MeshResult<()> {
        let name = self
            .vertex(v)
            .map(|vertex| vertex.name())
            .ok_or_else(|| MeshError::unsupported("zap of a destroyed vertex"))?;
        self.settle();
        let degree = self.vertex_degree(v);
        let neighbors: Vec<VertexId> = (0..degree).map(|i| self.vertex_neighbor(v, i)).collect();
        let position = self.vertex_position(v);
        let best = (0..degree)
            .filter(|&i| self.zap_eligible(&neighbors, i))
            .min_by(|&a, &b| {
                let da = self.vertex_position(neighbors[a]).distance(position);
                let db = self.vertex_position(neighbors[b]).distance(position);
                da.total_cmp(&db)
            })
            .ok_or_else(|| MeshError::unsupported(format!("vertex #{name} has no mergeable neighbor")))?;

        let target = neighbors[best];
        let target_name = self.vertices[target].name();
        let doomed = self.vertex_edge(v, best);
        let (Some(west), Some(east)) = (self.edge_side(doomed, Side::West), self.edge_side(doomed, Side::East)) else {
            return Err(MeshError::unsupported(format!("vertex #{name} lies on an open edge")));
        };

        self.facet_remove_edge(west, doomed);
        self.facet_remove_edge(east, doomed);
        self.vertex_remove_connection(target, doomed);
        let moved: Vec<EdgeId> = self.vertices[v].fan.iter().copied().filter(|&e| e != doomed).collect();
        for e in moved {
            self.edge_change_vertex(e, v, target);
            self.vertex_add_edge(target, e);
        }
        for f in [west, east] {
            if self.facet(f).is_some() {
                self.facet_remove_if_flat(f);
            }
        }
        self.replace_edge(doomed, None);
        self.replace_vertex(v, Some(target));
        self.settle();
        log::debug!("zapped vertex #{} into #{}", name, target_name);
        Ok(())
    }

    fn zap_eligible(&self, neighbors: &[VertexId], i: usize) -> bool {
        let n = neighbors.len();
        (0..n)
            .filter(|&j| j != i && (j + 1) % n != i && (i + 1) % n != j)
            .all(|j| self.vertices_connected(neighbors[i], neighbors[j]).is_none())
    }

    /// Zaps `e` by zapping one of its poles of degree 2, merging `e` with
    /// the edge continuing it.
    ///
    /// Removing an edge between two facets would merge them, which is not
    /// supported.
    pub fn zap_edge(&mut self, e: EdgeId) -> MeshResult<()> {
        let edge = self
            .edge(e)
            .ok_or_else(|| MeshError::unsupported("zap of a destroyed edge"))?;
        let name = edge.name();
        let poles = edge.poles;
        match poles.into_iter().find(|&v| self.vertex_degree(v) == 2) {
            Some(v) => self.zap_vertex(v),
            None => Err(MeshError::unsupported(format!("zapping edge #{name} would merge its two facets"))),
        }
    }
}

#[cfg(test)]
mod tests;
