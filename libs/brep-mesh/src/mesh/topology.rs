//! # Topology Primitives
//!
//! Local rewrites of the winged structure. Each primitive keeps the
//! vertex↔edge and edge↔facet links reciprocal; fan ordering is restored
//! eagerly by a greedy pass and exactly by [`Mesh::settle`].
//!
//! Handles passed to these functions must be alive: they index the arenas
//! directly and panic on a dead handle, which would be a kernel defect.

use crate::error::{MeshError, MeshResult};
use crate::rules::Rule;

use super::{EdgeId, FacetId, Mesh, Pole, Side, VertexId};

// =============================================================================
// QUERIES
// =============================================================================

impl Mesh {
    /// Vertex at a pole of an edge.
    #[inline]
    pub fn edge_pole(&self, e: EdgeId, pole: Pole) -> VertexId {
        self.edges[e].pole(pole)
    }

    /// Facet on a side of an edge.
    #[inline]
    pub fn edge_side(&self, e: EdgeId, side: Side) -> Option<FacetId> {
        self.edges[e].side(side)
    }

    /// The pole of `e` opposite to `v`.
    pub fn edge_other_vertex(&self, e: EdgeId, v: VertexId) -> VertexId {
        let edge = &self.edges[e];
        if edge.pole(Pole::South) == v {
            edge.pole(Pole::North)
        } else {
            edge.pole(Pole::South)
        }
    }

    /// The side `f` occupies on `e`: WEST if linked there, EAST otherwise.
    pub fn facet_side(&self, f: FacetId, e: EdgeId) -> Side {
        if self.edges[e].side(Side::West) == Some(f) {
            Side::West
        } else {
            debug_assert_eq!(self.edges[e].side(Side::East), Some(f));
            Side::East
        }
    }

    /// Facet following `e` counter-clockwise around `v`.
    pub(crate) fn fan_next_facet(&self, v: VertexId, e: EdgeId) -> Option<FacetId> {
        let edge = &self.edges[e];
        if edge.pole(Pole::South) == v {
            edge.side(Side::West)
        } else {
            edge.side(Side::East)
        }
    }

    /// Facet preceding `e` counter-clockwise around `v`.
    pub(crate) fn fan_prev_facet(&self, v: VertexId, e: EdgeId) -> Option<FacetId> {
        let edge = &self.edges[e];
        if edge.pole(Pole::South) == v {
            edge.side(Side::East)
        } else {
            edge.side(Side::West)
        }
    }

    /// Number of edges around a vertex.
    #[inline]
    pub fn vertex_degree(&self, v: VertexId) -> usize {
        self.vertices[v].fan.len()
    }

    /// Edge at position `i` of a vertex fan.
    #[inline]
    pub fn vertex_edge(&self, v: VertexId, i: usize) -> EdgeId {
        self.vertices[v].fan[i]
    }

    /// Neighbor reached through the edge at position `i` of a vertex fan.
    pub fn vertex_neighbor(&self, v: VertexId, i: usize) -> VertexId {
        self.edge_other_vertex(self.vertices[v].fan[i], v)
    }

    /// Facet between fan positions `i` and `i + 1` of a vertex.
    pub fn vertex_facet(&self, v: VertexId, i: usize) -> Option<FacetId> {
        self.fan_next_facet(v, self.vertices[v].fan[i])
    }

    /// Pole `v` occupies on the edge at fan position `i`.
    pub fn vertex_pole(&self, v: VertexId, i: usize) -> Pole {
        if self.edges[self.vertices[v].fan[i]].pole(Pole::South) == v {
            Pole::South
        } else {
            Pole::North
        }
    }

    /// Number of boundary edges of a facet.
    #[inline]
    pub fn facet_len(&self, f: FacetId) -> usize {
        self.facets[f].edges.len()
    }

    /// Boundary edge at position `i` of a facet.
    #[inline]
    pub fn facet_edge(&self, f: FacetId, i: usize) -> EdgeId {
        self.facets[f].edges[i]
    }

    /// Vertex starting boundary edge `i` of a facet: the edge's SOUTH pole
    /// when the facet is WEST of it, its NORTH pole otherwise.
    pub fn facet_vertex(&self, f: FacetId, i: usize) -> VertexId {
        let edge = &self.edges[self.facets[f].edges[i]];
        if edge.side(Side::West) == Some(f) {
            edge.pole(Pole::South)
        } else {
            edge.pole(Pole::North)
        }
    }

    /// Facet across boundary edge `i`.
    pub fn facet_neighbor(&self, f: FacetId, i: usize) -> Option<FacetId> {
        let e = self.facets[f].edges[i];
        self.edges[e].side(!self.facet_side(f, e))
    }

    /// Vertices of a facet in boundary order.
    pub fn facet_vertices(&self, f: FacetId) -> Vec<VertexId> {
        (0..self.facet_len(f)).map(|i| self.facet_vertex(f, i)).collect()
    }

    /// The edge joining two vertices, if any.
    pub fn vertices_connected(&self, v1: VertexId, v2: VertexId) -> Option<EdgeId> {
        self.vertices[v1]
            .fan
            .iter()
            .copied()
            .find(|&e| self.edge_other_vertex(e, v1) == v2)
    }

    /// First facet around `v1` that is also around `v2`.
    pub fn vertices_connectable(&self, v1: VertexId, v2: VertexId) -> Option<FacetId> {
        let around_v2: Vec<FacetId> = (0..self.vertex_degree(v2))
            .filter_map(|o| self.vertex_facet(v2, o))
            .collect();
        (0..self.vertex_degree(v1))
            .filter_map(|o| self.vertex_facet(v1, o))
            .find(|f| around_v2.contains(f))
    }

    /// Returns true if two edges share a pole.
    pub fn edges_connected(&self, e0: EdgeId, e1: EdgeId) -> bool {
        let other = &self.edges[e1];
        self.edges[e0].poles.iter().any(|&v| other.touches(v))
    }
}

// =============================================================================
// EDGE MUTATIONS
// =============================================================================

impl Mesh {
    /// Links `f` on `side` of `e`. Once both sides are set the edge enters
    /// the fans of its poles.
    pub(crate) fn edge_add_facet(&mut self, e: EdgeId, f: FacetId, side: Side) {
        let edge = &mut self.edges[e];
        edge.sides[side.index()] = Some(f);
        let complete = edge.sides[(!side).index()].is_some();
        let [south, north] = edge.poles;
        self.touch();
        if complete {
            self.vertex_add_edge(south, e);
            self.vertex_add_edge(north, e);
        }
    }

    /// Relinks the side of `e` held by `from` to `to`.
    pub(crate) fn edge_change_facet(&mut self, e: EdgeId, from: FacetId, to: FacetId) {
        let edge = &mut self.edges[e];
        if edge.sides[0] == Some(from) {
            debug_assert!(edge.sides[1] != Some(to));
            edge.sides[0] = Some(to);
        } else {
            debug_assert_eq!(edge.sides[1], Some(from));
            edge.sides[1] = Some(to);
        }
        self.touch();
    }

    /// Unlinks `f` from `e`.
    pub(crate) fn edge_remove_facet(&mut self, e: EdgeId, f: FacetId) {
        let edge = &mut self.edges[e];
        if edge.sides[0] == Some(f) {
            edge.sides[0] = None;
        } else {
            debug_assert_eq!(edge.sides[1], Some(f));
            edge.sides[1] = None;
        }
        self.touch();
    }

    /// Re-poles `e` from `from` to `to`. Fans are not updated.
    pub(crate) fn edge_change_vertex(&mut self, e: EdgeId, from: VertexId, to: VertexId) {
        let edge = &mut self.edges[e];
        if edge.poles[0] == from {
            debug_assert!(edge.poles[1] != to);
            edge.poles[0] = to;
        } else {
            debug_assert!(edge.poles[1] == from && edge.poles[0] != to);
            edge.poles[1] = to;
        }
        self.touch();
    }

    /// Sets a pole of `e`. Fans are not updated.
    pub(crate) fn edge_set_pole(&mut self, e: EdgeId, pole: Pole, v: VertexId) {
        self.edges[e].poles[pole.index()] = v;
        self.touch();
    }

    /// Splits `e` by inserting a vertex at `ratio` from its SOUTH pole.
    ///
    /// `e` keeps the SOUTH part and the returned edge is the NORTH part.
    /// Both adjacent facets receive the new edge next to `e`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Mesh, Pole};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// let (e, _) = mesh.edges().next().unwrap();
    /// let north = mesh.edge_cut(e, 0.5);
    /// assert_eq!(mesh.edge_pole(e, Pole::North), mesh.edge_pole(north, Pole::South));
    /// assert_eq!(mesh.stats().vertices, 9);
    /// mesh.validate().unwrap();
    /// ```
    pub fn edge_cut(&mut self, e: EdgeId, ratio: f64) -> EdgeId {
        let south = self.edge_pole(e, Pole::South);
        let north = self.edge_pole(e, Pole::North);
        let vi = self.new_vertex_average(south, north, ratio);
        let new = self.new_edge(vi, north);
        let sides = self.edges[e].sides;
        self.edges[new].sides = sides;
        self.vertex_change_connection(north, e, new);
        self.edges[e].poles[Pole::North.index()] = vi;
        self.vertex_add_edge(vi, e);
        self.vertex_add_edge(vi, new);
        for side in Side::ALL {
            if let Some(f) = self.edge_side(e, side) {
                self.facet_add_edge_next(f, e, new);
            }
        }
        self.touch();
        new
    }
}

// =============================================================================
// VERTEX FAN MUTATIONS
// =============================================================================

impl Mesh {
    /// Adds `e` to the fan of `v` and restores the facet chaining greedily.
    ///
    /// The successor of a fan edge is the edge whose previous facet equals
    /// its next facet; unlinked sides never match.
    pub(crate) fn vertex_add_edge(&mut self, v: VertexId, e: EdgeId) {
        if self.vertices[v].fan.contains(&e) {
            return;
        }
        let at = self.vertices[v].fan.len().min(1);
        self.vertices[v].fan.insert(at, e);
        self.chain_fan(v);
        self.dirty_fans.insert(v);
        self.touch();
    }

    fn chain_fan(&mut self, v: VertexId) {
        let mut fan = std::mem::take(&mut self.vertices[v].fan);
        for i in 0..fan.len().saturating_sub(1) {
            let Some(next) = self.fan_next_facet(v, fan[i]) else {
                continue;
            };
            if let Some(j) = (i + 1..fan.len()).find(|&j| self.fan_prev_facet(v, fan[j]) == Some(next)) {
                if j > i + 1 {
                    let moved = fan.remove(j);
                    fan.insert(i + 1, moved);
                }
            }
        }
        self.vertices[v].fan = fan;
    }

    /// Replaces `old` by `new` in the fan of `v`, keeping its position.
    pub(crate) fn vertex_change_connection(&mut self, v: VertexId, old: EdgeId, new: EdgeId) {
        if let Some(slot) = self.vertices[v].fan.iter_mut().find(|e| **e == old) {
            *slot = new;
        } else {
            log::warn!("vertex #{}: edge to reconnect is not in its fan", self.vertices[v].name);
        }
        self.dirty_fans.insert(v);
        self.touch();
    }

    /// Moves the fan edges of `v` lying strictly between `from` and `to`
    /// (cyclically) onto `dest`.
    pub(crate) fn vertex_move_connections(&mut self, v: VertexId, dest: VertexId, from: EdgeId, to: EdgeId) {
        let fan = self.vertices[v].fan.clone();
        let n = fan.len();
        let Some(start) = fan.iter().position(|&e| e == from) else {
            log::warn!("vertex #{}: edge to move from is not in its fan", self.vertices[v].name);
            return;
        };
        let moved: Vec<EdgeId> = (1..n)
            .map(|k| fan[(start + k) % n])
            .take_while(|&e| e != to)
            .collect();
        for e in moved {
            self.edge_change_vertex(e, v, dest);
            self.vertex_add_edge(dest, e);
            self.vertices[v].fan.retain(|&x| x != e);
        }
        self.dirty_fans.insert(v);
        self.touch();
    }

    /// Removes `e` from the fan of `v`; a vertex left without edges is
    /// destroyed.
    pub(crate) fn vertex_remove_connection(&mut self, v: VertexId, e: EdgeId) {
        let Some(vertex) = self.vertices.get_mut(v) else {
            return;
        };
        vertex.fan.retain(|&x| x != e);
        let empty = vertex.fan.is_empty();
        self.dirty_fans.insert(v);
        self.touch();
        if empty {
            self.replace_vertex(v, None);
        }
    }

    /// Reorders every fan touched since the last call so that consecutive
    /// edges chain through their shared facets.
    ///
    /// Operators call this before returning.
    pub fn settle(&mut self) {
        let dirty = std::mem::take(&mut self.dirty_fans);
        for v in dirty {
            if !self.vertices.contains_key(v) {
                continue;
            }
            let fan = self.vertices[v].fan.clone();
            let sorted = self.sorted_fan(v, &fan);
            self.vertices[v].fan = sorted;
        }
        self.touch();
    }

    fn sorted_fan(&self, v: VertexId, fan: &[EdgeId]) -> Vec<EdgeId> {
        let n = fan.len();
        if n < 3 {
            return fan.to_vec();
        }
        let successor_of = |i: usize, used: &[bool]| {
            let next = self.fan_next_facet(v, fan[i])?;
            (0..n).find(|&j| !used[j] && j != i && self.fan_prev_facet(v, fan[j]) == Some(next))
        };
        let has_predecessor = |j: usize| {
            let prev = self.fan_prev_facet(v, fan[j]);
            prev.is_some() && (0..n).any(|i| i != j && self.fan_next_facet(v, fan[i]) == prev)
        };
        // open fans start at the edge nothing chains into
        let start = if has_predecessor(0) {
            (0..n).find(|&j| !has_predecessor(j)).unwrap_or(0)
        } else {
            0
        };
        let mut used = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut current = start;
        loop {
            used[current] = true;
            order.push(fan[current]);
            if order.len() == n {
                break;
            }
            current = match successor_of(current, &used) {
                Some(j) => j,
                None => match used.iter().position(|u| !u) {
                    Some(j) => j,
                    None => break,
                },
            };
        }
        order
    }
}

// =============================================================================
// FACET BOUNDARY MUTATIONS
// =============================================================================

impl Mesh {
    /// Inserts `new` into the boundary of `f` next to `edge`: before it when
    /// `new` touches the vertex starting `edge`, after it otherwise.
    pub(crate) fn facet_add_edge_next(&mut self, f: FacetId, edge: EdgeId, new: EdgeId) {
        let Some(i) = self.facets[f].edges.iter().position(|&e| e == edge) else {
            log::warn!("facet #{}: edge to extend is not on its boundary", self.facets[f].name);
            return;
        };
        let start = self.facet_vertex(f, i);
        let at = if self.edges[new].touches(start) { i } else { i + 1 };
        self.facets[f].edges.insert(at, new);
        self.touch();
    }

    /// Splits `f` along `edge`, whose poles must both lie on its boundary.
    ///
    /// The returned facet is EAST of `edge` and holds the boundary run from
    /// the edge's SOUTH vertex to its NORTH vertex; `f` keeps the rest and
    /// lies WEST of `edge`.
    pub(crate) fn facet_split(&mut self, f: FacetId, edge: EdgeId) -> MeshResult<FacetId> {
        let v1 = self.edge_pole(edge, Pole::South);
        let v2 = self.edge_pole(edge, Pole::North);
        let len = self.facet_len(f);
        let start = (0..len)
            .find(|&i| self.facet_vertex(f, i) == v1)
            .ok_or_else(|| MeshError::violation(Rule::F2, format!("facet #{} (split start)", self.facets[f].name)))?;
        let mut run = Vec::new();
        let mut i = start;
        loop {
            run.push(self.facet_edge(f, i));
            i = (i + 1) % len;
            if self.facet_vertex(f, i) == v2 {
                break;
            }
            if i == start {
                return Err(MeshError::violation(
                    Rule::F2,
                    format!("facet #{} (split end)", self.facets[f].name),
                ));
            }
        }
        let stop = i;
        let remainder: Vec<EdgeId> = (0..len - run.len()).map(|k| self.facet_edge(f, (stop + k) % len)).collect();

        let new_facet = self.new_empty_facet();
        for &e in &run {
            self.edge_change_facet(e, f, new_facet);
        }
        let mut new_edges = Vec::with_capacity(run.len() + 1);
        new_edges.push(edge);
        new_edges.extend(run);
        self.facets[new_facet].edges = new_edges;

        let mut kept = Vec::with_capacity(remainder.len() + 1);
        kept.push(edge);
        kept.extend(remainder);
        self.facets[f].edges = kept;

        self.edge_add_facet(edge, f, Side::West);
        self.edge_add_facet(edge, new_facet, Side::East);
        Ok(new_facet)
    }

    /// Replaces `old` by `new` in the boundary of `f`. The facet takes the
    /// same side on `new` it had on `old`, or the opposite one when
    /// `inverse` is set.
    pub(crate) fn facet_change_edge(&mut self, f: FacetId, old: EdgeId, new: EdgeId, inverse: bool) {
        let Some(i) = self.facets[f].edges.iter().position(|&e| e == old) else {
            log::warn!("facet #{}: edge to change is not on its boundary", self.facets[f].name);
            return;
        };
        let side = self.facet_side(f, old);
        self.edge_remove_facet(old, f);
        self.facets[f].edges[i] = new;
        self.edge_add_facet(new, f, if inverse { !side } else { side });
    }

    /// Drops `e` from the boundary of `f`. The edge is not unlinked.
    pub(crate) fn facet_remove_edge(&mut self, f: FacetId, e: EdgeId) {
        self.facets[f].edges.retain(|&x| x != e);
        self.touch();
    }

    /// Dissolves a facet reduced to two edges: its first edge is merged into
    /// the second one and the facet is destroyed.
    pub(crate) fn facet_remove_if_flat(&mut self, f: FacetId) -> bool {
        let len = self.facet_len(f);
        if len > 2 {
            return false;
        }
        if len < 2 {
            for e in self.facets[f].edges.clone() {
                self.edge_remove_facet(e, f);
            }
            self.replace_facet(f, None);
            return true;
        }
        let old = self.facet_edge(f, 0);
        let new = self.facet_edge(f, 1);
        let other = self.facet_neighbor(f, 0);
        let inverse = self.edge_pole(old, Pole::South) != self.edge_pole(new, Pole::South);
        if let Some(other) = other {
            self.facet_change_edge(other, old, new, inverse);
        }
        let [south, north] = self.edges[old].poles;
        self.vertex_remove_connection(south, old);
        self.vertex_remove_connection(north, old);
        self.replace_edge(old, Some(new));
        self.replace_facet(f, None);
        true
    }
}
