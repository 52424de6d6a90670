//! # Mesh Geometry
//!
//! Normals, centers and angular measures derived from vertex positions.
//! Normals are cached per element and stamped with the mesh epoch, so any
//! position or topology change invalidates them lazily.

use std::cell::Cell;

use glam::DVec3;

use super::{EdgeId, FacetId, Mesh, Pole, Side, VertexId};

/// Lazily computed unit normal, valid for one mesh epoch.
#[derive(Debug, Clone, Default)]
pub(crate) struct NormalCache(Cell<Option<(u64, DVec3)>>);

impl NormalCache {
    fn get(&self, epoch: u64) -> Option<DVec3> {
        match self.0.get() {
            Some((stamp, normal)) if stamp == epoch => Some(normal),
            _ => None,
        }
    }

    fn store(&self, epoch: u64, normal: DVec3) -> DVec3 {
        self.0.set(Some((epoch, normal)));
        normal
    }
}

impl Mesh {
    /// Unit normal of a facet: the normalized sum of the cross products of
    /// consecutive spokes from its first vertex. Facets with fewer than three
    /// edges have a zero normal.
    pub fn facet_normal(&self, f: FacetId) -> DVec3 {
        let facet = &self.facets[f];
        if let Some(n) = facet.normal.get(self.epoch) {
            return n;
        }
        let mut normal = DVec3::ZERO;
        if facet.len() >= 3 {
            let origin = self.vertex_position(self.facet_vertex(f, 0));
            let spoke = |i: usize| (self.vertex_position(self.facet_vertex(f, i)) - origin).normalize_or_zero();
            let mut previous = spoke(1);
            for i in 2..facet.len() {
                let current = spoke(i);
                normal += previous.cross(current);
                previous = current;
            }
            normal = normal.normalize_or_zero();
        }
        facet.normal.store(self.epoch, normal)
    }

    /// Unit normal of an edge: the normalized sum of its facet normals.
    pub fn edge_normal(&self, e: EdgeId) -> DVec3 {
        let edge = &self.edges[e];
        if let Some(n) = edge.normal.get(self.epoch) {
            return n;
        }
        let sum: DVec3 = Side::ALL
            .iter()
            .filter_map(|&s| edge.side(s))
            .map(|f| self.facet_normal(f))
            .sum();
        edge.normal.store(self.epoch, sum.normalize_or_zero())
    }

    /// Unit normal of a vertex.
    ///
    /// A degree-2 vertex takes the normal of its first edge; otherwise the
    /// normal is the normalized sum of cross products of consecutive spokes
    /// toward its fan neighbors.
    pub fn vertex_normal(&self, v: VertexId) -> DVec3 {
        let vertex = &self.vertices[v];
        if let Some(n) = vertex.normal.get(self.epoch) {
            return n;
        }
        let degree = vertex.degree();
        let normal = match degree {
            0 | 1 => DVec3::ZERO,
            2 => self.edge_normal(vertex.fan[0]),
            _ => {
                let origin = vertex.position();
                let spoke = |i: usize| (self.vertex_position(self.vertex_neighbor(v, i)) - origin).normalize_or_zero();
                let mut sum = DVec3::ZERO;
                let mut previous = spoke(0);
                for i in 0..degree {
                    let current = spoke((i + 1) % degree);
                    sum += previous.cross(current);
                    previous = current;
                }
                sum.normalize_or_zero()
            }
        };
        vertex.normal.store(self.epoch, normal)
    }

    /// Position of a vertex.
    #[inline]
    pub fn vertex_position(&self, v: VertexId) -> DVec3 {
        self.vertices[v].attrs.position
    }

    /// Average of a facet's vertex positions.
    pub fn facet_center(&self, f: FacetId) -> DVec3 {
        let len = self.facets[f].len();
        if len == 0 {
            return DVec3::ZERO;
        }
        let sum: DVec3 = (0..len).map(|i| self.vertex_position(self.facet_vertex(f, i))).sum();
        sum / len as f64
    }

    /// Length of an edge.
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        let edge = &self.edges[e];
        self.vertex_position(edge.pole(Pole::South))
            .distance(self.vertex_position(edge.pole(Pole::North)))
    }

    /// Squared distance between two vertices.
    pub fn distance2(&self, v1: VertexId, v2: VertexId) -> f64 {
        self.vertex_position(v1).distance_squared(self.vertex_position(v2))
    }

    /// Largest cosine between the direction `this → to` and the two
    /// boundary directions of facet `f` leaving `this`.
    ///
    /// Returns `None` when `f` is not around `this`.
    pub fn vertex_max_cos_to(&self, this: VertexId, to: VertexId, f: FacetId) -> Option<f64> {
        let degree = self.vertices[this].degree();
        let o = (0..degree).find(|&o| self.vertex_facet(this, o) == Some(f))?;
        let origin = self.vertex_position(this);
        let dir = |v: VertexId| (self.vertex_position(v) - origin).normalize_or_zero();
        let before = dir(self.vertex_neighbor(this, o));
        let after = dir(self.vertex_neighbor(this, (o + 1) % degree));
        let target = dir(to);
        Some(before.dot(target).max(target.dot(after)))
    }
}
