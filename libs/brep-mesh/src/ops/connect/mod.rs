//! # Connect
//!
//! Splits facets by joining pairs of selected vertices that share a facet.
//!
//! Every candidate pair is scored, favoring cuts that leave both vertices
//! away from the facet's own boundary directions and cuts that are short
//! relative to the others. Candidates are then accepted cheapest first,
//! provided the pair still shares a facet and the new edge crosses none of
//! that facet's boundary segments.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use config::constants::{CONNECT_ALIGNMENT_TOLERANCE, CONNECT_DISTANCE_WEIGHT, EPSILON};
use glam::DVec3;

use crate::error::MeshResult;
use crate::mesh::{EdgeId, FacetId, Mesh, VertexId};
use crate::selection::Selection;

/// A scored pair of vertices sharing a facet.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    angle_cost: f64,
    dist2: f64,
    from: VertexId,
    to: VertexId,
}

impl Mesh {
    /// Connects the vertices of selection `id`. The result holds the new
    /// edges.
    ///
    /// Unless `full` is set, a facet that was already split is not split
    /// again on the same side of the same vertex.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Domain, Mesh};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(None).unwrap();
    /// let (f, _) = mesh.facets().next().unwrap();
    /// let corners = mesh.facet_vertices(f);
    /// mesh.new_selection(1, Domain::Vertex).unwrap();
    /// for v in [corners[0], corners[2]] {
    ///     let name = mesh.vertex(v).unwrap().name();
    ///     mesh.add_single(1, name).unwrap();
    /// }
    ///
    /// mesh.connect(1, false, Some(2)).unwrap();
    /// assert_eq!(mesh.selection(2).unwrap().len(), 1);
    /// assert_eq!(mesh.stats().facets, 7);
    /// mesh.validate().unwrap();
    /// ```
    pub fn connect(&mut self, id: u32, full: bool, result: Option<u32>) -> MeshResult<()> {
        let vertices = self.selection_required::<VertexId>(id, "connect")?;
        self.result_required(result, "connect")?;
        let edges = self.connect_vertices(&vertices, None, full);
        self.output_selection(id, result, Selection::Edges(edges))
    }

    /// Connects `vertices` and returns the new edges.
    ///
    /// When `restrict` is given, only facets in it are considered for
    /// candidates, and every facet created by a split is added to it.
    pub(crate) fn connect_vertices(
        &mut self,
        vertices: &BTreeSet<VertexId>,
        mut restrict: Option<&mut BTreeSet<FacetId>>,
        full: bool,
    ) -> BTreeSet<EdgeId> {
        self.settle();
        let candidates = self.connect_candidates(vertices, restrict.as_deref());
        log::debug!("connect: {} candidates among {} vertices", candidates.len(), vertices.len());

        let mut edges = BTreeSet::new();
        let mut origins: BTreeMap<FacetId, FacetId> = BTreeMap::new();
        let mut used: BTreeSet<(FacetId, VertexId)> = BTreeSet::new();
        for c in candidates {
            let Some(facet) = self.vertices_connectable(c.from, c.to) else {
                continue;
            };
            if self.facet_intersect(facet, c.from, c.to) {
                continue;
            }
            let origin = origins.get(&facet).copied().unwrap_or(facet);
            if !full && (used.contains(&(origin, c.from)) || used.contains(&(origin, c.to))) {
                continue;
            }
            let edge = self.new_edge(c.from, c.to);
            let split = match self.facet_split(facet, edge) {
                Ok(split) => split,
                Err(err) => {
                    log::warn!("connect: {}", err);
                    self.replace_edge(edge, None);
                    continue;
                }
            };
            edges.insert(edge);
            if let Some(restrict) = restrict.as_deref_mut() {
                restrict.insert(split);
            }
            if !full {
                origins.insert(split, origin);
                used.insert((origin, c.from));
                used.insert((origin, c.to));
            }
        }
        self.settle();
        edges
    }

    /// Scores every unconnected pair of `vertices` around a common facet and
    /// returns them cheapest first.
    fn connect_candidates(
        &self,
        vertices: &BTreeSet<VertexId>,
        restrict: Option<&BTreeSet<FacetId>>,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut departures = vertices.clone();
        while let Some(p0) = departures.pop_first() {
            let mut arrivals = departures.clone();
            for o in 0..self.vertex_degree(p0) {
                let Some(f) = self.vertex_facet(p0, o) else {
                    continue;
                };
                if restrict.is_some_and(|r| !r.contains(&f)) {
                    continue;
                }
                for p in self.facet_vertices(f) {
                    if !arrivals.contains(&p) || self.vertices_connected(p, p0).is_some() {
                        continue;
                    }
                    let (Some(cos1), Some(cos2)) = (self.vertex_max_cos_to(p0, p, f), self.vertex_max_cos_to(p, p0, f))
                    else {
                        continue;
                    };
                    let max_cos = cos1.max(cos2);
                    if max_cos >= 1.0 - EPSILON {
                        continue;
                    }
                    candidates.push(Candidate {
                        angle_cost: -1.0 / (max_cos - 1.0 - EPSILON) - 1.0,
                        dist2: self.distance2(p, p0),
                        from: p0,
                        to: p,
                    });
                    arrivals.remove(&p);
                }
            }
        }

        let lengths: Vec<f64> = candidates.iter().map(|c| c.dist2).filter(|&d| d > EPSILON).collect();
        let mean = if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().sum::<f64>() / lengths.len() as f64
        };
        let cost = |c: &Candidate| {
            if mean > 0.0 {
                c.angle_cost + CONNECT_DISTANCE_WEIGHT * (c.dist2 / mean).sqrt()
            } else {
                c.angle_cost
            }
        };
        // stable: equal costs keep discovery order
        candidates.sort_by(|a, b| match (a.dist2 <= EPSILON, b.dist2 <= EPSILON) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => cost(a).total_cmp(&cost(b)),
        });
        candidates
    }

    /// Returns true if segment `[v1, v2]` crosses a boundary segment of `f`
    /// that touches neither of them.
    fn facet_intersect(&self, f: FacetId, v1: VertexId, v2: VertexId) -> bool {
        let corners = self.facet_vertices(f);
        let (a, b) = (self.vertex_position(v1), self.vertex_position(v2));
        (0..corners.len()).any(|i| {
            let (prev, next) = (corners[i], corners[(i + 1) % corners.len()]);
            if [prev, next].iter().any(|&v| v == v1 || v == v2) {
                return false;
            }
            segments_intersect(a, b, self.vertex_position(prev), self.vertex_position(next))
        })
    }
}

/// Returns true if segments `[a, b]` and `[c, d]` cross.
///
/// Solves `alpha·ab - beta·cd = ac` on the dominant axis of `ab` and the
/// dominant remaining axis of `cd`, then checks the third axis within
/// `CONNECT_ALIGNMENT_TOLERANCE · |ab|`. Degenerate segments never cross.
pub fn segments_intersect(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> bool {
    let (ab, cd, ac) = (b - a, d - c, c - a);
    let dominant = |v: DVec3, skip: Option<usize>| {
        (0..3)
            .filter(|&i| Some(i) != skip)
            .max_by(|&i, &j| v[i].abs().total_cmp(&v[j].abs()))
    };
    let Some(i1) = dominant(ab, None).filter(|&i| ab[i] != 0.0) else {
        return false;
    };
    let Some(i2) = dominant(cd, Some(i1)) else {
        return false;
    };
    if cd == DVec3::ZERO {
        return false;
    }
    let ab_ratio = ab[i2] / ab[i1];
    let beta = (ac[i2] - ac[i1] * ab_ratio) / (cd[i1] * ab_ratio - cd[i2]);
    if !beta.is_finite() || !(0.0..=1.0).contains(&beta) {
        return false;
    }
    let alpha = (ac[i1] + beta * cd[i1]) / ab[i1];
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return false;
    }
    let i3 = 3 - i1 - i2;
    let check = alpha * ab[i3] - beta * cd[i3] - ac[i3];
    check.is_finite() && check.abs() <= ab.length() * CONNECT_ALIGNMENT_TOLERANCE
}
