//! # Extrusion
//!
//! Pulls connected groups of facets ("zones") out of the surface. Every
//! boundary edge of a zone gets a quad side facet joining it to a copy of
//! the edge left on the outside facet, then the zone is displaced.
//!
//! ```text
//!   outside  │ zone            outside │ side │ zone
//!   ─────────●──────    →    ─────────●══════●──────
//!            v                        vn  en   v
//! ```
//!
//! The original vertices stay with the zone; the duplicates take over the
//! connections of the outside.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use config::constants::approx_equal;
use glam::DVec3;

use crate::error::MeshResult;
use crate::mesh::{EdgeId, FacetId, Mesh, Pole, Side, VertexId};
use crate::selection::Selection;

use super::homotecy::Homotecy;

/// How extruded vertices are displaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Displacement {
    /// Along a fixed direction, normalized then scaled by the ratio. A zero
    /// direction falls back to [`Displacement::FacetNormal`].
    Direction(DVec3),
    /// Along each vertex' normal taken before extrusion
    VertexNormal,
    /// Along the normalized sum of the zone facet normals around each vertex
    FacetNormal,
}

impl Mesh {
    /// Extrudes the facets of selection `id` by `ratio`. The result holds the
    /// new side facets.
    pub fn extrude(&mut self, id: u32, displacement: Displacement, ratio: f64, result: Option<u32>) -> MeshResult<()> {
        let facets = self.selection_required::<FacetId>(id, "extrude")?;
        self.result_required(result, "extrude")?;
        let sides = self.extrude_facets(&facets, displacement, ratio);
        self.output_selection(id, result, Selection::Facets(sides))
    }

    /// Extrudes every facet of selection `id` on its own, then scales each
    /// about its center by `scale` (insets when below 1).
    pub fn extrude_1by1(
        &mut self,
        id: u32,
        displacement: Displacement,
        ratio: f64,
        scale: f64,
        result: Option<u32>,
    ) -> MeshResult<()> {
        let facets = self.selection_required::<FacetId>(id, "extrude_1by1")?;
        self.result_required(result, "extrude_1by1")?;
        let mut sides = BTreeSet::new();
        for &f in &facets {
            sides.extend(self.extrude_zone(&BTreeSet::from([f]), displacement, ratio));
            if !approx_equal(scale, 1.0) {
                let single = Selection::Facets(BTreeSet::from([f]));
                let center = self.facet_center(f);
                self.apply_homotecy(&single, Some(center), Homotecy::Scale(scale));
            }
        }
        self.settle();
        self.output_selection(id, result, Selection::Facets(sides))
    }

    /// Splits `facets` into zones and extrudes each one.
    pub(crate) fn extrude_facets(
        &mut self,
        facets: &BTreeSet<FacetId>,
        displacement: Displacement,
        ratio: f64,
    ) -> BTreeSet<FacetId> {
        let zones = self.zones(facets);
        log::debug!("extruding {} facets in {} zones", facets.len(), zones.len());
        let mut sides = BTreeSet::new();
        for zone in &zones {
            sides.extend(self.extrude_zone(zone, displacement, ratio));
        }
        self.settle();
        sides
    }

    /// Connected components of `facets` under edge adjacency.
    pub fn zones(&self, facets: &BTreeSet<FacetId>) -> Vec<BTreeSet<FacetId>> {
        let mut remaining: BTreeSet<FacetId> = facets.iter().copied().filter(|&f| self.facet(f).is_some()).collect();
        let mut zones = Vec::new();
        while let Some(seed) = remaining.pop_first() {
            let mut zone = BTreeSet::from([seed]);
            let mut queue = VecDeque::from([seed]);
            while let Some(f) = queue.pop_front() {
                for i in 0..self.facet_len(f) {
                    if let Some(neighbor) = self.facet_neighbor(f, i) {
                        if remaining.remove(&neighbor) {
                            zone.insert(neighbor);
                            queue.push_back(neighbor);
                        }
                    }
                }
            }
            zones.push(zone);
        }
        zones
    }

    fn extrude_zone(&mut self, zone: &BTreeSet<FacetId>, displacement: Displacement, ratio: f64) -> BTreeSet<FacetId> {
        // vertex normals read the fan order
        self.settle();
        let edges = self.facets_to_edges(zone);
        let vertices = self.edges_to_vertices(&edges);
        let offsets = self.extrusion_offsets(zone, &vertices, displacement, ratio);

        let mut duplicates: BTreeMap<VertexId, (VertexId, EdgeId)> = BTreeMap::new();
        let mut sides = BTreeSet::new();
        for &e in &edges {
            for s in Side::ALL {
                let (Some(f), Some(outside)) = (self.edge_side(e, s), self.edge_side(e, !s)) else {
                    continue;
                };
                if !zone.contains(&f) || zone.contains(&outside) {
                    continue;
                }
                let [south, north] = Pole::ALL.map(|p| self.edge_pole(e, p));
                let (vs, es) = self.extrusion_duplicate(south, &edges, &mut duplicates);
                let (vn, en) = self.extrusion_duplicate(north, &edges, &mut duplicates);
                let outer = self.new_edge(vs, vn);
                self.facet_change_edge(outside, e, outer, false);
                let ring = match s {
                    Side::West => [e, es, outer, en],
                    Side::East => [e, en, outer, es],
                };
                sides.insert(self.new_facet(&ring, true));
            }
        }

        for (&v, &offset) in &offsets {
            self.vertices[v].attrs.position += offset;
        }
        self.touch();
        sides
    }

    /// Memoized copy of `v` linked to it by a new edge. The copy takes over
    /// every connection of `v` outside `zone_edges`.
    fn extrusion_duplicate(
        &mut self,
        v: VertexId,
        zone_edges: &BTreeSet<EdgeId>,
        duplicates: &mut BTreeMap<VertexId, (VertexId, EdgeId)>,
    ) -> (VertexId, EdgeId) {
        if let Some(&known) = duplicates.get(&v) {
            return known;
        }
        let copy = self.duplicate_vertex(v);
        let link = self.new_edge(copy, v);
        let outside: Vec<EdgeId> = self.vertices[v]
            .fan
            .iter()
            .copied()
            .filter(|e| !zone_edges.contains(e))
            .collect();
        for c in outside {
            self.vertex_remove_connection(v, c);
            self.edge_change_vertex(c, v, copy);
            self.vertex_add_edge(copy, c);
        }
        duplicates.insert(v, (copy, link));
        (copy, link)
    }

    fn extrusion_offsets(
        &self,
        zone: &BTreeSet<FacetId>,
        vertices: &BTreeSet<VertexId>,
        displacement: Displacement,
        ratio: f64,
    ) -> BTreeMap<VertexId, DVec3> {
        let displacement = match displacement {
            Displacement::Direction(dir) if self.config().is_negligible(dir.length()) => {
                Displacement::FacetNormal
            }
            other => other,
        };
        vertices
            .iter()
            .map(|&v| {
                let offset = match displacement {
                    Displacement::Direction(dir) => dir.normalize() * ratio,
                    Displacement::VertexNormal => self.vertex_normal(v) * ratio,
                    Displacement::FacetNormal => {
                        let around: BTreeSet<FacetId> = self.vertices[v]
                            .fan
                            .iter()
                            .flat_map(|&e| Side::ALL.map(|s| self.edge_side(e, s)))
                            .flatten()
                            .filter(|f| zone.contains(f))
                            .collect();
                        let sum: DVec3 = around.iter().map(|&f| self.facet_normal(f)).sum();
                        sum.normalize_or_zero() * ratio
                    }
                };
                (v, offset)
            })
            .collect()
    }
}
