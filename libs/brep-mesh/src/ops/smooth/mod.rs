//! # Smooth
//!
//! Subdivision smoothing. Each level cuts every edge of the working set at
//! its midpoint, lifts the midpoint along the edge normal toward a circular
//! arc between the end normals, then fully connects the new midpoints to
//! re-triangulate the refined facets.
//!
//! Only edges whose two facets both belong to the smoothed region are
//! lifted; edges on its border stay flat so the surrounding surface is not
//! disturbed.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use config::constants::{SMOOTH_HEIGHT_OFFSET, SMOOTH_HEIGHT_SLOPE};
use glam::DVec3;

use crate::error::MeshResult;
use crate::mesh::{EdgeId, FacetId, Mesh, Pole, Side, VertexId};
use crate::selection::{ConvertMode, Domain, Selection};

/// Relative lift of a midpoint seen from one end of its edge.
///
/// `x` points from the midpoint to the end, `y` is the edge normal and `n`
/// the end's vertex normal. Flat ends give 0; ends bending away from `y`
/// give a positive lift.
///
/// # Example
///
/// ```rust
/// use brep_mesh::ops::smooth::height;
/// use glam::DVec3;
///
/// assert!(height(DVec3::X, DVec3::Z, DVec3::Z).abs() < 1e-12);
/// ```
pub fn height(x: DVec3, y: DVec3, n: DVec3) -> f64 {
    let mut angle = (-n.dot(y)).clamp(-1.0, 1.0).acos();
    if n.dot(x) < 0.0 {
        angle = TAU - angle;
    }
    SMOOTH_HEIGHT_OFFSET - SMOOTH_HEIGHT_SLOPE * angle / TAU
}

impl Mesh {
    /// Smooths selection `id` over `level` subdivision rounds; `softness`
    /// scales the midpoint lift. The result holds the refined edge set.
    ///
    /// The region is the facet set of a facet selection; other selections
    /// are subdivided without lifting or re-triangulation. Facets created
    /// inside the region are added back to the source selection.
    pub fn smooth(&mut self, id: u32, level: u32, softness: f64, result: Option<u32>) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        self.result_required(result, "smooth")?;
        let mut region: BTreeSet<FacetId> = match &sel {
            Selection::Facets(facets) => facets.iter().copied().filter(|&f| self.facet(f).is_some()).collect(),
            _ => BTreeSet::new(),
        };
        let mut edges = self.selection_edges(&sel, ConvertMode::Min);
        for round in 0..level {
            let mut midpoints = BTreeSet::new();
            let mut halves = BTreeSet::new();
            for &e in &edges {
                halves.insert(self.smooth_cut(e, &region, softness, &mut midpoints));
            }
            edges.extend(halves);
            let connected = self.connect_vertices(&midpoints, Some(&mut region), true);
            log::debug!(
                "smooth round {}: {} midpoints, {} connections",
                round + 1,
                midpoints.len(),
                connected.len()
            );
            edges.extend(connected);
        }
        self.settle();
        if sel.domain() == Domain::Facet {
            self.selections.insert(id, Selection::Facets(region));
        }
        self.output_selection(id, result, Selection::Edges(edges))
    }

    /// Cuts `e` at its midpoint, lifting the midpoint when both facets of
    /// `e` are in `region`. Returns the NORTH half.
    fn smooth_cut(
        &mut self,
        e: EdgeId,
        region: &BTreeSet<FacetId>,
        softness: f64,
        midpoints: &mut BTreeSet<VertexId>,
    ) -> EdgeId {
        let y = self.edge_normal(e);
        let [south, north] = Pole::ALL.map(|p| self.edge_pole(e, p));
        let length = self.edge_length(e);
        let half = self.edge_cut(e, 0.5);
        let mid = self.edge_pole(e, Pole::North);
        midpoints.insert(mid);

        let inside = Side::ALL
            .iter()
            .all(|&s| self.edge_side(e, s).is_some_and(|f| region.contains(&f)));
        if inside {
            let x = (self.vertex_position(south) - self.vertex_position(mid)).normalize_or_zero();
            let h = height(x, y, self.vertex_normal(south)) + height(-x, y, self.vertex_normal(north));
            let lifted = self.vertex_position(mid) + y * (softness * h * 0.5 * length);
            self.set_position(mid, lifted);
        }
        half
    }
}
