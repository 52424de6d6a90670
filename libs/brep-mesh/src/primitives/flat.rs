//! Two-sided flat seeds: one ring of edges shared by a front facet facing
//! +Z and a back facet facing -Z.

use super::Polyhedron;

const SIN_60: f64 = 0.866_025_403_784_438_6;

/// Equilateral triangle inscribed in the unit circle.
pub const TRIANGLE: Polyhedron<'static> = Polyhedron {
    vertices: &[[1.0, 0.0, 0.0], [-0.5, SIN_60, 0.0], [-0.5, -SIN_60, 0.0]],
    edges: &[[0, 1], [1, 2], [2, 0]],
    facets: &[&[0, 1, 2], &[2, 1, 0]],
};

/// Square of side 2 centered on the origin.
pub const SQUARE: Polyhedron<'static> = Polyhedron {
    vertices: &[[1.0, 1.0, 0.0], [-1.0, 1.0, 0.0], [-1.0, -1.0, 0.0], [1.0, -1.0, 0.0]],
    edges: &[[0, 1], [1, 2], [2, 3], [3, 0]],
    facets: &[&[0, 1, 2, 3], &[3, 2, 1, 0]],
};
