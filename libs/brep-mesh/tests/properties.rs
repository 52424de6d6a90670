//! Structural properties every operator must keep.

use std::collections::BTreeSet;

use approx::assert_relative_eq;
use brep_mesh::ops::extrude::Displacement;
use brep_mesh::{ConvertMode, Domain, Mesh, MeshStats, Selection};
use glam::DVec3;

fn counts(stats: MeshStats) -> (usize, usize, usize) {
    (stats.vertices, stats.edges, stats.facets)
}

/// Cube with its first facet alone in facet selection 1.
fn cube_with_facet() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    mesh.new_selection(1, Domain::Facet).unwrap();
    let name = mesh.facets().next().unwrap().1.name();
    mesh.add_single(1, name).unwrap();
    mesh
}

#[test]
fn cube_counts_and_euler() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    assert_eq!(counts(mesh.stats()), (8, 12, 6));
    assert_eq!(mesh.stats().euler_characteristic(), 2);
    assert!(mesh.facets().all(|(f, _)| mesh.facet_len(f) == 4));
    mesh.validate().unwrap();
}

#[test]
fn conversion_round_trip_is_contractive() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    let all: BTreeSet<_> = mesh.vertices().map(|(v, _)| v).collect();
    let sel = Selection::Vertices(all);

    let edges = mesh.convert(&sel, Domain::Edge, ConvertMode::Max);
    assert_eq!(edges.len(), 12);
    let back = mesh.convert(&edges, Domain::Vertex, ConvertMode::Min);
    assert_eq!(back, sel);

    // a lone vertex touches three edges but none of them fully
    let one = Selection::Vertices(sel.vertices().unwrap().iter().take(1).copied().collect());
    let edges = mesh.convert(&one, Domain::Edge, ConvertMode::Min);
    assert!(edges.is_empty());
    let edges = mesh.convert(&one, Domain::Edge, ConvertMode::Max);
    let back = mesh.convert(&edges, Domain::Vertex, ConvertMode::Min);
    assert!(back.vertices().unwrap().is_superset(one.vertices().unwrap()));
}

#[test]
fn propagate_zero_is_identity() {
    let mesh = cube_with_facet();
    let sel = mesh.selection(1).unwrap().clone();
    assert_eq!(mesh.propagate(&sel, 0), sel);
    assert_eq!(mesh.propagate(&sel, 1).len(), 5);
}

#[test]
fn extrude_single_facet_along_normal() {
    let mut mesh = cube_with_facet();
    let f = *mesh.selection(1).unwrap().facets().unwrap().first().unwrap();
    let normal = mesh.facet_normal(f);
    let before: Vec<DVec3> = mesh.facet_vertices(f).iter().map(|&v| mesh.vertex_position(v)).collect();

    mesh.extrude(1, Displacement::FacetNormal, 0.3, Some(2)).unwrap();
    assert_eq!(mesh.selection(2).unwrap().len(), 4);
    assert_eq!(counts(mesh.stats()), (12, 20, 10));
    assert_eq!(mesh.stats().euler_characteristic(), 2);
    let after: Vec<DVec3> = mesh.facet_vertices(f).iter().map(|&v| mesh.vertex_position(v)).collect();
    for p in after {
        assert!(before.iter().any(|&q| (p - (q + normal * 0.3)).length() < 1e-12));
    }
    mesh.validate().unwrap();
}

#[test]
fn bevel_of_ratio_zero_does_not_crash() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    mesh.new_selection(1, Domain::Edge).unwrap();
    let name = mesh.edges().next().unwrap().1.name();
    mesh.add_single(1, name).unwrap();

    mesh.bevel(1, 0.0, Some(2)).unwrap();
    assert_eq!(mesh.stats().euler_characteristic(), 2);
    // covertices coincide with the cube corners
    for (_, v) in mesh.vertices() {
        assert!(v.position().abs().abs_diff_eq(DVec3::splat(0.5), 1e-12));
    }
    mesh.validate().unwrap();
}

#[test]
fn separate_loop_adds_two_caps() {
    let mut mesh = cube_with_facet();
    mesh.convert_selection(1, Domain::Edge, ConvertMode::Max, Some(2)).unwrap();
    assert_eq!(mesh.selection(2).unwrap().len(), 4);

    mesh.separate(2, Some(3)).unwrap();
    assert_eq!(mesh.selection(3).unwrap().len(), 2);
    // loop vertices and edges are doubled
    assert_eq!(counts(mesh.stats()), (12, 16, 8));
    mesh.validate().unwrap();
}

#[test]
fn mirror_isolated_facet_terminates() {
    let mut mesh = Mesh::new();
    mesh.triangle(Some(1)).unwrap();
    mesh.mirror(1, Some(2)).unwrap();
    assert_eq!(mesh.selection(2).unwrap().len(), 1);
    assert_eq!(counts(mesh.stats()), (3, 3, 2));
    mesh.validate().unwrap();
}

#[test]
fn connect_opposite_corners() {
    let mut mesh = cube_with_facet();
    let f = *mesh.selection(1).unwrap().facets().unwrap().first().unwrap();
    let corners = mesh.facet_vertices(f);
    mesh.new_selection(2, Domain::Vertex).unwrap();
    for v in [corners[1], corners[3]] {
        let name = mesh.vertex(v).unwrap().name();
        mesh.add_single(2, name).unwrap();
    }
    mesh.connect(2, false, Some(3)).unwrap();
    assert_eq!(mesh.selection(3).unwrap().len(), 1);
    assert_eq!(counts(mesh.stats()), (8, 13, 7));
    mesh.validate().unwrap();
}

#[test]
fn smooth_keeps_closed_surface() {
    let mut mesh = Mesh::new();
    mesh.cube(Some(1)).unwrap();
    mesh.smooth(1, 2, 1.0, None).unwrap();
    assert_eq!(mesh.stats().euler_characteristic(), 2);
    assert!(mesh.facets().all(|(f, _)| mesh.facet_len(f) == 3));
    mesh.validate().unwrap();
}

#[test]
fn plane_cut_through_cube() {
    let mut mesh = Mesh::new();
    mesh.cube(Some(1)).unwrap();
    mesh.plane_cut(1, DVec3::new(0.0, 0.0, 0.1), DVec3::Z, Some(2)).unwrap();
    let cuts = mesh.selection(2).unwrap().vertices().unwrap().clone();
    assert_eq!(cuts.len(), 4);
    for v in cuts {
        assert_relative_eq!(mesh.vertex_position(v).z, 0.1, epsilon = 1e-12);
    }
    assert_eq!(counts(mesh.stats()), (12, 16, 6));
    mesh.validate().unwrap();
}
