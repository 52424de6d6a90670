use super::*;

use crate::mesh::{FacetId, Pole};
use crate::selection::Domain;

fn counts(mesh: &Mesh) -> (usize, usize, usize) {
    let stats = mesh.stats();
    (stats.vertices, stats.edges, stats.facets)
}

/// Cube with one edge cut at its middle; returns the cut edge.
fn cut_cube() -> (Mesh, EdgeId) {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    let (e, _) = mesh.edges().next().unwrap();
    mesh.edge_cut(e, 0.5);
    assert_eq!(counts(&mesh), (9, 13, 6));
    (mesh, e)
}

#[test]
fn test_zap_midpoint_restores_edge() {
    let (mut mesh, e) = cut_cube();
    let mid = mesh.edge_pole(e, Pole::North);
    let facets: Vec<FacetId> = Side::ALL.iter().filter_map(|&s| mesh.edge_side(e, s)).collect();

    mesh.zap_vertex(mid).unwrap();
    assert!(mesh.vertex(mid).is_none());
    assert_eq!(counts(&mesh), (8, 12, 6));
    for f in facets {
        assert_eq!(mesh.facet_len(f), 4);
    }
    mesh.validate().unwrap();
}

#[test]
fn test_zap_edge_through_degree_two_pole() {
    let (mut mesh, e) = cut_cube();
    mesh.zap_edge(e).unwrap();
    assert_eq!(counts(&mesh), (8, 12, 6));
    mesh.validate().unwrap();
}

#[test]
fn test_zap_edge_between_facets_is_unsupported() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    let (e, _) = mesh.edges().next().unwrap();
    assert!(matches!(mesh.zap_edge(e), Err(MeshError::Unsupported { .. })));
    assert_eq!(counts(&mesh), (8, 12, 6));
}

#[test]
fn test_zap_corner_folds_two_facets_into_triangles() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    let (v, _) = mesh.vertices().next().unwrap();
    mesh.zap_vertex(v).unwrap();

    assert_eq!(counts(&mesh), (7, 11, 6));
    let mut sizes: Vec<usize> = mesh.facets().map(|(f, _)| mesh.facet_len(f)).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3, 4, 4, 4, 4]);
    mesh.validate().unwrap();
}

#[test]
fn test_zap_triangle_corner_collapses_flat_facets() {
    let mut mesh = Mesh::new();
    mesh.tetrahedron(None).unwrap();
    let (v, _) = mesh.vertices().next().unwrap();
    mesh.zap_vertex(v).unwrap();

    // two triangles collapse; what is left is a two-sided triangle
    assert_eq!(counts(&mesh), (3, 3, 2));
    mesh.validate().unwrap();
}

#[test]
fn test_zap_selection_empties_it() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    mesh.new_selection(1, Domain::Edge).unwrap();
    let name = mesh.edges().next().unwrap().1.name();
    mesh.add_single(1, name).unwrap();
    mesh.cut(1, 2, Some(2)).unwrap();
    assert_eq!(counts(&mesh), (10, 14, 6));

    mesh.zap(2).unwrap();
    assert_eq!(counts(&mesh), (8, 12, 6));
    let sel = mesh.selection(2).unwrap();
    assert!(sel.is_empty());
    assert_eq!(sel.domain(), Domain::Vertex);
    mesh.validate().unwrap();
}

#[test]
fn test_zap_skips_unmergeable_edges() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    mesh.new_selection(1, Domain::Edge).unwrap();
    let names: Vec<u32> = mesh.edges().map(|(_, e)| e.name()).take(3).collect();
    for name in names {
        mesh.add_single(1, name).unwrap();
    }
    mesh.zap(1).unwrap();
    assert_eq!(counts(&mesh), (8, 12, 6));
    assert!(mesh.selection(1).unwrap().is_empty());
}

#[test]
fn test_zap_unknown_selection() {
    let mut mesh = Mesh::new();
    assert_eq!(mesh.zap(4), Err(MeshError::UnknownSelection(4)));
}
