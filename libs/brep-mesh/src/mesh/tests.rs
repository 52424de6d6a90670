use super::*;
use approx::assert_relative_eq;

use crate::error::MeshError;
use crate::rules::Rule;

/// Two-sided unit square in the XY plane, front facet facing +Z.
fn square() -> (Mesh, [VertexId; 4], [EdgeId; 4], [FacetId; 2]) {
    let mut mesh = Mesh::new();
    let v = [
        mesh.new_vertex(DVec3::new(0.0, 0.0, 0.0), 0, 0.0, (0.0, 0.0)),
        mesh.new_vertex(DVec3::new(1.0, 0.0, 0.0), 0, 0.0, (1.0, 0.0)),
        mesh.new_vertex(DVec3::new(1.0, 1.0, 0.0), 0, 0.0, (1.0, 1.0)),
        mesh.new_vertex(DVec3::new(0.0, 1.0, 0.0), 0, 0.0, (0.0, 1.0)),
    ];
    let e = [
        mesh.new_edge(v[0], v[1]),
        mesh.new_edge(v[1], v[2]),
        mesh.new_edge(v[2], v[3]),
        mesh.new_edge(v[3], v[0]),
    ];
    let front = mesh.new_facet(&e, true);
    let back = mesh.new_facet(&e, false);
    mesh.settle();
    (mesh, v, e, [front, back])
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_empty_mesh() {
    let mesh = Mesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.stats(), MeshStats::default());
}

#[test]
fn test_names_are_sequential_and_resolvable() {
    let (mesh, v, e, f) = square();
    for (i, &id) in v.iter().enumerate() {
        assert_eq!(mesh.vertex(id).unwrap().name(), i as u32);
        assert_eq!(mesh.vertex_by_name(i as u32), Some(id));
    }
    assert_eq!(mesh.edge_by_name(3), Some(e[3]));
    assert_eq!(mesh.facet_by_name(1), Some(f[1]));
    assert_eq!(mesh.facet_by_name(2), None);
}

#[test]
fn test_new_facet_assigns_sides() {
    let (mesh, _, e, [front, back]) = square();
    for &edge in &e {
        assert_eq!(mesh.edge_side(edge, Side::West), Some(front));
        assert_eq!(mesh.edge_side(edge, Side::East), Some(back));
    }
    assert_eq!(mesh.facet_side(back, e[0]), Side::East);
}

#[test]
fn test_square_stats() {
    let (mesh, v, _, _) = square();
    let stats = mesh.stats();
    assert_eq!((stats.vertices, stats.edges, stats.facets), (4, 4, 2));
    assert_eq!(stats.euler_characteristic(), 2);
    for &vertex in &v {
        assert_eq!(mesh.vertex_degree(vertex), 2);
    }
}

#[test]
fn test_facet_vertices_follow_winding() {
    let (mesh, v, _, [front, back]) = square();
    assert_eq!(mesh.facet_vertices(front), vec![v[0], v[1], v[2], v[3]]);
    assert_eq!(mesh.facet_vertices(back), vec![v[0], v[3], v[2], v[1]]);
}

#[test]
fn test_skinned_vertex_keeps_ratio() {
    let mut mesh = Mesh::new();
    let v = mesh.new_vertex(DVec3::ZERO, 2, 0.5, (0.0, 0.0));
    assert_relative_eq!(mesh.vertex(v).unwrap().skin_ratio(), 0.5);
}

// =============================================================================
// GEOMETRY
// =============================================================================

#[test]
fn test_facet_normals_are_opposite() {
    let (mesh, _, _, [front, back]) = square();
    assert_relative_eq!(mesh.facet_normal(front).z, 1.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.facet_normal(back).z, -1.0, epsilon = 1e-12);
}

#[test]
fn test_normal_cache_invalidated_by_move() {
    let (mut mesh, v, _, [front, _]) = square();
    let before = mesh.facet_normal(front);
    mesh.set_position(v[2], DVec3::new(1.0, 1.0, 1.0));
    let after = mesh.facet_normal(front);
    assert!(before.distance(after) > 1e-3);
    assert_relative_eq!(after.length(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_center_and_lengths() {
    let (mesh, v, e, [front, _]) = square();
    let center = mesh.facet_center(front);
    assert_relative_eq!(center.x, 0.5);
    assert_relative_eq!(center.y, 0.5);
    assert_relative_eq!(mesh.edge_length(e[0]), 1.0);
    assert_relative_eq!(mesh.distance2(v[0], v[2]), 2.0);
}

// =============================================================================
// TOPOLOGY
// =============================================================================

#[test]
fn test_vertices_connected_and_connectable() {
    let (mesh, v, e, [front, back]) = square();
    assert_eq!(mesh.vertices_connected(v[0], v[1]), Some(e[0]));
    assert_eq!(mesh.vertices_connected(v[0], v[2]), None);
    let shared = mesh.vertices_connectable(v[0], v[2]);
    assert!(shared == Some(front) || shared == Some(back));
    assert!(mesh.edges_connected(e[0], e[1]));
    assert!(!mesh.edges_connected(e[0], e[2]));
}

#[test]
fn test_edge_cut_inserts_vertex() {
    let (mut mesh, v, e, [front, back]) = square();
    let north = mesh.edge_cut(e[0], 0.25);
    mesh.settle();

    let mid = mesh.edge_pole(e[0], Pole::North);
    assert_eq!(mesh.edge_pole(north, Pole::South), mid);
    assert_eq!(mesh.edge_pole(north, Pole::North), v[1]);
    assert_relative_eq!(mesh.vertex_position(mid).x, 0.25);
    assert_eq!(mesh.facet_len(front), 5);
    assert_eq!(mesh.facet_len(back), 5);
    assert_eq!(mesh.facet_vertices(front)[1], mid);
    assert_eq!(mesh.stats().euler_characteristic(), 2);
    mesh.validate().unwrap();
}

#[test]
fn test_edge_cut_interpolates_uv() {
    let (mut mesh, _, e, _) = square();
    mesh.edge_cut(e[0], 0.5);
    let mid = mesh.edge_pole(e[0], Pole::North);
    assert_relative_eq!(mesh.vertex(mid).unwrap().uv().0, 0.5);
}

#[test]
fn test_facet_split_diagonal() {
    let (mut mesh, v, _, [front, _]) = square();
    let diagonal = mesh.new_edge(v[0], v[2]);
    let triangle = mesh.facet_split(front, diagonal).unwrap();
    mesh.settle();

    assert_eq!(mesh.facet_vertices(triangle), vec![v[2], v[0], v[1]]);
    assert_eq!(mesh.facet_vertices(front), vec![v[0], v[2], v[3]]);
    assert_eq!(mesh.edge_side(diagonal, Side::West), Some(front));
    assert_eq!(mesh.edge_side(diagonal, Side::East), Some(triangle));
    assert_eq!(mesh.vertex_degree(v[0]), 3);
    assert_eq!(mesh.stats().euler_characteristic(), 2);
    mesh.validate().unwrap();
}

#[test]
fn test_facet_split_rejects_foreign_edge() {
    let (mut mesh, v, _, [front, _]) = square();
    let outside = mesh.new_vertex(DVec3::new(5.0, 5.0, 0.0), 0, 0.0, (0.0, 0.0));
    let edge = mesh.new_edge(outside, v[2]);
    assert!(matches!(
        mesh.facet_split(front, edge),
        Err(MeshError::InvariantViolation { rule: Rule::F2, .. })
    ));
}

#[test]
fn test_settle_restores_fan_chaining() {
    let (mut mesh, v, _, [front, _]) = square();
    let diagonal = mesh.new_edge(v[0], v[2]);
    mesh.facet_split(front, diagonal).unwrap();
    mesh.vertices[v[0]].fan.reverse();
    mesh.dirty_fans.insert(v[0]);
    mesh.settle();
    mesh.validate().unwrap();
}

#[test]
fn test_replace_facet_updates_selections() {
    let (mut mesh, _, _, [front, back]) = square();
    mesh.new_selection(1, crate::selection::Domain::Facet).unwrap();
    mesh.toggle_selection(1).unwrap();
    mesh.replace_facet(front, None);
    assert_eq!(mesh.selection(1).unwrap().len(), 1);
    assert!(mesh.is_selected(1, back));
    assert!(mesh.facet(front).is_none());
}

// =============================================================================
// BASES & COLORS
// =============================================================================

#[test]
fn test_basis_registry() {
    let mut mesh = Mesh::new();
    let axes = [DVec3::X, DVec3::Y, DVec3::Z];
    assert!(mesh.new_basis(0, 0, DVec3::ZERO, axes).is_err());
    mesh.new_basis(1, 0, DVec3::ONE, axes).unwrap();
    mesh.new_basis(2, 1, DVec3::ZERO, axes).unwrap();
    assert_eq!(mesh.new_basis(1, 0, DVec3::ZERO, axes), Err(MeshError::BasisExists(1)));

    assert_eq!(mesh.basis_center(1).unwrap(), DVec3::ONE);
    assert_eq!(mesh.basis_center(0).unwrap(), DVec3::ZERO);
    assert_eq!(mesh.basis_axis(0, 2).unwrap(), DVec3::Z);
    assert!(mesh.basis_axis(1, 3).is_err());

    mesh.delete_basis(1).unwrap();
    assert_eq!(mesh.basis(2).unwrap().father, 0);
    assert_eq!(mesh.basis_center(1), Err(MeshError::UnknownBasis(1)));
}

#[test]
fn test_instance_detaches_vertices() {
    let mut mesh = Mesh::new();
    let axes = [DVec3::X, DVec3::Y, DVec3::Z];
    mesh.new_basis(1, 0, DVec3::ZERO, axes).unwrap();
    mesh.new_basis(2, 0, DVec3::ZERO, axes).unwrap();
    let v = mesh.new_vertex(DVec3::ZERO, 2, 0.3, (0.0, 0.0));

    assert!(mesh.set_instance(2, 2, false).is_err());
    mesh.set_instance(2, 1, true).unwrap();
    assert_eq!(mesh.vertex(v).unwrap().basis(), 0);
    assert_eq!(
        mesh.basis(2).unwrap().instance,
        Some(Instance {
            original: 1,
            recursive: true
        })
    );
}

#[test]
fn test_delete_color_clears_vertices() {
    let mut mesh = Mesh::new();
    mesh.new_color(3, 1.0, 0.0, 0.0).unwrap();
    assert_eq!(mesh.new_color(3, 0.0, 0.0, 0.0), Err(MeshError::ColorExists(3)));
    let v = mesh.new_vertex_with(VertexAttributes {
        color: 3,
        ..VertexAttributes::at(DVec3::ZERO)
    });
    mesh.delete_color(3).unwrap();
    assert_eq!(mesh.vertex(v).unwrap().color(), 0);
    assert!(mesh.color(3).is_none());
}
