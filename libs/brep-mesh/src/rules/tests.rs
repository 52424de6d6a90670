use super::*;
use glam::DVec3;

fn tetra() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.tetrahedron(None).unwrap();
    mesh
}

#[test]
fn test_rule_display() {
    assert_eq!(Rule::V2.to_string(), "rule_v2");
    assert_eq!(Rule::F3.to_string(), "rule_f3");
    assert_eq!(Rule::ALL.len(), 10);
}

#[test]
fn test_platonic_solids_are_valid() {
    let mut mesh = Mesh::new();
    mesh.tetrahedron(None).unwrap();
    mesh.cube(None).unwrap();
    mesh.octahedron(None).unwrap();
    mesh.icosahedron(None).unwrap();
    mesh.dodecahedron(None).unwrap();
    mesh.validate().unwrap();
}

#[test]
fn test_isolated_vertex_breaks_v1() {
    let mut mesh = tetra();
    let lonely = mesh.new_vertex(DVec3::ZERO, 0, 0.0, (0.0, 0.0));
    assert_eq!(mesh.check_vertex(lonely), Some(Rule::V1));
    assert!(matches!(
        mesh.validate(),
        Err(MeshError::InvariantViolation { rule: Rule::V1, .. })
    ));
}

#[test]
fn test_dangling_edge_breaks_e2_and_e3() {
    let mut mesh = tetra();
    let a = mesh.vertices().next().unwrap().0;
    let b = mesh.new_vertex(DVec3::ONE, 0, 0.0, (0.0, 0.0));
    let e = mesh.new_edge(a, b);
    assert!(mesh.rule_e1(e));
    assert!(!mesh.rule_e2(e));
    assert!(!mesh.rule_e3(e));
    assert_eq!(mesh.check_edge(e), Some(Rule::E2));
}

#[test]
fn test_reversed_fan_breaks_v2() {
    let mut mesh = tetra();
    let v = mesh.vertices().next().unwrap().0;
    assert!(mesh.rule_v2(v));
    mesh.vertices[v].fan.reverse();
    assert!(!mesh.rule_v2(v));
    assert_eq!(mesh.check_vertex(v), Some(Rule::V2));
}

#[test]
fn test_scrambled_boundary_breaks_f2() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    let f = mesh.facets().next().unwrap().0;
    assert!(mesh.rule_f2(f));
    mesh.facets[f].edges.swap(0, 1);
    mesh.facets[f].edges.swap(1, 2);
    // a quad boundary a-b-c-d reordered to b-c-a-d
    assert!(!mesh.rule_f2(f));
}

#[test]
fn test_empty_facet_breaks_f1() {
    let mut mesh = tetra();
    let f = mesh.new_empty_facet();
    assert_eq!(mesh.check_facet(f), Some(Rule::F1));
}
