use super::*;
use approx::assert_relative_eq;
use glam::DVec3;

use crate::error::MeshError;

fn cube() -> Mesh {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    mesh
}

fn all_vertices(mesh: &Mesh) -> Selection {
    Selection::Vertices(VertexId::all(mesh))
}

// =============================================================================
// SELECTION VALUE
// =============================================================================

#[test]
fn test_selection_insert_respects_domain() {
    let mesh = cube();
    let v = mesh.vertices().next().unwrap().0;
    let f = mesh.facets().next().unwrap().0;

    let mut sel = Selection::new(Domain::Vertex);
    assert!(sel.insert(v));
    assert!(!sel.insert(v));
    assert!(!sel.insert(f));
    assert_eq!(sel.len(), 1);
    assert!(sel.contains(v));
    assert!(!sel.contains(f));
}

#[test]
fn test_selection_toggle_and_clear() {
    let mesh = cube();
    let v = mesh.vertices().next().unwrap().0;

    let mut sel = Selection::new(Domain::Vertex);
    sel.toggle(v);
    assert!(sel.contains(v));
    sel.toggle(v);
    assert!(sel.is_empty());

    sel.insert(v);
    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.domain(), Domain::Vertex);
}

#[test]
fn test_union_with_mismatched_domain_is_ignored() {
    let mesh = cube();
    let mut sel = all_vertices(&mesh);
    let edges = Selection::Edges(EdgeId::all(&mesh));
    sel.union_with(&edges);
    assert_eq!(sel.len(), 8);
    assert_eq!(sel.domain(), Domain::Vertex);
}

// =============================================================================
// CONVERSION
// =============================================================================

#[test]
fn test_cube_round_trip_vertices_edges() {
    let mesh = cube();
    let edges = mesh.convert(&all_vertices(&mesh), Domain::Edge, ConvertMode::Max);
    assert_eq!(edges.len(), 12);
    let back = mesh.convert(&edges, Domain::Vertex, ConvertMode::Min);
    assert_eq!(back.len(), 8);
}

#[test]
fn test_vertex_to_edge_min_needs_both_poles() {
    let mesh = cube();
    let v = mesh.vertices().next().unwrap().0;
    let single: Selection = BTreeSet::from([v]).into();

    assert!(mesh.convert(&single, Domain::Edge, ConvertMode::Min).is_empty());
    assert_eq!(mesh.convert(&single, Domain::Edge, ConvertMode::Max).len(), 3);
}

#[test]
fn test_edge_to_facet_min_needs_whole_boundary() {
    let mesh = cube();
    let f = mesh.facets().next().unwrap().0;
    let boundary: BTreeSet<EdgeId> = mesh.facet(f).unwrap().edges().iter().copied().collect();
    let mut partial = boundary.clone();
    let dropped = *partial.iter().next().unwrap();
    partial.remove(&dropped);

    let full = mesh.convert(&boundary.into(), Domain::Facet, ConvertMode::Min);
    assert_eq!(full.facets().unwrap(), &BTreeSet::from([f]));

    let partial = mesh.convert(&partial.into(), Domain::Facet, ConvertMode::Min);
    assert!(partial.is_empty());
}

#[test]
fn test_facet_to_vertex_goes_through_edges() {
    let mesh = cube();
    let f = mesh.facets().next().unwrap().0;
    let sel: Selection = BTreeSet::from([f]).into();
    let vertices = mesh.convert(&sel, Domain::Vertex, ConvertMode::Min);
    let expected: BTreeSet<VertexId> = mesh.facet_vertices(f).into_iter().collect();
    assert_eq!(vertices.vertices().unwrap(), &expected);
}

#[test]
fn test_round_trip_is_contractive() {
    let mesh = cube();
    let f = mesh.facets().next().unwrap().0;
    let sel: Selection = BTreeSet::from([f]).into();
    let edges = mesh.convert(&sel, Domain::Edge, ConvertMode::Max);
    let back = mesh.convert(&edges, Domain::Facet, ConvertMode::Min);
    assert!(back.facets().unwrap().is_superset(sel.facets().unwrap()));
    assert_eq!(back.len(), 1);
}

#[test]
fn test_propagate_zero_is_identity() {
    let mesh = cube();
    let f = mesh.facets().next().unwrap().0;
    let sel: Selection = BTreeSet::from([f]).into();
    assert_eq!(mesh.propagate(&sel, 0), sel);
}

#[test]
fn test_propagate_one_ring_on_cube() {
    let mesh = cube();
    let f = mesh.facets().next().unwrap().0;
    let sel: Selection = BTreeSet::from([f]).into();
    // Every other facet of a cube shares a vertex with any facet but the opposite one.
    assert_eq!(mesh.propagate(&sel, 1).len(), 5);
    assert_eq!(mesh.propagate(&sel, 2).len(), 6);
}

#[test]
fn test_center_of_cube() {
    let mesh = cube();
    let center = mesh.center(&all_vertices(&mesh)).unwrap();
    assert_relative_eq!(center.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(center.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(center.z, 0.0, epsilon = 1e-12);
    assert!(mesh.center(&Selection::new(Domain::Edge)).is_none());
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn test_new_selection_rejects_zero_and_duplicates() {
    let mut mesh = cube();
    assert!(matches!(
        mesh.new_selection(0, Domain::Vertex),
        Err(MeshError::InvalidParameter { .. })
    ));
    mesh.new_selection(1, Domain::Vertex).unwrap();
    assert_eq!(mesh.new_selection(1, Domain::Edge), Err(MeshError::SelectionExists(1)));
}

#[test]
fn test_add_and_sub_single() {
    let mut mesh = cube();
    mesh.new_selection(1, Domain::Edge).unwrap();
    let (id, edge) = mesh.edges().next().map(|(id, e)| (id, e.name())).unwrap();

    mesh.add_single(1, edge).unwrap();
    assert!(mesh.is_selected(1, id));
    mesh.sub_single(1, edge).unwrap();
    assert!(!mesh.is_selected(1, id));

    assert_eq!(mesh.add_single(9, edge), Err(MeshError::UnknownSelection(9)));
    assert_eq!(
        mesh.add_single(1, 4242),
        Err(MeshError::UnknownElement {
            domain: Domain::Edge,
            name: 4242
        })
    );
}

#[test]
fn test_add_selection_converts_with_min() {
    let mut mesh = cube();
    mesh.new_selection(1, Domain::Facet).unwrap();
    mesh.new_selection(2, Domain::Vertex).unwrap();
    let f = mesh.facets().next().unwrap().0;
    for v in mesh.facet_vertices(f) {
        let name = mesh.vertex(v).unwrap().name();
        mesh.add_single(2, name).unwrap();
    }

    mesh.add_selection(1, 2).unwrap();
    assert_eq!(mesh.selection(1).unwrap().facets().unwrap(), &BTreeSet::from([f]));

    mesh.sub_selection(1, 2).unwrap();
    assert!(mesh.selection(1).unwrap().is_empty());
}

#[test]
fn test_toggle_selection_complements() {
    let mut mesh = cube();
    mesh.new_selection(1, Domain::Facet).unwrap();
    let name = mesh.facets().next().unwrap().1.name();
    mesh.add_single(1, name).unwrap();
    mesh.toggle_selection(1).unwrap();
    assert_eq!(mesh.selection(1).unwrap().len(), 5);
    mesh.toggle_selection(1).unwrap();
    assert_eq!(mesh.selection(1).unwrap().len(), 1);
}

#[test]
fn test_output_routing() {
    let mut mesh = cube();
    mesh.new_selection(1, Domain::Facet).unwrap();
    let name = mesh.facets().next().unwrap().1.name();
    mesh.add_single(1, name).unwrap();

    mesh.convert_selection(1, Domain::Edge, ConvertMode::Max, None).unwrap();
    assert_eq!(mesh.selection(1).unwrap().domain(), Domain::Facet);

    mesh.convert_selection(1, Domain::Edge, ConvertMode::Max, Some(2)).unwrap();
    assert_eq!(mesh.selection(2).unwrap().len(), 4);
    assert_eq!(mesh.selection(1).unwrap().len(), 1);

    mesh.convert_selection(1, Domain::Vertex, ConvertMode::Max, Some(1)).unwrap();
    assert_eq!(mesh.selection(1).unwrap().domain(), Domain::Vertex);
    assert_eq!(mesh.selection(1).unwrap().len(), 4);
}

#[test]
fn test_selection_center_errors_on_empty() {
    let mut mesh = cube();
    mesh.new_selection(1, Domain::Vertex).unwrap();
    assert!(matches!(
        mesh.selection_center(1),
        Err(MeshError::EmptySelection { .. })
    ));
    mesh.toggle_selection(1).unwrap();
    let center = mesh.selection_center(1).unwrap();
    assert!(center.length() < 1e-12);
    assert_eq!(center, DVec3::ZERO);
}

#[test]
fn test_replaced_elements_leave_selections() {
    let mut mesh = cube();
    mesh.new_selection(1, Domain::Vertex).unwrap();
    mesh.toggle_selection(1).unwrap();
    let v = mesh.vertices().next().unwrap().0;
    let rep = mesh.new_vertex(DVec3::ONE, 0, 0.0, (0.0, 0.0));

    mesh.replace_vertex(v, Some(rep));
    assert!(!mesh.is_selected(1, v));
    assert!(mesh.is_selected(1, rep));
    assert_eq!(mesh.selection(1).unwrap().len(), 8);
}
