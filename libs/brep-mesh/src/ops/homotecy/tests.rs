use super::*;
use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_2;

use crate::selection::Domain;

fn assert_vec_eq(a: DVec3, b: DVec3) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
}

#[test]
fn test_scale_about_origin() {
    assert_vec_eq(Homotecy::Scale(3.0).apply(DVec3::new(1.0, -2.0, 0.5)), DVec3::new(3.0, -6.0, 1.5));
}

#[test]
fn test_stretch_normalizes_axis() {
    let p = Homotecy::stretch(DVec3::new(0.0, 4.0, 0.0), 3.0).apply(DVec3::new(1.0, 1.0, 1.0));
    assert_vec_eq(p, DVec3::new(1.0, 3.0, 1.0));
}

#[test]
fn test_shear_moves_along_axis() {
    let p = Homotecy::shear(DVec3::Z, 0.5).apply(DVec3::new(2.0, 0.0, 1.0));
    assert_vec_eq(p, DVec3::new(2.0, 0.0, 2.0));
}

#[test]
fn test_shear_on_axis_is_identity() {
    let p = Homotecy::shear(DVec3::Z, 0.5).apply(DVec3::new(0.0, 0.0, 3.0));
    assert_vec_eq(p, DVec3::new(0.0, 0.0, 3.0));
}

#[test]
fn test_rotate_quarter_turn() {
    let p = Homotecy::rotate(DVec3::Z, FRAC_PI_2).apply(DVec3::X);
    assert_vec_eq(p, DVec3::Y);
}

#[test]
fn test_zero_axis_is_identity() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    assert_eq!(Homotecy::rotate(DVec3::ZERO, 1.0).apply(p), p);
    assert_eq!(Homotecy::stretch(DVec3::ZERO, 5.0).apply(p), p);
}

#[test]
fn test_scale_selection_about_center() {
    let mut mesh = Mesh::new();
    mesh.cube(None).unwrap();
    mesh.new_selection(1, Domain::Facet).unwrap();
    let f = mesh.facets().next().unwrap().0;
    mesh.add_single(1, mesh.facet(f).unwrap().name()).unwrap();
    let center = mesh.selection_center(1).unwrap();
    let before = mesh.facet_normal(f);

    mesh.scale(1, center, 0.5).unwrap();
    assert_vec_eq(mesh.selection_center(1).unwrap(), center);
    assert_relative_eq!(mesh.edge_length(mesh.facet_edge(f, 0)), 0.5, epsilon = 1e-12);
    assert_vec_eq(mesh.facet_normal(f), before);
    mesh.validate().unwrap();
}

#[test]
fn test_translate_moves_every_vertex() {
    let mut mesh = Mesh::new();
    mesh.cube(Some(1)).unwrap();
    mesh.translate(1, DVec3::X, 2.0).unwrap();
    assert_vec_eq(mesh.selection_center(1).unwrap(), DVec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_rotate_invalidates_normals() {
    let mut mesh = Mesh::new();
    mesh.square(Some(1)).unwrap();
    let f = mesh.facets().next().unwrap().0;
    assert_relative_eq!(mesh.facet_normal(f).z, 1.0, epsilon = 1e-12);
    mesh.rotate(1, DVec3::ZERO, DVec3::X, FRAC_PI_2).unwrap();
    assert_relative_eq!(mesh.facet_normal(f).y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_unknown_selection() {
    let mut mesh = Mesh::new();
    assert_eq!(mesh.scale(3, DVec3::ZERO, 2.0), Err(MeshError::UnknownSelection(3)));
}
