use super::*;

use config::constants::ConfigError;
use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::ops::extrude::Displacement;
use crate::selection::Domain;

#[test]
fn test_default_matches_constants() {
    let cfg = KernelConfig::default();
    assert_eq!(cfg.tolerance, EPSILON_TOLERANCE);
    assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
    assert_eq!(cfg.edge_capacity(), 2 * DEFAULT_CAPACITY);
}

#[test]
fn test_new_reports_config_errors() {
    assert_eq!(
        KernelConfig::new(0.0, 24),
        Err(MeshError::InvalidConfig(ConfigError::InvalidTolerance(0.0)))
    );
    assert_eq!(
        KernelConfig::new(1.0e-6, 0),
        Err(MeshError::InvalidConfig(ConfigError::InvalidCapacity(0)))
    );
    let message = KernelConfig::new(1.0e-6, 0).unwrap_err().to_string();
    assert!(message.contains("capacity"));
}

#[test]
fn test_negligible_lengths() {
    let cfg = KernelConfig::new(0.01, 8).unwrap();
    assert!(cfg.is_negligible(0.005));
    assert!(cfg.is_negligible(-0.01));
    assert!(!cfg.is_negligible(0.02));
}

#[test]
fn test_mesh_tolerance_drives_direction_fallback() {
    // a direction shorter than the tolerance extrudes along the facet normal
    let mut mesh = Mesh::with_config(KernelConfig::new(0.1, 16).unwrap());
    assert_eq!(mesh.config().capacity, 16);
    mesh.cube(None).unwrap();
    mesh.new_selection(1, Domain::Facet).unwrap();
    let (f, facet) = mesh.facets().next().unwrap();
    let name = facet.name();
    mesh.add_single(1, name).unwrap();
    let center = mesh.facet_center(f);
    let normal = mesh.facet_normal(f);

    let short = DVec3::new(normal.y, normal.z, normal.x) * 0.05;
    mesh.extrude(1, Displacement::Direction(short), 0.5, None).unwrap();
    let moved = mesh.facet_center(f) - center;
    assert!(moved.abs_diff_eq(normal * 0.5, 1e-12));
}
