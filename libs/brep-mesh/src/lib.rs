//! # B-rep Mesh
//!
//! Boundary-representation mesh kernel for interactive polygonal modeling.
//! The kernel keeps a winged topology of vertices, edges and facets
//! consistent while topological operators rewrite it.
//!
//! ## Architecture
//!
//! ```text
//! Mesh (slotmap arenas, named selections, bases, colors)
//!   ├── mesh::topology   fan / boundary maintenance primitives
//!   ├── selection        domain conversion and propagation
//!   ├── ops              extrude, bevel, connect, cut, smooth, separate, mirror, ...
//!   └── rules            structural invariants checked by `Mesh::validate`
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use brep_mesh::{Domain, Mesh};
//! use brep_mesh::ops::extrude::Displacement;
//!
//! let mut mesh = Mesh::new();
//! mesh.cube(Some(1)).unwrap();
//! mesh.new_selection(2, Domain::Facet).unwrap();
//! let first = mesh.facets().next().map(|(_, f)| f.name()).unwrap();
//! mesh.add_single(2, first).unwrap();
//! mesh.extrude(2, Displacement::FacetNormal, 0.5, Some(3)).unwrap();
//!
//! assert_eq!(mesh.selection(3).unwrap().len(), 4);
//! assert_eq!(mesh.stats().euler_characteristic(), 2);
//! mesh.validate().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod rules;
pub mod selection;

pub use crate::config::KernelConfig;
pub use error::{MeshError, MeshResult};
pub use mesh::{
    Basis, Color, Edge, EdgeId, Facet, FacetId, Mesh, MeshStats, Pole, Side, Vertex,
    VertexAttributes, VertexId,
};
pub use rules::Rule;
pub use selection::{ConvertMode, Domain, Element, Selection};
