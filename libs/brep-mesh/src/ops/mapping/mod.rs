//! # UV Mapping
//!
//! Projects texture coordinates onto the vertices of a selection from a
//! viewpoint looking at the origin.
//!
//! The view frame has `z` pointing from the viewpoint to the origin, `x`
//! horizontal and `y` completing it upward. Each vertex is pushed along a
//! projection direction (its normal, or a direction fixed by the kind of
//! mapping) until it meets the projection surface:
//!
//! - planar: the plane through the viewpoint facing the origin
//! - cylindrical: the cylinder around the view axis through the viewpoint
//! - spherical: the sphere around the origin through the viewpoint

use std::f64::consts::{FRAC_PI_2, PI};

use config::constants::approx_zero;
use glam::DVec3;

use crate::error::MeshResult;
use crate::mesh::Mesh;

/// Projection surface of a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MappingKind {
    /// Orthographic projection on the view plane
    Planar,
    /// Angle around the view axis, height along it
    Cylindrical,
    /// Longitude and latitude around the origin
    Spherical,
}

/// Parameters of a UV projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Projection surface
    pub kind: MappingKind,
    /// Viewpoint, looking at the origin
    pub viewpoint: DVec3,
    /// Multiplier applied after the offset
    pub scale: (f32, f32),
    /// Added to the raw coordinates
    pub offset: (f32, f32),
    /// Project along vertex normals instead of the kind's own direction
    pub along_normals: bool,
}

impl Projection {
    /// Unscaled projection of the given kind.
    pub fn new(kind: MappingKind, viewpoint: DVec3) -> Self {
        Self {
            kind,
            viewpoint,
            scale: (1.0, 1.0),
            offset: (0.0, 0.0),
            along_normals: false,
        }
    }
}

/// Orthonormal view frame.
struct Frame {
    x: DVec3,
    y: DVec3,
    z: DVec3,
    distance: f64,
}

impl Frame {
    fn looking_at_origin(viewpoint: DVec3) -> Self {
        let distance = viewpoint.length();
        let back = if approx_zero(distance) {
            DVec3::Z
        } else {
            viewpoint / distance
        };
        let x = DVec3::Z.cross(back).try_normalize().unwrap_or(DVec3::X);
        let y = back.cross(x);
        Self { x, y, z: -back, distance }
    }

    fn local(&self, v: DVec3) -> DVec3 {
        DVec3::new(v.dot(self.x), v.dot(self.y), v.dot(self.z))
    }
}

impl Projection {
    /// Texture coordinates of a point with vertex normal `normal`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::ops::mapping::{MappingKind, Projection};
    /// use glam::DVec3;
    ///
    /// let top = Projection::new(MappingKind::Planar, DVec3::new(0.0, 0.0, 5.0));
    /// assert_eq!(top.project(DVec3::new(0.25, -0.5, 1.0), DVec3::Z), (0.25, -0.5));
    /// ```
    pub fn project(&self, position: DVec3, normal: DVec3) -> (f32, f32) {
        let frame = Frame::looking_at_origin(self.viewpoint);
        let p = frame.local(position);
        let n = if self.along_normals {
            frame.local(normal)
        } else {
            match self.kind {
                MappingKind::Planar => DVec3::Z,
                MappingKind::Cylindrical => DVec3::new(p.x, p.y, 0.0).normalize_or_zero(),
                MappingKind::Spherical => p.normalize_or_zero(),
            }
        };
        let d = frame.distance;

        let (u, v) = match self.kind {
            MappingKind::Planar => {
                if n.z != 0.0 {
                    let h = d + p.z;
                    (p.x + h * n.x / n.z, p.y + h * n.y / n.z)
                } else {
                    (0.0, 0.0)
                }
            }
            MappingKind::Cylindrical => {
                let a = n.x * n.x + n.y * n.y;
                let b = 2.0 * (p.x * n.x + p.y * n.y);
                let c = p.x * p.x + p.y * p.y - d * d;
                let alpha = ((b * b - 4.0 * a * c).sqrt() - b) / (2.0 * a);
                let (x, y) = (p.x + n.x * alpha, p.y + n.y * alpha);
                let angle = (x / d).clamp(-1.0, 1.0).acos();
                let angle = if y < 0.0 { -angle } else { angle };
                (angle / PI, p.z + n.z * alpha)
            }
            MappingKind::Spherical => {
                let a = n.length_squared();
                let b = 2.0 * p.dot(n);
                let c = p.length_squared() - d * d;
                let alpha = ((b * b - 4.0 * a * c).sqrt() - b) / (2.0 * a);
                let s = p + n * alpha;
                let flat = s.x * s.x + s.y * s.y;
                let u = if flat > 0.0 {
                    let angle = (s.x / flat.sqrt()).clamp(-1.0, 1.0).acos();
                    if s.y < 0.0 {
                        -angle / PI
                    } else {
                        angle / PI
                    }
                } else {
                    0.0
                };
                let r = flat + s.z * s.z;
                let v = if r > 0.0 {
                    (s.z / r.sqrt()).clamp(-1.0, 1.0).asin() / FRAC_PI_2
                } else {
                    0.0
                };
                (u, v)
            }
        };
        let finite = |x: f64| if x.is_finite() { x as f32 } else { 0.0 };
        (
            (finite(u) + self.offset.0) * self.scale.0,
            (finite(v) + self.offset.1) * self.scale.1,
        )
    }
}

impl Mesh {
    /// Projects texture coordinates onto the vertices of selection `id`.
    pub fn mapping(&mut self, id: u32, projection: &Projection) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        let vertices = self.selection_vertices(&sel);
        let uvs: Vec<_> = vertices
            .iter()
            .map(|&v| {
                let normal = if projection.along_normals {
                    self.vertex_normal(v)
                } else {
                    DVec3::ZERO
                };
                (v, projection.project(self.vertex_position(v), normal))
            })
            .collect();
        log::debug!("{:?} mapping of {} vertices", projection.kind, uvs.len());
        for (v, uv) in uvs {
            self.vertices[v].attrs.uv = uv;
        }
        Ok(())
    }

    /// Sets the texture coordinates of every vertex of selection `id`.
    pub fn set_uv(&mut self, id: u32, u: f32, v: f32) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        for vertex in self.selection_vertices(&sel) {
            self.vertices[vertex].attrs.uv = (u, v);
        }
        Ok(())
    }
}
