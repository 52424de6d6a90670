//! # Vertex Record
//!
//! A vertex owns its ordered fan of incident edges. The fan follows the
//! counter-clockwise facet order around the vertex once the mesh is settled.

use glam::DVec3;

use super::geometry::NormalCache;
use super::EdgeId;

/// Per-vertex data that is copied or interpolated when vertices are
/// duplicated or inserted along an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAttributes {
    /// Position in model space
    pub position: DVec3,
    /// Texture coordinates
    pub uv: (f32, f32),
    /// Basis id the vertex is skinned to (0 = root frame)
    pub basis: u32,
    /// Blend toward the basis' parent (0 = fully in basis)
    pub skin_ratio: f32,
    /// Color id (0 = none)
    pub color: u32,
}

impl VertexAttributes {
    /// Attributes of a plain unskinned, uncolored vertex.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            uv: (0.0, 0.0),
            basis: 0,
            skin_ratio: 0.0,
            color: 0,
        }
    }

    /// Interpolates the attributes of a vertex inserted at `ratio` from `a`
    /// toward `b`.
    ///
    /// The position moves linearly. UVs are weighted with `ratio` on `a`.
    /// Skin ratios blend only when both parents share a basis; otherwise,
    /// like the color, the nearer parent wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::VertexAttributes;
    /// use glam::DVec3;
    ///
    /// let a = VertexAttributes::at(DVec3::ZERO);
    /// let b = VertexAttributes::at(DVec3::X * 2.0);
    /// let mid = VertexAttributes::average(&a, &b, 0.25);
    /// assert_eq!(mid.position, DVec3::new(0.5, 0.0, 0.0));
    /// ```
    pub fn average(a: &Self, b: &Self, ratio: f64) -> Self {
        let r = ratio as f32;
        let position = a.position + (b.position - a.position) * ratio;
        let uv = (
            a.uv.0 * r + b.uv.0 * (1.0 - r),
            a.uv.1 * r + b.uv.1 * (1.0 - r),
        );
        let nearer = if ratio <= 0.5 { a } else { b };
        let (basis, skin_ratio) = if a.basis == b.basis {
            (a.basis, b.skin_ratio * r + a.skin_ratio * (1.0 - r))
        } else {
            (nearer.basis, nearer.skin_ratio)
        };
        Self {
            position,
            uv,
            basis,
            skin_ratio,
            color: nearer.color,
        }
    }
}

/// A mesh vertex.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) name: u32,
    pub(crate) attrs: VertexAttributes,
    pub(crate) fan: Vec<EdgeId>,
    pub(crate) normal: NormalCache,
}

impl Vertex {
    pub(crate) fn new(name: u32, attrs: VertexAttributes) -> Self {
        Self {
            name,
            attrs,
            fan: Vec::new(),
            normal: NormalCache::default(),
        }
    }

    /// Stable external identity.
    #[inline]
    pub fn name(&self) -> u32 {
        self.name
    }

    /// Position in model space.
    #[inline]
    pub fn position(&self) -> DVec3 {
        self.attrs.position
    }

    /// All interpolable attributes.
    #[inline]
    pub fn attributes(&self) -> &VertexAttributes {
        &self.attrs
    }

    /// Texture coordinates.
    #[inline]
    pub fn uv(&self) -> (f32, f32) {
        self.attrs.uv
    }

    /// Basis id (0 = root).
    #[inline]
    pub fn basis(&self) -> u32 {
        self.attrs.basis
    }

    /// Skin ratio toward the basis' parent.
    #[inline]
    pub fn skin_ratio(&self) -> f32 {
        self.attrs.skin_ratio
    }

    /// Color id (0 = none).
    #[inline]
    pub fn color(&self) -> u32 {
        self.attrs.color
    }

    /// Incident edges in fan order.
    #[inline]
    pub fn fan(&self) -> &[EdgeId] {
        &self.fan
    }

    /// Number of incident edges.
    #[inline]
    pub fn degree(&self) -> usize {
        self.fan.len()
    }
}
