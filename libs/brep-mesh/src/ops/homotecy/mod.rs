//! # Homotecies
//!
//! Position transforms applied to the vertex footprint of a selection,
//! relative to an optional center. Facet normals around moved vertices are
//! invalidated through the mesh epoch.

use glam::{DMat3, DVec3};

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::selection::Selection;

/// A position transform about the origin.
///
/// Axes are normalized on construction; a zero axis makes the transform the
/// identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Homotecy {
    /// `p · ratio`
    Scale(f64),
    /// Scales the component of `p` along `axis` by `ratio`
    Stretch {
        /// Unit stretch axis
        axis: DVec3,
        /// Scale factor along the axis
        ratio: f64,
    },
    /// Moves `p` along `axis` proportionally to its distance from it
    Shear {
        /// Unit shear axis
        axis: DVec3,
        /// Shear factor
        ratio: f64,
    },
    /// Rotation by `angle` radians about `axis`
    Rotate {
        /// Unit rotation axis
        axis: DVec3,
        /// Angle in radians
        angle: f64,
    },
    /// Adds a fixed displacement
    Translate(DVec3),
}

impl Homotecy {
    /// Stretch along `axis`.
    pub fn stretch(axis: DVec3, ratio: f64) -> Self {
        Self::Stretch {
            axis: axis.normalize_or_zero(),
            ratio,
        }
    }

    /// Shear along `axis`.
    pub fn shear(axis: DVec3, ratio: f64) -> Self {
        Self::Shear {
            axis: axis.normalize_or_zero(),
            ratio,
        }
    }

    /// Rotation about `axis`.
    pub fn rotate(axis: DVec3, angle: f64) -> Self {
        Self::Rotate {
            axis: axis.normalize_or_zero(),
            angle,
        }
    }

    /// Transforms a position relative to the center.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::ops::homotecy::Homotecy;
    /// use glam::DVec3;
    ///
    /// let p = Homotecy::stretch(DVec3::Z, 2.0).apply(DVec3::new(1.0, 1.0, 1.0));
    /// assert_eq!(p, DVec3::new(1.0, 1.0, 2.0));
    /// ```
    pub fn apply(&self, p: DVec3) -> DVec3 {
        match *self {
            Homotecy::Scale(ratio) => p * ratio,
            Homotecy::Stretch { axis, ratio } => p + axis * (p.dot(axis) * (ratio - 1.0)),
            Homotecy::Shear { axis, ratio } => {
                let across = (p - axis * p.dot(axis)).normalize_or_zero();
                p + axis * (p.dot(across) * ratio)
            }
            Homotecy::Rotate { axis, angle } => {
                if axis == DVec3::ZERO {
                    p
                } else {
                    DMat3::from_axis_angle(axis, angle) * p
                }
            }
            Homotecy::Translate(displacement) => p + displacement,
        }
    }
}

impl Mesh {
    /// Applies `homotecy` about `center` to every vertex covered by `sel`.
    pub fn apply_homotecy(&mut self, sel: &Selection, center: Option<DVec3>, homotecy: Homotecy) {
        let center = center.unwrap_or(DVec3::ZERO);
        let vertices = self.selection_vertices(sel);
        for &v in &vertices {
            let vertex = &mut self.vertices[v];
            vertex.attrs.position = homotecy.apply(vertex.attrs.position - center) + center;
        }
        if !vertices.is_empty() {
            self.touch();
        }
    }

    fn homotecy_on(&mut self, id: u32, center: Option<DVec3>, homotecy: Homotecy) -> MeshResult<()> {
        let sel = self.selection(id).cloned().ok_or(MeshError::UnknownSelection(id))?;
        self.apply_homotecy(&sel, center, homotecy);
        Ok(())
    }

    /// Scales selection `id` about `center`.
    pub fn scale(&mut self, id: u32, center: DVec3, ratio: f64) -> MeshResult<()> {
        self.homotecy_on(id, Some(center), Homotecy::Scale(ratio))
    }

    /// Stretches selection `id` along `axis` about `center`.
    pub fn stretch(&mut self, id: u32, center: DVec3, axis: DVec3, ratio: f64) -> MeshResult<()> {
        self.homotecy_on(id, Some(center), Homotecy::stretch(axis, ratio))
    }

    /// Shears selection `id` along `axis` about `center`.
    pub fn shear(&mut self, id: u32, center: DVec3, axis: DVec3, ratio: f64) -> MeshResult<()> {
        self.homotecy_on(id, Some(center), Homotecy::shear(axis, ratio))
    }

    /// Rotates selection `id` by `angle` radians about the axis through
    /// `center`.
    pub fn rotate(&mut self, id: u32, center: DVec3, axis: DVec3, angle: f64) -> MeshResult<()> {
        self.homotecy_on(id, Some(center), Homotecy::rotate(axis, angle))
    }

    /// Moves selection `id` by `direction · ratio`.
    pub fn translate(&mut self, id: u32, direction: DVec3, ratio: f64) -> MeshResult<()> {
        self.homotecy_on(id, None, Homotecy::Translate(direction * ratio))
    }
}

#[cfg(test)]
mod tests;
