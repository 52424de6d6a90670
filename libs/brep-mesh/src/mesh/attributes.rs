//! # Bases and Colors
//!
//! Bases are local coordinate frames vertices can be skinned to; colors are
//! named RGB triples vertices can reference. Both are keyed by caller-chosen
//! ids, 0 being reserved for "none" (the root frame, no color).

use glam::DVec3;

use crate::error::{MeshError, MeshResult};

use super::Mesh;

/// Instancing link from a basis to another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instance {
    /// Basis whose geometry is reused
    pub original: u32,
    /// Whether child bases of the original are instanced too
    pub recursive: bool,
}

/// A local coordinate frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    /// Parent basis id (0 = root)
    pub father: u32,
    /// Origin of the frame
    pub position: DVec3,
    /// Frame axes
    pub axes: [DVec3; 3],
    /// Instancing link, if any
    pub instance: Option<Instance>,
}

/// A named RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Mesh {
    // =========================================================================
    // BASES
    // =========================================================================

    /// Registers a basis.
    pub fn new_basis(&mut self, id: u32, father: u32, position: DVec3, axes: [DVec3; 3]) -> MeshResult<()> {
        if id == 0 {
            return Err(MeshError::invalid_parameter("new_basis", "basis id 0 is the root frame"));
        }
        if self.bases.contains_key(&id) {
            return Err(MeshError::BasisExists(id));
        }
        self.bases.insert(
            id,
            Basis {
                father,
                position,
                axes,
                instance: None,
            },
        );
        Ok(())
    }

    /// Removes a basis. Its children are re-parented to the root, instances
    /// of it stop being instances and vertices skinned to it are detached.
    pub fn delete_basis(&mut self, id: u32) -> MeshResult<Basis> {
        let removed = self.bases.remove(&id).ok_or(MeshError::UnknownBasis(id))?;
        for other in self.bases.values_mut() {
            if other.father == id {
                other.father = 0;
            }
            if other.instance.is_some_and(|inst| inst.original == id) {
                other.instance = None;
            }
        }
        self.detach_vertices_from(id);
        Ok(removed)
    }

    /// Makes `id` an instance of `original`; vertices skinned to `id` are
    /// detached.
    pub fn set_instance(&mut self, id: u32, original: u32, recursive: bool) -> MeshResult<()> {
        if id == original {
            return Err(MeshError::invalid_parameter("set_instance", "a basis cannot instance itself"));
        }
        if original != 0 && !self.bases.contains_key(&original) {
            return Err(MeshError::UnknownBasis(original));
        }
        let basis = self.bases.get_mut(&id).ok_or(MeshError::UnknownBasis(id))?;
        basis.instance = Some(Instance { original, recursive });
        self.detach_vertices_from(id);
        Ok(())
    }

    fn detach_vertices_from(&mut self, id: u32) {
        for vertex in self.vertices.values_mut() {
            if vertex.attrs.basis == id {
                vertex.attrs.basis = 0;
                vertex.attrs.skin_ratio = 0.0;
            }
        }
    }

    /// Returns a basis.
    pub fn basis(&self, id: u32) -> Option<&Basis> {
        self.bases.get(&id)
    }

    /// Registered bases in id order.
    pub fn bases(&self) -> impl Iterator<Item = (u32, &Basis)> {
        self.bases.iter().map(|(id, b)| (*id, b))
    }

    /// Origin of a basis; the root frame sits at the origin.
    pub fn basis_center(&self, id: u32) -> MeshResult<DVec3> {
        if id == 0 {
            return Ok(DVec3::ZERO);
        }
        self.bases
            .get(&id)
            .map(|b| b.position)
            .ok_or(MeshError::UnknownBasis(id))
    }

    /// Axis `dim` of a basis; the root frame uses the canonical axes.
    pub fn basis_axis(&self, id: u32, dim: usize) -> MeshResult<DVec3> {
        if dim > 2 {
            return Err(MeshError::invalid_parameter("basis_axis", format!("no axis {dim}")));
        }
        if id == 0 {
            return Ok([DVec3::X, DVec3::Y, DVec3::Z][dim]);
        }
        self.bases
            .get(&id)
            .map(|b| b.axes[dim])
            .ok_or(MeshError::UnknownBasis(id))
    }

    // =========================================================================
    // COLORS
    // =========================================================================

    /// Registers a color.
    pub fn new_color(&mut self, id: u32, r: f32, g: f32, b: f32) -> MeshResult<()> {
        if id == 0 {
            return Err(MeshError::invalid_parameter("new_color", "color id 0 means no color"));
        }
        if self.colors.contains_key(&id) {
            return Err(MeshError::ColorExists(id));
        }
        self.colors.insert(id, Color { r, g, b });
        Ok(())
    }

    /// Removes a color; vertices using it lose their color.
    pub fn delete_color(&mut self, id: u32) -> MeshResult<Color> {
        let removed = self.colors.remove(&id).ok_or(MeshError::UnknownColor(id))?;
        for vertex in self.vertices.values_mut() {
            if vertex.attrs.color == id {
                vertex.attrs.color = 0;
            }
        }
        Ok(removed)
    }

    /// Returns a color.
    pub fn color(&self, id: u32) -> Option<&Color> {
        self.colors.get(&id)
    }

    /// Registered colors in id order.
    pub fn colors(&self) -> impl Iterator<Item = (u32, &Color)> {
        self.colors.iter().map(|(id, c)| (*id, c))
    }
}
