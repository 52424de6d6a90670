//! # Skinning and Colors
//!
//! Attribute operators: attaching the vertices of a selection to a basis and
//! painting them. Skinning to a basis turns off its instancing.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

impl Mesh {
    /// Attaches every vertex of selection `id` fully to `basis`.
    pub fn set_hardskin(&mut self, id: u32, basis: u32) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        self.take_basis(basis)?;
        let vertices = self.selection_vertices(&sel);
        for &v in &vertices {
            let attrs = &mut self.vertices[v].attrs;
            attrs.basis = basis;
            attrs.skin_ratio = 0.0;
        }
        log::debug!("hard skinned {} vertices to basis {}", vertices.len(), basis);
        Ok(())
    }

    /// Attaches every vertex of selection `id` to `basis`, blending toward
    /// the basis' parent by relative squared distance.
    ///
    /// A vertex at distance² `d1` from the basis origin and `d2` from its
    /// parent's origin (the world origin for a root parent) gets the ratio
    /// `d1 / (d1 + d2)`. The root basis skins hard.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.cube(Some(1)).unwrap();
    /// mesh.new_basis(3, 0, DVec3::new(0.0, 0.0, 4.0), [DVec3::X, DVec3::Y, DVec3::Z]).unwrap();
    /// mesh.set_softskin(1, 3).unwrap();
    ///
    /// for (_, v) in mesh.vertices() {
    ///     assert_eq!(v.basis(), 3);
    ///     // nearer to the origin than to the basis
    ///     assert!(v.skin_ratio() > 0.5);
    /// }
    /// ```
    pub fn set_softskin(&mut self, id: u32, basis: u32) -> MeshResult<()> {
        if basis == 0 {
            return self.set_hardskin(id, 0);
        }
        let sel = self.selection_snapshot(id)?;
        self.take_basis(basis)?;
        let origin = self.basis_center(basis)?;
        let father = self.basis(basis).map_or(0, |b| b.father);
        let father_origin = self.basis_center(father).unwrap_or_default();
        let vertices = self.selection_vertices(&sel);
        for &v in &vertices {
            let attrs = &mut self.vertices[v].attrs;
            let d1 = attrs.position.distance_squared(origin);
            let d2 = attrs.position.distance_squared(father_origin);
            attrs.basis = basis;
            attrs.skin_ratio = if d1 + d2 > 0.0 { (d1 / (d1 + d2)) as f32 } else { 0.0 };
        }
        log::debug!("soft skinned {} vertices to basis {}", vertices.len(), basis);
        Ok(())
    }

    /// Checks that `basis` exists and drops its instancing link.
    fn take_basis(&mut self, basis: u32) -> MeshResult<()> {
        if basis == 0 {
            return Ok(());
        }
        let entry = self.bases.get_mut(&basis).ok_or(MeshError::UnknownBasis(basis))?;
        entry.instance = None;
        Ok(())
    }

    /// Paints every vertex of selection `id`; color 0 removes the color.
    pub fn set_color(&mut self, id: u32, color: u32) -> MeshResult<()> {
        let sel = self.selection_snapshot(id)?;
        if color != 0 && self.color(color).is_none() {
            return Err(MeshError::UnknownColor(color));
        }
        for v in self.selection_vertices(&sel) {
            self.vertices[v].attrs.color = color;
        }
        Ok(())
    }
}
