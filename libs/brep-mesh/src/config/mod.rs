//! # Kernel Configuration
//!
//! The two settings a [`Mesh`](crate::Mesh) reads at run time: the length
//! under which a direction counts as degenerate, and the element count its
//! arenas are sized for. Both are validated by the shared `config` crate.

use config::constants::{GlobalConfig, DEFAULT_CAPACITY, EPSILON_TOLERANCE};

use crate::error::MeshResult;

/// Run-time settings of a mesh.
///
/// # Examples
/// ```
/// use brep_mesh::config::KernelConfig;
/// let cfg = KernelConfig::default();
/// assert!(cfg.is_negligible(0.0));
/// assert!(!cfg.is_negligible(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Lengths under this are degenerate (zero extrusion direction).
    pub tolerance: f64,
    /// Expected vertex and facet count; edges get twice as much.
    pub capacity: usize,
}

impl KernelConfig {
    /// Validated configuration.
    ///
    /// # Examples
    /// ```
    /// use brep_mesh::config::KernelConfig;
    /// use brep_mesh::MeshError;
    ///
    /// let cfg = KernelConfig::new(1.0e-6, 64).unwrap();
    /// assert_eq!(cfg.edge_capacity(), 128);
    /// assert!(matches!(KernelConfig::new(-1.0, 64), Err(MeshError::InvalidConfig(_))));
    /// ```
    pub fn new(tolerance: f64, capacity: usize) -> MeshResult<Self> {
        Ok(GlobalConfig::new(tolerance, capacity)?.into())
    }

    /// Returns true if `length` is too short to carry a direction.
    #[inline]
    pub fn is_negligible(&self, length: f64) -> bool {
        length.abs() <= self.tolerance
    }

    /// Arena size for edges: a closed polygonal mesh has about twice as
    /// many edges as facets.
    #[inline]
    pub fn edge_capacity(&self) -> usize {
        self.capacity.saturating_mul(2)
    }
}

impl From<GlobalConfig> for KernelConfig {
    fn from(cfg: GlobalConfig) -> Self {
        Self {
            tolerance: cfg.tolerance,
            capacity: cfg.capacity,
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests;
