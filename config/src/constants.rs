//! # Configuration Constants
//!
//! Centralized constants for the B-rep mesh kernel. Precision thresholds,
//! operator weights and arena sizing hints are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Operators**: Weights and ratios used by connect, smooth and bevel
//! - **Capacity**: Arena sizing hints

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Machine epsilon used by the topological operators.
///
/// Plane cuts treat a signed-distance product below `-EPSILON` as a crossing
/// and below `EPSILON` as "on the plane"; connect rejects candidates whose
/// angular cosine reaches `1 - EPSILON` and sorts zero-length candidates
/// (squared distance under `EPSILON`) first.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let (ss, sn) = (0.5_f64, -0.25_f64);
/// assert!(ss * sn < -EPSILON);
/// ```
pub const EPSILON: f64 = f64::EPSILON;

/// Numerical tolerance used for degenerate-geometry detection.
///
/// Vectors shorter than this are treated as zero (no displacement, no
/// rotation axis) and 2x2 determinants under it are considered singular.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

// =============================================================================
// OPERATOR CONSTANTS
// =============================================================================

/// Weight of the normalized distance term in the connect candidate cost.
///
/// The cost of joining two vertices is their angular cost plus
/// `CONNECT_DISTANCE_WEIGHT * sqrt(d2 / mean_d2)`.
///
/// # Example
///
/// ```rust
/// use config::constants::CONNECT_DISTANCE_WEIGHT;
///
/// let cost = 0.5 + CONNECT_DISTANCE_WEIGHT * (4.0_f64 / 1.0).sqrt();
/// assert!((cost - 0.9).abs() < 1e-12);
/// ```
pub const CONNECT_DISTANCE_WEIGHT: f64 = 0.2;

/// Relative out-of-plane slack allowed when two facet segments are tested
/// for intersection, as a fraction of the candidate segment length.
///
/// # Example
///
/// ```rust
/// use config::constants::CONNECT_ALIGNMENT_TOLERANCE;
///
/// let segment_length = 2.0;
/// let slack = segment_length * CONNECT_ALIGNMENT_TOLERANCE;
/// assert!((slack - 0.1).abs() < 1e-12);
/// ```
pub const CONNECT_ALIGNMENT_TOLERANCE: f64 = 0.05;

/// Bevel ratio applied at each round of a rounding bevel.
///
/// # Example
///
/// ```rust
/// use config::constants::BEVSMOOTH_RATIO;
///
/// assert!(BEVSMOOTH_RATIO < 0.5);
/// ```
pub const BEVSMOOTH_RATIO: f64 = 0.3;

/// Height profile offset used by smoothing: a flat dihedral yields this
/// height at a quarter turn.
pub const SMOOTH_HEIGHT_OFFSET: f64 = 0.75;

/// Height profile slope used by smoothing, per full turn.
pub const SMOOTH_HEIGHT_SLOPE: f64 = 1.5;

// =============================================================================
// CAPACITY CONSTANTS
// =============================================================================

/// Characteristic mesh size used to pre-size element arenas.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CAPACITY;
///
/// let vertices: Vec<u32> = Vec::with_capacity(DEFAULT_CAPACITY);
/// assert!(vertices.capacity() >= 2000);
/// ```
pub const DEFAULT_CAPACITY: usize = 2000;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into geometric predicates.
    pub tolerance: f64,
    /// Arena capacity hint for vertices, edges and facets.
    pub capacity: usize,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and capacity.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 64).expect("valid config");
    /// assert_eq!(cfg.capacity, 64);
    /// ```
    pub fn new(tolerance: f64, capacity: usize) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        Ok(Self {
            tolerance,
            capacity,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON_TOLERANCE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the capacity hint is zero.
    InvalidCapacity(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidCapacity(value) => {
                write!(f, "capacity must be > 0: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON_TOLERANCE.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON_TOLERANCE
}

/// Checks if a f64 value is approximately zero within EPSILON_TOLERANCE.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON_TOLERANCE
}

#[cfg(test)]
mod tests;
