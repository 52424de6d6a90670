//! # Config Crate
//!
//! Centralized configuration constants for the B-rep mesh kernel.
//! Every tolerance, operator weight and capacity hint used by the kernel
//! is defined here so that operators never carry their own literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, BEVSMOOTH_RATIO};
//!
//! // Signed distances whose product stays under EPSILON count as "on the plane"
//! let (ss, sn) = (1e-9_f64, 1e-9_f64);
//! assert!(ss * sn < EPSILON);
//!
//! // Rounding bevels always use the same ratio
//! assert!(BEVSMOOTH_RATIO > 0.0 && BEVSMOOTH_RATIO < 0.5);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain `const` items and a validated config struct
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
