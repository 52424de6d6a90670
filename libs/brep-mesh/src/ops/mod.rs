//! # Operators
//!
//! Topological and attribute operators. Every entry point is a method on
//! [`Mesh`](crate::Mesh) taking the id of its source selection and an
//! optional result id:
//!
//! - `None` discards the result
//! - the source id replaces the source selection
//! - any other id creates or overwrites that selection
//!
//! Preconditions are checked before the mesh is touched. Once an operator
//! starts rewriting, it runs to completion; there is no rollback.

pub mod bevel;
pub mod connect;
pub mod cut;
pub mod extrude;
pub mod homotecy;
pub mod mapping;
pub mod mirror;
pub mod separate;
pub mod skin;
pub mod smooth;
pub mod zap;
