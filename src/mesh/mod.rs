//! Structured-grid mesh primitives.
//!
//! # Submodules
//!
//! - [`region`]: integer index vectors and inclusive index boxes
//! - [`boundary`]: per-direction domain boundary tags
//! - [`geometry`]: domain extent, grid spacing, dimensionality
//! - [`embedded`]: embedded-boundary area/volume fractions

pub mod boundary;
pub mod embedded;
pub mod geometry;
pub mod region;

pub use boundary::{BcTag, DomainBc};
pub use embedded::{EmbeddedError, EmbeddedGeometry};
pub use geometry::GridGeometry;
pub use region::{IVec, IndexBox};
