//! Grid geometry: domain extent, spacing and dimensionality.

use crate::mesh::IndexBox;
use crate::types::{Direction, Real};

/// Uniform structured-grid geometry for one block hierarchy level.
#[derive(Clone, Copy, Debug)]
pub struct GridGeometry {
    /// Cell-index box of the whole computational domain
    pub domain: IndexBox,
    /// Grid spacing along each axis
    pub dx: [Real; 3],
    /// Number of spatial dimensions (2 or 3)
    pub ndim: usize,
}

impl GridGeometry {
    /// Create a geometry description.
    ///
    /// # Panics
    /// Panics if `ndim` is not 2 or 3 or a spacing is non-positive.
    pub fn new(domain: IndexBox, dx: [Real; 3], ndim: usize) -> Self {
        assert!(ndim == 2 || ndim == 3, "ndim must be 2 or 3, got {ndim}");
        for d in 0..ndim {
            assert!(dx[d] > 0.0, "non-positive grid spacing along axis {d}");
        }
        Self { domain, dx, ndim }
    }

    /// Grid spacing along a direction.
    #[inline]
    pub fn spacing(&self, dir: Direction) -> Real {
        self.dx[dir.index()]
    }

    /// Directions active in this problem, in axis order.
    #[inline]
    pub fn directions(&self) -> &'static [Direction] {
        &Direction::ALL[..self.ndim]
    }
}
