//! Boundary tags for the domain faces.
//!
//! Each side of the computational domain carries a tag that determines how
//! the velocity-divergence stencil differences across it: interior and
//! periodic sides keep the centered stencil, physical sides switch to
//! one-sided differencing.

use crate::types::Direction;

/// Tag identifying the type of a domain face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BcTag {
    /// Interior boundary (valid ghost data from a neighboring block)
    Interior,

    /// Periodic boundary (ghost data wraps around)
    Periodic,

    /// Outflow (zero-gradient extrapolation)
    Outflow,

    /// Inflow (prescribed exterior state)
    Inflow,

    /// Solid wall (reflecting)
    Wall,

    /// Symmetry plane
    Symmetry,
}

impl BcTag {
    /// Whether this is a physical boundary requiring one-sided stencils.
    #[inline]
    pub fn is_physical(self) -> bool {
        !matches!(self, BcTag::Interior | BcTag::Periodic)
    }
}

impl Default for BcTag {
    fn default() -> Self {
        BcTag::Interior
    }
}

/// Per-direction low/high boundary tags for the whole domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DomainBc {
    /// Tag on the low side of each axis
    pub lo: [BcTag; 3],
    /// Tag on the high side of each axis
    pub hi: [BcTag; 3],
}

impl DomainBc {
    /// All sides interior (block fully surrounded by valid ghost data).
    pub fn all_interior() -> Self {
        Self::default()
    }

    /// The same physical tag on every side.
    pub fn uniform(tag: BcTag) -> Self {
        Self {
            lo: [tag; 3],
            hi: [tag; 3],
        }
    }

    /// Tag on the low side of `dir`.
    #[inline]
    pub fn lo_tag(&self, dir: Direction) -> BcTag {
        self.lo[dir.index()]
    }

    /// Tag on the high side of `dir`.
    #[inline]
    pub fn hi_tag(&self, dir: Direction) -> BcTag {
        self.hi[dir.index()]
    }
}
