//! Passive-scalar slot mapping.
//!
//! Advected scalars (species mass fractions, tracers) occupy one slot in
//! the conservative layout and one in the primitive layout. The map pairs
//! them up. It is immutable once built; the list order defines the update
//! order inside the correction kernels but carries no other meaning.

use crate::state::field::StateError;
use crate::state::slots::{QFS, UFS};

/// Bidirectional conservative/primitive slot map for passive scalars.
#[derive(Clone, Debug, Default)]
pub struct PassiveMap {
    cons: Vec<usize>,
    prim: Vec<usize>,
}

impl PassiveMap {
    /// Build a map from parallel slot lists.
    ///
    /// The lists must have equal length; entry `i` of each refers to the
    /// same scalar.
    pub fn new(cons: Vec<usize>, prim: Vec<usize>) -> Result<Self, StateError> {
        if cons.len() != prim.len() {
            return Err(StateError::PassiveMapLength(cons.len(), prim.len()));
        }
        Ok(Self { cons, prim })
    }

    /// The standard contiguous layout: `npassive` scalars starting at
    /// `UFS` / `QFS`.
    pub fn contiguous(npassive: usize) -> Self {
        Self {
            cons: (0..npassive).map(|n| UFS + n).collect(),
            prim: (0..npassive).map(|n| QFS + n).collect(),
        }
    }

    /// A map with no passive scalars.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of passive scalars.
    #[inline]
    pub fn len(&self) -> usize {
        self.cons.len()
    }

    /// Whether there are no passive scalars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cons.is_empty()
    }

    /// Iterate over (conservative slot, primitive slot) pairs in order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cons.iter().copied().zip(self.prim.iter().copied())
    }
}
