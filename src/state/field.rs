//! Dense multi-component field over a structured index box.
//!
//! A [`Field`] stores one value of type [`Real`] per component per index of
//! its box, component-outermost, then k, j, i (innermost). The same
//! container serves cell-centered and face-centered data; face-centered
//! fields simply live on a staggered box
//! (see [`IndexBox::surrounding_nodes`]).
//!
//! Accessors are `#[inline]` with debug-only bounds checks: the correction
//! kernels index fields in their innermost loops and must not pay for
//! validation there. Fallible whole-field operations return a
//! [`StateError`] instead.

use thiserror::Error;

use crate::mesh::{IVec, IndexBox};
use crate::types::Real;

/// Error type for field-level operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// Two fields cover different index boxes.
    #[error("region mismatch: {0:?} vs {1:?}")]
    RegionMismatch(IndexBox, IndexBox),

    /// Two fields carry different component counts.
    #[error("component count mismatch: {0} vs {1}")]
    ComponentMismatch(usize, usize),

    /// A passive-scalar map is malformed.
    #[error("passive map: conservative and primitive lists differ in length ({0} vs {1})")]
    PassiveMapLength(usize, usize),
}

/// Dense multi-component array over an [`IndexBox`].
#[derive(Clone, Debug)]
pub struct Field {
    region: IndexBox,
    ncomp: usize,
    size: [usize; 3],
    data: Vec<Real>,
}

impl Field {
    /// Create a zero-filled field.
    pub fn new(region: IndexBox, ncomp: usize) -> Self {
        let size = region.size();
        let len = region.num_points() * ncomp;
        Self {
            region,
            ncomp,
            size,
            data: vec![0.0; len],
        }
    }

    /// Create a field initialized per index and component.
    pub fn from_fn(region: IndexBox, ncomp: usize, mut f: impl FnMut(IVec, usize) -> Real) -> Self {
        let mut field = Self::new(region, ncomp);
        for n in 0..ncomp {
            for iv in region.iter() {
                field.set(iv, n, f(iv, n));
            }
        }
        field
    }

    /// The index box this field covers.
    #[inline]
    pub fn region(&self) -> &IndexBox {
        &self.region
    }

    /// Number of components.
    #[inline]
    pub fn ncomp(&self) -> usize {
        self.ncomp
    }

    #[inline]
    fn offset(&self, iv: IVec, comp: usize) -> usize {
        debug_assert!(self.region.contains(iv), "index {iv:?} outside {:?}", self.region);
        debug_assert!(comp < self.ncomp, "component {comp} out of {}", self.ncomp);
        let lo = self.region.lo();
        let i = (iv.0[0] - lo.0[0]) as usize;
        let j = (iv.0[1] - lo.0[1]) as usize;
        let k = (iv.0[2] - lo.0[2]) as usize;
        ((comp * self.size[2] + k) * self.size[1] + j) * self.size[0] + i
    }

    /// Value at an index and component.
    #[inline]
    pub fn at(&self, iv: IVec, comp: usize) -> Real {
        self.data[self.offset(iv, comp)]
    }

    /// Overwrite the value at an index and component.
    #[inline]
    pub fn set(&mut self, iv: IVec, comp: usize, value: Real) {
        let off = self.offset(iv, comp);
        self.data[off] = value;
    }

    /// Add to the value at an index and component.
    #[inline]
    pub fn add(&mut self, iv: IVec, comp: usize, value: Real) {
        let off = self.offset(iv, comp);
        self.data[off] += value;
    }

    /// Scale the value at an index and component.
    #[inline]
    pub fn scale(&mut self, iv: IVec, comp: usize, factor: Real) {
        let off = self.offset(iv, comp);
        self.data[off] *= factor;
    }

    /// Fill every entry with one value.
    pub fn fill(&mut self, value: Real) {
        self.data.fill(value);
    }

    /// Copy all data from another field of identical shape.
    pub fn copy_from(&mut self, other: &Field) -> Result<(), StateError> {
        if self.region != other.region {
            return Err(StateError::RegionMismatch(self.region, other.region));
        }
        if self.ncomp != other.ncomp {
            return Err(StateError::ComponentMismatch(self.ncomp, other.ncomp));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Raw storage, component-outermost then k, j, i.
    pub fn data(&self) -> &[Real] {
        &self.data
    }

    /// Mutable raw storage, component-outermost then k, j, i.
    pub fn data_mut(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Length of one contiguous i-line in the raw storage.
    #[inline]
    pub fn line_len(&self) -> usize {
        self.size[0]
    }
}
