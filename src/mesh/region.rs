//! Structured index space: integer coordinates and inclusive index boxes.
//!
//! Cell-centered fields live on an [`IndexBox`] of cell indices;
//! face-centered fields live on the same box staggered by one index along
//! the face normal (see [`IndexBox::surrounding_nodes`]). Two-dimensional
//! problems use the k = 0 plane of the same three-component index.

use crate::types::Direction;

/// Three-component structured-grid index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IVec(pub [i32; 3]);

impl IVec {
    /// Create an index from its components.
    #[inline]
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self([i, j, k])
    }

    /// Component along an axis.
    #[inline]
    pub const fn get(self, dir: Direction) -> i32 {
        self.0[dir.index()]
    }

    /// This index shifted by `by` cells along `dir`.
    #[inline]
    pub fn shifted(self, dir: Direction, by: i32) -> Self {
        let mut v = self.0;
        v[dir.index()] += by;
        Self(v)
    }

    /// Unit offset along a direction (the dimension vector).
    #[inline]
    pub fn unit(dir: Direction) -> Self {
        let mut v = [0; 3];
        v[dir.index()] = 1;
        Self(v)
    }
}

impl std::ops::Add for IVec {
    type Output = IVec;
    #[inline]
    fn add(self, rhs: IVec) -> IVec {
        IVec([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl std::ops::Sub for IVec {
    type Output = IVec;
    #[inline]
    fn sub(self, rhs: IVec) -> IVec {
        IVec([
            self.0[0] - rhs.0[0],
            self.0[1] - rhs.0[1],
            self.0[2] - rhs.0[2],
        ])
    }
}

/// Inclusive box of structured-grid indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexBox {
    lo: IVec,
    hi: IVec,
}

impl IndexBox {
    /// Create a box from inclusive corners.
    ///
    /// # Panics
    /// Panics if `hi` is below `lo` in any component.
    pub fn new(lo: IVec, hi: IVec) -> Self {
        assert!(
            lo.0[0] <= hi.0[0] && lo.0[1] <= hi.0[1] && lo.0[2] <= hi.0[2],
            "inverted index box: lo {lo:?}, hi {hi:?}"
        );
        Self { lo, hi }
    }

    /// A 2-D cell box on the k = 0 plane.
    pub fn new_2d(ilo: i32, jlo: i32, ihi: i32, jhi: i32) -> Self {
        Self::new(IVec::new(ilo, jlo, 0), IVec::new(ihi, jhi, 0))
    }

    /// Lower corner (inclusive).
    #[inline]
    pub const fn lo(&self) -> IVec {
        self.lo
    }

    /// Upper corner (inclusive).
    #[inline]
    pub const fn hi(&self) -> IVec {
        self.hi
    }

    /// This box grown by `n` cells on every side of the first `ndim` axes.
    pub fn grow(&self, n: i32, ndim: usize) -> Self {
        let mut lo = self.lo.0;
        let mut hi = self.hi.0;
        for d in 0..ndim {
            lo[d] -= n;
            hi[d] += n;
        }
        Self::new(IVec(lo), IVec(hi))
    }

    /// The face-index box of this cell box in direction `dir`.
    ///
    /// Face-centered fields are staggered by one index along the face
    /// normal: a cell box `[lo, hi]` has faces `[lo, hi + 1]` in `dir`.
    pub fn surrounding_nodes(&self, dir: Direction) -> Self {
        let mut hi = self.hi.0;
        hi[dir.index()] += 1;
        Self::new(self.lo, IVec(hi))
    }

    /// Extent along each axis.
    #[inline]
    pub fn size(&self) -> [usize; 3] {
        [
            (self.hi.0[0] - self.lo.0[0] + 1) as usize,
            (self.hi.0[1] - self.lo.0[1] + 1) as usize,
            (self.hi.0[2] - self.lo.0[2] + 1) as usize,
        ]
    }

    /// Total number of indices in the box.
    #[inline]
    pub fn num_points(&self) -> usize {
        let s = self.size();
        s[0] * s[1] * s[2]
    }

    /// Whether an index lies inside the box.
    #[inline]
    pub fn contains(&self, iv: IVec) -> bool {
        (0..3).all(|d| self.lo.0[d] <= iv.0[d] && iv.0[d] <= self.hi.0[d])
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &IndexBox) -> bool {
        self.contains(other.lo) && self.contains(other.hi)
    }

    /// Iterate over every index in the box, innermost axis first.
    pub fn iter(&self) -> impl Iterator<Item = IVec> + '_ {
        let lo = self.lo.0;
        let hi = self.hi.0;
        (lo[2]..=hi[2]).flat_map(move |k| {
            (lo[1]..=hi[1])
                .flat_map(move |j| (lo[0]..=hi[0]).map(move |i| IVec::new(i, j, k)))
        })
    }
}
