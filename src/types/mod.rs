//! Core scalar and direction types.
//!
//! All floating-point state in the crate uses a single precision type,
//! [`Real`], selected at compile time. Spatial directions are represented
//! by the [`Direction`] enum, which also owns the canonical "other
//! directions" permutation used by the double-direction transverse
//! correction.

/// Floating-point type used for every field in the crate.
///
/// Defaults to `f64`; enable the `single-precision` feature to store all
/// state in `f32` instead. The two must never be mixed within one build.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

/// Floating-point type used for every field in the crate.
#[cfg(feature = "single-precision")]
pub type Real = f32;

/// Spatial direction on a structured grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    X,
    Y,
    Z,
}

/// Canonical "other directions" table, indexed by direction.
///
/// The ordering is fixed: downstream sign and orientation logic depends on
/// each row listing the two perpendicular axes in increasing order.
const OTHER_DIRS: [[usize; 2]; 3] = [[1, 2], [0, 2], [0, 1]];

impl Direction {
    /// All directions in axis order.
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    /// Axis index of this direction (X = 0, Y = 1, Z = 2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }

    /// Direction for an axis index.
    ///
    /// # Panics
    /// Panics if `index > 2`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Direction::X,
            1 => Direction::Y,
            2 => Direction::Z,
            _ => panic!("direction index out of range: {index}"),
        }
    }

    /// The two directions perpendicular to this one, in canonical order.
    #[inline]
    pub fn others(self) -> (Direction, Direction) {
        let [a, b] = OTHER_DIRS[self.index()];
        (Direction::from_index(a), Direction::from_index(b))
    }

    /// The single perpendicular direction in a 2-D (x, y) problem.
    ///
    /// # Panics
    /// Panics for [`Direction::Z`], which has no 2-D perpendicular.
    #[inline]
    pub fn perpendicular_2d(self) -> Self {
        match self {
            Direction::X => Direction::Y,
            Direction::Y => Direction::X,
            Direction::Z => panic!("Z has no perpendicular in a 2-D problem"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_index(dir.index()), dir);
        }
    }

    #[test]
    fn test_others_canonical_order() {
        // The documented fixed mapping: each row in increasing axis order.
        assert_eq!(Direction::X.others(), (Direction::Y, Direction::Z));
        assert_eq!(Direction::Y.others(), (Direction::X, Direction::Z));
        assert_eq!(Direction::Z.others(), (Direction::X, Direction::Y));
    }

    #[test]
    fn test_others_never_contain_self() {
        for dir in Direction::ALL {
            let (a, b) = dir.others();
            assert_ne!(a, dir);
            assert_ne!(b, dir);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_perpendicular_2d() {
        assert_eq!(Direction::X.perpendicular_2d(), Direction::Y);
        assert_eq!(Direction::Y.perpendicular_2d(), Direction::X);
    }

    #[test]
    #[should_panic]
    fn test_perpendicular_2d_rejects_z() {
        let _ = Direction::Z.perpendicular_2d();
    }
}
