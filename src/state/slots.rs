//! Component slot layout for the state fields.
//!
//! Every multi-component field uses a fixed 3-D-shaped layout in both
//! dimensionalities; 2-D problems simply never read the z slots. Passive
//! scalars occupy the contiguous tail of the conservative and primitive
//! blocks and are addressed through a
//! [`PassiveMap`](crate::state::PassiveMap).

use crate::types::Direction;

// Conservative state components.

/// Density
pub const URHO: usize = 0;
/// x-momentum
pub const UMX: usize = 1;
/// y-momentum
pub const UMY: usize = 2;
/// z-momentum
pub const UMZ: usize = 3;
/// Total energy density
pub const UEDEN: usize = 4;
/// First passive-scalar density slot
pub const UFS: usize = 5;

/// Number of conservative components for a given passive-scalar count.
pub const fn ncons(npassive: usize) -> usize {
    UFS + npassive
}

/// Conservative momentum slot for a direction.
#[inline]
pub const fn umom(dir: Direction) -> usize {
    UMX + dir.index()
}

// Primitive state components.

/// Density
pub const QRHO: usize = 0;
/// x-velocity
pub const QU: usize = 1;
/// y-velocity
pub const QV: usize = 2;
/// z-velocity
pub const QW: usize = 3;
/// Pressure
pub const QPRES: usize = 4;
/// Internal energy density (rho e)
pub const QREINT: usize = 5;
/// First passive-scalar primitive slot
pub const QFS: usize = 6;

/// Number of primitive components for a given passive-scalar count.
pub const fn nprim(npassive: usize) -> usize {
    QFS + npassive
}

/// Primitive velocity slot for a direction.
#[inline]
pub const fn qvel(dir: Direction) -> usize {
    QU + dir.index()
}

// Face Godunov state components.

/// Face-normal x-velocity
pub const GDU: usize = 0;
/// Face-normal y-velocity
pub const GDV: usize = 1;
/// Face-normal z-velocity
pub const GDW: usize = 2;
/// Face pressure
pub const GDPRES: usize = 3;
/// Number of Godunov state components
pub const NGDNV: usize = 4;

/// Godunov velocity slot for the face-normal direction.
#[inline]
pub const fn gdvel(dir: Direction) -> usize {
    GDU + dir.index()
}

// Auxiliary components.

/// Adiabatic-index-like coefficient (gamma_c from the equation of state)
pub const QGAMC: usize = 0;
/// Number of auxiliary components
pub const NQAUX: usize = 1;
