//! Transverse correction of directional predicted face states.
//!
//! After the directional reconstruction produces left/right predicted
//! states `qm`/`qp` at each face, every direction's states must absorb the
//! flux exchange of the perpendicular direction(s) within the same
//! timestep, or the multidimensional update loses upwind consistency.
//!
//! Three kernels implement this:
//!
//! - [`correct_2d`](dim2::correct_2d): the single perpendicular direction
//!   of a 2-D problem, with embedded-boundary cut-face suppression and
//!   half-timestep source terms;
//! - [`correct_3d_one`](dim3::correct_3d_one): first pass of the 3-D
//!   two-pass scheme, one perpendicular direction, no sources;
//! - [`correct_3d_both`](dim3::correct_3d_both): second pass, both
//!   perpendicular directions at once, completing the source and timestep
//!   accounting.
//!
//! All three share the same failure containment: if a correction would
//! drive density negative and the reset policy is enabled, that state's
//! correction is discarded entirely (the pre-correction conservative
//! values are kept), independently for the left and right states. Pressure
//! is clamped to `small_pres` after every correction regardless of branch.
//! There are no error returns in these kernels.

pub mod dim2;
pub mod dim3;

pub use dim2::{correct_2d, TransverseCoeffs, TransverseInput2D};
pub use dim3::{
    correct_3d_both, correct_3d_one, TransverseCoeffsBoth, TransverseInput3D,
    TransverseInputBoth,
};

use crate::mesh::IVec;
use crate::state::slots::{GDPRES, QREINT, QRHO, QU};
use crate::state::Field;
use crate::types::Real;

/// Correction policy shared by all transverse kernels.
#[derive(Clone, Copy, Debug)]
pub struct TransverseOptions {
    /// Discard a correction that would drive density negative
    pub reset_density: bool,
    /// Pressure floor applied after every correction
    pub small_pres: Real,
}

/// Scaled flux differences to subtract from one conservative state.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FluxDiff {
    pub rho: Real,
    pub mom: [Real; 3],
    pub ener: Real,
}

/// One state after conversion to conservative form and subtraction of the
/// transverse flux differences.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CorrectedCons {
    pub rho: Real,
    pub mom: [Real; 3],
    pub ener: Real,
    /// True if the reset-density fallback discarded the correction
    pub reset: bool,
}

/// Convert the primitive state at `iv` to conservative form, subtract the
/// flux differences, and apply the reset-density fallback.
///
/// Only the first `ndim` momentum components participate; the kinetic
/// energy uses the same `ndim` velocity components.
#[inline]
pub(crate) fn apply_flux_diff(
    q: &Field,
    iv: IVec,
    ndim: usize,
    d: &FluxDiff,
    reset_density: bool,
) -> CorrectedCons {
    let rr = q.at(iv, QRHO);
    let mut mom = [0.0; 3];
    let mut vsq = 0.0;
    for axis in 0..ndim {
        let v = q.at(iv, QU + axis);
        vsq += v * v;
        mom[axis] = rr * v;
    }
    let ekin = 0.5 * rr * vsq;
    let re = q.at(iv, QREINT) + ekin;

    let rho_new = rr - d.rho;
    if reset_density && rho_new < 0.0 {
        // Discard the correction: keep the pre-correction conservative state.
        return CorrectedCons {
            rho: rr,
            mom,
            ener: re,
            reset: true,
        };
    }
    CorrectedCons {
        rho: rho_new,
        mom: [mom[0] - d.mom[0], mom[1] - d.mom[1], mom[2] - d.mom[2]],
        ener: re - d.ener,
        reset: false,
    }
}

/// Kinetic energy density of a corrected conservative state.
#[inline]
pub(crate) fn kinetic_energy(c: &CorrectedCons, ndim: usize) -> Real {
    let mut msq = 0.0;
    for axis in 0..ndim {
        msq += c.mom[axis] * c.mom[axis];
    }
    0.5 * msq / c.rho
}

/// Flux-weighted mixing update for one passive scalar.
///
/// The new conserved passive mass is the old conserved mass minus the
/// scaled cross-flux `dflux`; the corrected primitive value is that mass
/// divided by the corrected density, plus the caller's source term. The
/// caller supplies `dflux` and the density flux difference `flx_rho` so
/// the floating-point sequence stays identical across all three kernels.
#[inline]
pub(crate) fn update_passive(
    out: &mut Field,
    iv_out: IVec,
    pre: &Field,
    iv_pre: IVec,
    qslot: usize,
    dflux: Real,
    flx_rho: Real,
    src: Real,
) {
    let rr = pre.at(iv_pre, QRHO);
    let rr_new = rr - flx_rho;
    let mass_new = rr * pre.at(iv_pre, qslot) - dflux;
    out.set(iv_out, qslot, mass_new / rr_new + src);
}

/// Face pressure/velocity terms entering the pressure correction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PressureTerms {
    /// Difference of the pressure-velocity product across the face pair
    pub dau_p: Real,
    /// Average face pressure
    pub p_av: Real,
    /// Normal-velocity difference across the face pair
    pub dau: Real,
}

/// Read the Godunov-state pressure/velocity terms for the face pair
/// `(iv, ivp)` with normal velocity in component `vslot`.
#[inline]
pub(crate) fn pressure_terms(qface: &Field, iv: IVec, ivp: IVec, vslot: usize) -> PressureTerms {
    let pgp = qface.at(ivp, GDPRES);
    let pgm = qface.at(iv, GDPRES);
    let ugp = qface.at(ivp, vslot);
    let ugm = qface.at(iv, vslot);
    PressureTerms {
        dau_p: pgp * ugp - pgm * ugm,
        p_av: 0.5 * (pgp + pgm),
        dau: ugp - ugm,
    }
}
