//! 3-D transverse correction kernels.
//!
//! In 3-D a face normal to direction *d* must absorb corrections from the
//! two directions orthogonal to *d*. This happens in two sequential
//! passes:
//!
//! 1. [`correct_3d_one`] corrects one direction's predicted states with a
//!    single perpendicular direction's flux. It applies no source terms
//!    and no half-timestep scaling; all of that accounting is deferred to
//!    the second pass.
//! 2. [`correct_3d_both`] corrects with both perpendicular directions at
//!    once and completes the source and timestep accounting.

use crate::mesh::IVec;
use crate::state::slots::{
    gdvel, QGAMC, QPRES, QREINT, QRHO, QU, QV, QW, UEDEN, UMX, UMY, UMZ, URHO,
};
use crate::state::{Field, PassiveMap};
use crate::types::{Direction, Real};

use super::{
    apply_flux_diff, kinetic_energy, pressure_terms, update_passive, FluxDiff, TransverseOptions,
};

/// Read-only field bundle for the single-perpendicular-direction pass.
pub struct TransverseInput3D<'a> {
    /// Pre-correction right-biased predicted states for the correction direction
    pub qm_pre: &'a Field,
    /// Pre-correction left-biased predicted states for the correction direction
    pub qp_pre: &'a Field,
    /// Perpendicular-direction flux field
    pub flux: &'a Field,
    /// Perpendicular-direction face Godunov states
    pub qface: &'a Field,
    /// Auxiliary state (adiabatic-index coefficient)
    pub qaux: &'a Field,
}

/// Correct the `dir`-predicted states at `iv` with the flux of a single
/// perpendicular direction `other`.
///
/// First pass of the two-pass 3-D scheme: no source terms, no
/// half-timestep scaling. Mutates `qp` at `iv` and `qm` at `iv + e(dir)`.
pub fn correct_3d_one(
    iv: IVec,
    dir: Direction,
    other: Direction,
    qm: &mut Field,
    qp: &mut Field,
    input: &TransverseInput3D<'_>,
    cdtdx: Real,
    pmap: &PassiveMap,
    opts: &TransverseOptions,
) {
    debug_assert_ne!(dir, other);
    let ivp0 = iv.shifted(other, 1); // perpendicular flux neighbor
    let ivp1 = iv.shifted(dir, 1); // forward neighbor receiving qm
    let vslot = gdvel(other);

    let d = FluxDiff {
        rho: cdtdx * (input.flux.at(ivp0, URHO) - input.flux.at(iv, URHO)),
        mom: [
            cdtdx * (input.flux.at(ivp0, UMX) - input.flux.at(iv, UMX)),
            cdtdx * (input.flux.at(ivp0, UMY) - input.flux.at(iv, UMY)),
            cdtdx * (input.flux.at(ivp0, UMZ) - input.flux.at(iv, UMZ)),
        ],
        ener: cdtdx * (input.flux.at(ivp0, UEDEN) - input.flux.at(iv, UEDEN)),
    };
    let gamc = input.qaux.at(iv, QGAMC);
    let pt = pressure_terms(input.qface, iv, ivp0, vslot);

    for (uslot, qslot) in pmap.iter() {
        let dflux = cdtdx * (input.flux.at(ivp0, uslot) - input.flux.at(iv, uslot));
        update_passive(qp, iv, input.qp_pre, iv, qslot, dflux, d.rho, 0.0);
        update_passive(qm, ivp1, input.qm_pre, ivp1, qslot, dflux, d.rho, 0.0);
    }

    let correct_state = |out: &mut Field, iv_out: IVec, pre: &Field| {
        let c = apply_flux_diff(pre, iv_out, 3, &d, opts.reset_density);

        out.set(iv_out, QRHO, c.rho);
        out.set(iv_out, QU, c.mom[0] / c.rho);
        out.set(iv_out, QV, c.mom[1] / c.rho);
        out.set(iv_out, QW, c.mom[2] / c.rho);
        out.set(iv_out, QREINT, c.ener - kinetic_energy(&c, 3));

        let p = if c.reset {
            pre.at(iv_out, QPRES)
        } else {
            pre.at(iv_out, QPRES) - cdtdx * (pt.dau_p + pt.p_av * pt.dau * (gamc - 1.0))
        };
        out.set(iv_out, QPRES, p.max(opts.small_pres));
    };

    correct_state(qp, iv, input.qp_pre);
    correct_state(qm, ivp1, input.qm_pre);
}

/// Timestep coefficients for the double-perpendicular-direction pass.
#[derive(Clone, Copy, Debug)]
pub struct TransverseCoeffsBoth {
    /// Half timestep, scaling the source-term additions
    pub hdt: Real,
    /// Courant number of the first perpendicular direction
    pub cdtdx0: Real,
    /// Courant number of the second perpendicular direction
    pub cdtdx1: Real,
}

/// Read-only field bundle for the double-perpendicular-direction pass.
///
/// The `0`/`1` suffixes follow the canonical ordering of
/// [`Direction::others`]: for a correction direction `dir`, `flux0`
/// belongs to the first perpendicular direction and `flux1` to the second.
pub struct TransverseInputBoth<'a> {
    /// Pre-correction right-biased predicted states for the correction direction
    pub qm_pre: &'a Field,
    /// Pre-correction left-biased predicted states for the correction direction
    pub qp_pre: &'a Field,
    /// Flux field of the first perpendicular direction
    pub flux0: &'a Field,
    /// Flux field of the second perpendicular direction
    pub flux1: &'a Field,
    /// Face Godunov states of the first perpendicular direction
    pub qface0: &'a Field,
    /// Face Godunov states of the second perpendicular direction
    pub qface1: &'a Field,
    /// Auxiliary state (adiabatic-index coefficient)
    pub qaux: &'a Field,
    /// Primitive-shaped source terms
    pub src_q: &'a Field,
}

/// Correct the `dir`-predicted states at `iv` with the fluxes of both
/// perpendicular directions, completing the two-pass scheme.
///
/// The perpendicular directions come from the canonical permutation table
/// ([`Direction::others`]); downstream sign and orientation logic depends
/// on that fixed order. Mutates `qp` at `iv` and `qm` at `iv + e(dir)`.
pub fn correct_3d_both(
    iv: IVec,
    dir: Direction,
    qm: &mut Field,
    qp: &mut Field,
    input: &TransverseInputBoth<'_>,
    coeffs: &TransverseCoeffsBoth,
    pmap: &PassiveMap,
    opts: &TransverseOptions,
) {
    let (o0, o1) = dir.others();
    let ivp0 = iv.shifted(o0, 1);
    let ivp1 = iv.shifted(o1, 1);
    let ivf = iv.shifted(dir, 1); // forward neighbor receiving qm

    let hdt = coeffs.hdt;
    let cdtdx0 = coeffs.cdtdx0;
    let cdtdx1 = coeffs.cdtdx1;

    let diff2 = |slot: usize| -> Real {
        cdtdx0 * (input.flux0.at(ivp0, slot) - input.flux0.at(iv, slot))
            + cdtdx1 * (input.flux1.at(ivp1, slot) - input.flux1.at(iv, slot))
    };

    let d = FluxDiff {
        rho: diff2(URHO),
        mom: [diff2(UMX), diff2(UMY), diff2(UMZ)],
        ener: diff2(UEDEN),
    };

    let gamc = input.qaux.at(iv, QGAMC);
    let src_r = input.src_q.at(iv, QRHO);
    let src_e = input.src_q.at(iv, QREINT);
    let src_p = input.src_q.at(iv, QPRES);

    for (uslot, qslot) in pmap.iter() {
        let dflux = diff2(uslot);
        let src = hdt * input.src_q.at(iv, qslot);
        update_passive(qp, iv, input.qp_pre, iv, qslot, dflux, d.rho, src);
        update_passive(qm, ivf, input.qm_pre, ivf, qslot, dflux, d.rho, src);
    }

    // Pressure-correction terms accumulated separately per direction.
    let pt0 = pressure_terms(input.qface0, iv, ivp0, gdvel(o0));
    let pt1 = pressure_terms(input.qface1, iv, ivp1, gdvel(o1));
    let dp0 = cdtdx0 * (pt0.dau_p + pt0.p_av * pt0.dau * (gamc - 1.0));
    let dp1 = cdtdx1 * (pt1.dau_p + pt1.p_av * pt1.dau * (gamc - 1.0));

    let correct_state = |out: &mut Field, iv_out: IVec, pre: &Field| {
        let c = apply_flux_diff(pre, iv_out, 3, &d, opts.reset_density);

        out.set(iv_out, QRHO, c.rho + hdt * src_r);
        out.set(iv_out, QU, c.mom[0] / c.rho + hdt * input.src_q.at(iv, QU));
        out.set(iv_out, QV, c.mom[1] / c.rho + hdt * input.src_q.at(iv, QV));
        out.set(iv_out, QW, c.mom[2] / c.rho + hdt * input.src_q.at(iv, QW));
        out.set(
            iv_out,
            QREINT,
            c.ener - kinetic_energy(&c, 3) + hdt * src_e,
        );

        let p = if c.reset {
            pre.at(iv_out, QPRES)
        } else {
            pre.at(iv_out, QPRES) - dp0 - dp1
        };
        out.set(iv_out, QPRES, (p + hdt * src_p).max(opts.small_pres));
    };

    correct_state(qp, iv, input.qp_pre);
    correct_state(qm, ivf, input.qm_pre);
}
