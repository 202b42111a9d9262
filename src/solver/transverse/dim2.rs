//! 2-D transverse correction kernel.
//!
//! Corrects the predicted left state (`qp`) at a cell and the predicted
//! right state (`qm`) at its direction-neighbor using the flux difference
//! of the perpendicular direction across the face pair bounding the cell.
//!
//! Per-cell and side-effect contract: the kernel writes `qp` at the given
//! index and `qm` at the forward neighbor along the correction direction,
//! and nothing else, so it is safe to evaluate in parallel across the
//! index space.

use crate::mesh::IVec;
use crate::state::slots::{gdvel, QGAMC, QPRES, QREINT, QRHO, QU, QV, UEDEN, UMX, UMY, URHO};
use crate::state::{Field, PassiveMap};
use crate::types::{Direction, Real};

use super::{
    apply_flux_diff, kinetic_energy, pressure_terms, update_passive, FluxDiff, TransverseOptions,
};

/// Timestep coefficients for the 2-D correction.
#[derive(Clone, Copy, Debug)]
pub struct TransverseCoeffs {
    /// Half timestep, scaling the source-term additions
    pub hdt: Real,
    /// Perpendicular-direction Courant number dt/dx_perp
    pub cdtdx: Real,
}

/// Read-only field bundle for the 2-D correction.
pub struct TransverseInput2D<'a> {
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
    /// Primitive-shaped source terms
    pub src_q: &'a Field,
    /// Perpendicular-direction open-area fractions; `None` outside
    /// embedded-boundary runs
    pub area: Option<&'a Field>,
}

/// Correct the `dir`-predicted states at `iv` with the perpendicular flux.
///
/// Mutates `qp` at `iv` and `qm` at `iv + e(dir)`. When both perpendicular
/// faces bounding the cell are fully closed (zero open area), the hydro
/// flux differences are suppressed and only source terms are applied.
pub fn correct_2d(
    iv: IVec,
    dir: Direction,
    qm: &mut Field,
    qp: &mut Field,
    input: &TransverseInput2D<'_>,
    coeffs: &TransverseCoeffs,
    pmap: &PassiveMap,
    opts: &TransverseOptions,
) {
    let perp = dir.perpendicular_2d();
    let ivp0 = iv.shifted(perp, 1); // perpendicular flux/face neighbor
    let ivp1 = iv.shifted(dir, 1); // forward neighbor receiving qm
    let vslot = gdvel(perp);

    let hdt = coeffs.hdt;
    let cdtdx = coeffs.cdtdx;

    // Cut-face suppression: a face contributes no transverse correction
    // when neither it nor its forward neighbor has open area.
    let open = input
        .area
        .map_or(true, |a| a.at(ivp0, 0) > 0.0 || a.at(iv, 0) > 0.0);

    let d = if open {
        FluxDiff {
            rho: cdtdx * (input.flux.at(ivp0, URHO) - input.flux.at(iv, URHO)),
            mom: [
                cdtdx * (input.flux.at(ivp0, UMX) - input.flux.at(iv, UMX)),
                cdtdx * (input.flux.at(ivp0, UMY) - input.flux.at(iv, UMY)),
                0.0,
            ],
            ener: cdtdx * (input.flux.at(ivp0, UEDEN) - input.flux.at(iv, UEDEN)),
        }
    } else {
        FluxDiff::default()
    };

    let src_r = input.src_q.at(iv, QRHO);
    let src_e = input.src_q.at(iv, QREINT);
    let src_p = input.src_q.at(iv, QPRES);
    let gamc = input.qaux.at(iv, QGAMC);
    let pt = pressure_terms(input.qface, iv, ivp0, vslot);

    // Passive scalars: flux-weighted mixing against the corrected density.
    // The cross-flux itself is not suppressed: a fully closed face already
    // carries zero flux.
    for (uslot, qslot) in pmap.iter() {
        let dflux = cdtdx * (input.flux.at(ivp0, uslot) - input.flux.at(iv, uslot));
        let src = hdt * input.src_q.at(iv, qslot);
        update_passive(qp, iv, input.qp_pre, iv, qslot, dflux, d.rho, src);
        update_passive(qm, ivp1, input.qm_pre, ivp1, qslot, dflux, d.rho, src);
    }

    let correct_state = |out: &mut Field, iv_out: IVec, pre: &Field| {
        let c = apply_flux_diff(pre, iv_out, 2, &d, opts.reset_density);

        out.set(iv_out, QRHO, c.rho + hdt * src_r);
        out.set(iv_out, QU, c.mom[0] / c.rho + hdt * input.src_q.at(iv, QU));
        out.set(iv_out, QV, c.mom[1] / c.rho + hdt * input.src_q.at(iv, QV));
        out.set(
            iv_out,
            QREINT,
            c.ener - kinetic_energy(&c, 2) + hdt * src_e,
        );

        // Riemann-consistent pressure correction; the fallback keeps the
        // pre-correction pressure instead.
        let p = if c.reset {
            pre.at(iv_out, QPRES)
        } else {
            pre.at(iv_out, QPRES) - cdtdx * (pt.dau_p + pt.p_av * pt.dau * (gamc - 1.0))
        };
        out.set(iv_out, QPRES, (p + hdt * src_p).max(opts.small_pres));
    };

    correct_state(qp, iv, input.qp_pre);
    correct_state(qm, ivp1, input.qm_pre);
}
