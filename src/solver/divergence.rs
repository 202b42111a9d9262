//! Node-centered velocity divergence.
//!
//! The artificial-viscosity correction needs the velocity divergence at
//! grid nodes (cell corners). Index `iv` of the divergence field refers to
//! the lower corner of cell `iv`: the stencil differences the velocity
//! between the cell layers on either side of the node, averaged over the
//! transverse cell layers touching it.
//!
//! At a physical domain edge the centered pair is not available (the
//! exterior layer is a boundary ghost), so the derivative pair shifts one
//! cell inward (first-order one-sided) and transverse averaging rows clamp
//! to the domain. Interior and periodic sides keep the centered stencil.

use crate::mesh::{DomainBc, GridGeometry, IVec, IndexBox};
use crate::state::slots::{QU, QV, QW};
use crate::state::Field;
use crate::types::Real;

/// Cell pair for a derivative across node `n`, shifted one-sided at
/// physical domain edges.
#[inline]
fn derivative_cells(n: i32, dlo: i32, dhi: i32, lo_phys: bool, hi_phys: bool) -> (i32, i32) {
    let mut cl = n - 1;
    let mut ch = n;
    if lo_phys && cl < dlo {
        cl = dlo;
        ch = dlo + 1;
    }
    if hi_phys && ch > dhi {
        ch = dhi;
        cl = dhi - 1;
    }
    (cl, ch)
}

/// Transverse averaging row clamped to the domain at physical edges.
#[inline]
fn clamp_row(c: i32, dlo: i32, dhi: i32, lo_phys: bool, hi_phys: bool) -> i32 {
    let mut c = c;
    if lo_phys {
        c = c.max(dlo);
    }
    if hi_phys {
        c = c.min(dhi);
    }
    c
}

/// Velocity divergence at one node.
#[inline]
pub fn divergence_at(iv: IVec, q: &Field, geom: &GridGeometry, bc: &DomainBc) -> Real {
    let dlo = geom.domain.lo().0;
    let dhi = geom.domain.hi().0;
    let lo_phys = [
        bc.lo[0].is_physical(),
        bc.lo[1].is_physical(),
        bc.lo[2].is_physical(),
    ];
    let hi_phys = [
        bc.hi[0].is_physical(),
        bc.hi[1].is_physical(),
        bc.hi[2].is_physical(),
    ];
    let [i, j, k] = iv.0;

    match geom.ndim {
        2 => {
            let (xl, xh) = derivative_cells(i, dlo[0], dhi[0], lo_phys[0], hi_phys[0]);
            let (yl, yh) = derivative_cells(j, dlo[1], dhi[1], lo_phys[1], hi_phys[1]);
            let j0 = clamp_row(j - 1, dlo[1], dhi[1], lo_phys[1], hi_phys[1]);
            let j1 = clamp_row(j, dlo[1], dhi[1], lo_phys[1], hi_phys[1]);
            let i0 = clamp_row(i - 1, dlo[0], dhi[0], lo_phys[0], hi_phys[0]);
            let i1 = clamp_row(i, dlo[0], dhi[0], lo_phys[0], hi_phys[0]);

            let ux = 0.5
                * (q.at(IVec::new(xh, j0, k), QU) + q.at(IVec::new(xh, j1, k), QU)
                    - q.at(IVec::new(xl, j0, k), QU)
                    - q.at(IVec::new(xl, j1, k), QU))
                / geom.dx[0];
            let vy = 0.5
                * (q.at(IVec::new(i0, yh, k), QV) + q.at(IVec::new(i1, yh, k), QV)
                    - q.at(IVec::new(i0, yl, k), QV)
                    - q.at(IVec::new(i1, yl, k), QV))
                / geom.dx[1];
            ux + vy
        }
        3 => {
            let (xl, xh) = derivative_cells(i, dlo[0], dhi[0], lo_phys[0], hi_phys[0]);
            let (yl, yh) = derivative_cells(j, dlo[1], dhi[1], lo_phys[1], hi_phys[1]);
            let (zl, zh) = derivative_cells(k, dlo[2], dhi[2], lo_phys[2], hi_phys[2]);
            let i0 = clamp_row(i - 1, dlo[0], dhi[0], lo_phys[0], hi_phys[0]);
            let i1 = clamp_row(i, dlo[0], dhi[0], lo_phys[0], hi_phys[0]);
            let j0 = clamp_row(j - 1, dlo[1], dhi[1], lo_phys[1], hi_phys[1]);
            let j1 = clamp_row(j, dlo[1], dhi[1], lo_phys[1], hi_phys[1]);
            let k0 = clamp_row(k - 1, dlo[2], dhi[2], lo_phys[2], hi_phys[2]);
            let k1 = clamp_row(k, dlo[2], dhi[2], lo_phys[2], hi_phys[2]);

            let mut ux = 0.0;
            let mut vy = 0.0;
            let mut wz = 0.0;
            for &jj in &[j0, j1] {
                for &kk in &[k0, k1] {
                    ux += q.at(IVec::new(xh, jj, kk), QU) - q.at(IVec::new(xl, jj, kk), QU);
                }
            }
            for &ii in &[i0, i1] {
                for &kk in &[k0, k1] {
                    vy += q.at(IVec::new(ii, yh, kk), QV) - q.at(IVec::new(ii, yl, kk), QV);
                }
            }
            for &ii in &[i0, i1] {
                for &jj in &[j0, j1] {
                    wz += q.at(IVec::new(ii, jj, zh), QW) - q.at(IVec::new(ii, jj, zl), QW);
                }
            }
            0.25 * (ux / geom.dx[0] + vy / geom.dx[1] + wz / geom.dx[2])
        }
        _ => unreachable!("GridGeometry validates ndim"),
    }
}

/// Compute the velocity divergence at every node of `nodes`.
///
/// `divu` must be a one-component field covering `nodes`; `q` must cover
/// every cell the stencil reads (one layer beyond `nodes` away from
/// physical edges).
pub fn compute_divergence(
    nodes: &IndexBox,
    q: &Field,
    geom: &GridGeometry,
    bc: &DomainBc,
    divu: &mut Field,
) {
    for iv in nodes.iter() {
        divu.set(iv, 0, divergence_at(iv, q, geom, bc));
    }
}

/// Parallel version of [`compute_divergence`] using Rayon.
///
/// Computes the same result but parallelizes across node lines for better
/// performance on multi-core systems.
#[cfg(feature = "parallel")]
pub fn compute_divergence_parallel(
    nodes: &IndexBox,
    q: &Field,
    geom: &GridGeometry,
    bc: &DomainBc,
    divu: &mut Field,
) {
    use rayon::prelude::*;

    debug_assert_eq!(divu.region(), nodes);
    debug_assert_eq!(divu.ncomp(), 1);

    let size = nodes.size();
    let lo = nodes.lo();
    let line = divu.line_len();
    divu.data_mut()
        .par_chunks_mut(line)
        .enumerate()
        .for_each(|(l, row)| {
            let k = (l / size[1]) as i32 + lo.0[2];
            let j = (l % size[1]) as i32 + lo.0[1];
            for (off, value) in row.iter_mut().enumerate() {
                let iv = IVec::new(lo.0[0] + off as i32, j, k);
                *value = divergence_at(iv, q, geom, bc);
            }
        });
}
