//! Conservative accumulation of face fluxes into a cell update.
//!
//! The finite-volume update of a cell is the per-direction difference of
//! the fluxes on its bounding faces divided by the grid spacing, summed
//! over directions. The energy equation additionally carries the
//! pressure-work term `p div(u)` evaluated at cell centers.
//!
//! With an embedded boundary the accumulated update is divided by the cell
//! volume fraction; cells with no open volume are excluded entirely and
//! receive a zero update in every component.

use crate::mesh::{GridGeometry, IndexBox};
use crate::state::slots::UEDEN;
use crate::state::Field;

/// Accumulate the divided flux differences over `region` into `dsdt`.
///
/// `flux` holds one face-centered field per active direction, each covering
/// `region.surrounding_nodes(d)`. `pdivu` is the cell-centered pressure-work
/// term. `vfrac`, when present, is the open volume fraction per cell.
pub fn accumulate_update(
    region: &IndexBox,
    flux: &[Field],
    pdivu: &Field,
    geom: &GridGeometry,
    vfrac: Option<&Field>,
    dsdt: &mut Field,
) {
    debug_assert_eq!(flux.len(), geom.ndim);
    let ncomp = dsdt.ncomp();

    for iv in region.iter() {
        if let Some(vf) = vfrac {
            let v = vf.at(iv, 0);
            if v <= 0.0 {
                for n in 0..ncomp {
                    dsdt.set(iv, n, 0.0);
                }
                continue;
            }
            for n in 0..ncomp {
                let mut acc = 0.0;
                for dir in geom.directions() {
                    let ivp = iv.shifted(*dir, 1);
                    let f = &flux[dir.index()];
                    acc += (f.at(iv, n) - f.at(ivp, n)) / geom.spacing(*dir);
                }
                dsdt.set(iv, n, acc / v);
            }
            dsdt.add(iv, UEDEN, -pdivu.at(iv, 0) / v);
        } else {
            for n in 0..ncomp {
                let mut acc = 0.0;
                for dir in geom.directions() {
                    let ivp = iv.shifted(*dir, 1);
                    let f = &flux[dir.index()];
                    acc += (f.at(iv, n) - f.at(ivp, n)) / geom.spacing(*dir);
                }
                dsdt.set(iv, n, acc);
            }
            dsdt.add(iv, UEDEN, -pdivu.at(iv, 0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::IVec;
    use crate::state::slots::{ncons, URHO};
    use crate::types::{Direction, Real};

    fn setup() -> (GridGeometry, Vec<Field>, Field) {
        let geom = GridGeometry::new(IndexBox::new_2d(0, 0, 3, 3), [0.5, 0.25, 1.0], 2);
        let flux = vec![
            Field::new(geom.domain.surrounding_nodes(Direction::X), ncons(0)),
            Field::new(geom.domain.surrounding_nodes(Direction::Y), ncons(0)),
        ];
        let pdivu = Field::new(geom.domain, 1);
        (geom, flux, pdivu)
    }

    #[test]
    fn test_uniform_flux_gives_zero_update() {
        let (geom, mut flux, pdivu) = setup();
        for f in &mut flux {
            f.fill(3.0);
        }
        let mut dsdt = Field::from_fn(geom.domain, ncons(0), |_, _| 9.0);
        accumulate_update(&geom.domain, &flux, &pdivu, &geom, None, &mut dsdt);
        for iv in geom.domain.iter() {
            for n in 0..ncons(0) {
                assert_eq!(dsdt.at(iv, n), 0.0);
            }
        }
    }

    #[test]
    fn test_flux_difference_divided_by_spacing() {
        let (geom, mut flux, pdivu) = setup();
        // Linear x-flux in i: difference of -1 per face pair.
        flux[0] = Field::from_fn(*flux[0].region(), ncons(0), |iv, n| {
            if n == URHO {
                iv.0[0] as Real
            } else {
                0.0
            }
        });
        let mut dsdt = Field::new(geom.domain, ncons(0));
        accumulate_update(&geom.domain, &flux, &pdivu, &geom, None, &mut dsdt);
        let iv = IVec::new(1, 2, 0);
        assert!((dsdt.at(iv, URHO) + 1.0 / 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_pressure_work_enters_energy_only() {
        let (geom, flux, mut pdivu) = setup();
        pdivu.fill(2.0);
        let mut dsdt = Field::new(geom.domain, ncons(0));
        accumulate_update(&geom.domain, &flux, &pdivu, &geom, None, &mut dsdt);
        let iv = IVec::new(0, 0, 0);
        assert_eq!(dsdt.at(iv, UEDEN), -2.0);
        assert_eq!(dsdt.at(iv, URHO), 0.0);
    }

    #[test]
    fn test_covered_cells_get_zero_update() {
        let (geom, mut flux, mut pdivu) = setup();
        flux[0].fill(1.5);
        flux[1].fill(-0.5);
        pdivu.fill(1.0);
        let covered = IVec::new(2, 2, 0);
        let vfrac = Field::from_fn(geom.domain, 1, |iv, _| {
            if iv == covered {
                0.0
            } else {
                0.5
            }
        });
        let mut dsdt = Field::from_fn(geom.domain, ncons(0), |_, _| 7.0);
        accumulate_update(&geom.domain, &flux, &pdivu, &geom, Some(&vfrac), &mut dsdt);
        for n in 0..ncons(0) {
            assert_eq!(dsdt.at(covered, n), 0.0);
        }
        // Open cells: uniform fluxes cancel, energy carries pdivu / vfrac.
        let open = IVec::new(1, 1, 0);
        assert_eq!(dsdt.at(open, UEDEN), -1.0 / 0.5);
        assert_eq!(dsdt.at(open, URHO), 0.0);
    }
}
