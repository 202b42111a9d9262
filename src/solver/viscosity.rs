//! Artificial viscosity and face-area flux weighting.
//!
//! Godunov fluxes admit weak oscillations behind strong compressions. The
//! classical cure adds a small diffusive flux on faces where the local
//! velocity field is compressive (negative divergence), proportional to
//! the jump of the conserved state across the face. Faces in expansion
//! regions receive nothing.

use crate::mesh::{GridGeometry, IndexBox};
use crate::state::{Field, StateError};
use crate::types::{Direction, Real};

/// Add the compressive artificial-viscosity flux on every `dir`-face of
/// `region`.
///
/// `divu` holds the node-centered velocity divergence and must cover the
/// nodes touching those faces; `uin` must cover the cell pair of every
/// face. The face divergence is the average of the `2^(ndim-1)` node
/// values on the face, kept only where negative and scaled by `difmag`.
pub fn apply_artificial_viscosity(
    region: &IndexBox,
    dir: Direction,
    uin: &Field,
    divu: &Field,
    geom: &GridGeometry,
    difmag: Real,
    flux: &mut Field,
) {
    let faces = region.surrounding_nodes(dir);
    debug_assert!(flux.region().contains_box(&faces));
    let dx = geom.spacing(dir);
    let ncomp = flux.ncomp();

    for iv in faces.iter() {
        let div1 = match geom.ndim {
            2 => {
                let o = dir.perpendicular_2d();
                0.5 * (divu.at(iv, 0) + divu.at(iv.shifted(o, 1), 0))
            }
            3 => {
                let (o0, o1) = dir.others();
                0.25
                    * (divu.at(iv, 0)
                        + divu.at(iv.shifted(o0, 1), 0)
                        + divu.at(iv.shifted(o1, 1), 0)
                        + divu.at(iv.shifted(o0, 1).shifted(o1, 1), 0))
            }
            _ => unreachable!("GridGeometry validates ndim"),
        };
        let div1 = difmag * div1.min(0.0);
        if div1 == 0.0 {
            continue;
        }
        let ivm = iv.shifted(dir, -1);
        for n in 0..ncomp {
            flux.add(iv, n, dx * div1 * (uin.at(iv, n) - uin.at(ivm, n)));
        }
    }
}

/// Scale every flux component by the open-area fraction of its face.
///
/// Fully covered faces (zero fraction) end up carrying zero flux, which
/// the conservative accumulation relies on.
pub fn weight_flux_by_area(flux: &mut Field, area: &Field) -> Result<(), StateError> {
    if !area.region().contains_box(flux.region()) {
        return Err(StateError::RegionMismatch(*flux.region(), *area.region()));
    }
    let region = *flux.region();
    for iv in region.iter() {
        let a = area.at(iv, 0);
        for n in 0..flux.ncomp() {
            flux.scale(iv, n, a);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::IVec;
    use crate::state::slots::{ncons, URHO};

    fn geom_2d() -> GridGeometry {
        GridGeometry::new(IndexBox::new_2d(0, 0, 3, 3), [1.0, 1.0, 1.0], 2)
    }

    #[test]
    fn test_expansion_leaves_flux_untouched() {
        let geom = geom_2d();
        let region = geom.domain;
        // Positive divergence everywhere: no diffusive flux is added.
        let divu = Field::from_fn(region.grow(2, 2), 1, |_, _| 0.7);
        let uin = Field::from_fn(region.grow(1, 2), ncons(0), |iv, _| iv.0[0] as Real);
        let mut flux = Field::from_fn(
            region.surrounding_nodes(Direction::X),
            ncons(0),
            |_, n| (n + 1) as Real,
        );
        let before = flux.clone();
        apply_artificial_viscosity(&region, Direction::X, &uin, &divu, &geom, 0.1, &mut flux);
        assert_eq!(flux.data(), before.data());
    }

    #[test]
    fn test_compression_adds_jump_proportional_flux() {
        let geom = geom_2d();
        let region = geom.domain;
        let divu = Field::from_fn(region.grow(2, 2), 1, |_, _| -1.0);
        let uin = Field::from_fn(region.grow(1, 2), ncons(0), |iv, n| {
            if n == URHO {
                iv.0[0] as Real
            } else {
                0.0
            }
        });
        let mut flux = Field::new(region.surrounding_nodes(Direction::X), ncons(0));
        apply_artificial_viscosity(&region, Direction::X, &uin, &divu, &geom, 0.1, &mut flux);
        // div1 = 0.1 * (-1.0), state jump = 1.0, dx = 1.0
        let iv = IVec::new(2, 1, 0);
        assert!((flux.at(iv, URHO) + 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_area_weighting_zeroes_covered_faces() {
        let faces = IndexBox::new_2d(0, 0, 2, 2);
        let mut flux = Field::from_fn(faces, 3, |_, _| 4.0);
        let area = Field::from_fn(faces, 1, |iv, _| if iv.0[0] == 1 { 0.0 } else { 0.5 });
        weight_flux_by_area(&mut flux, &area).unwrap();
        assert_eq!(flux.at(IVec::new(1, 0, 0), 2), 0.0);
        assert_eq!(flux.at(IVec::new(0, 0, 0), 2), 2.0);
    }

    #[test]
    fn test_area_weighting_rejects_undersized_area() {
        let mut flux = Field::new(IndexBox::new_2d(0, 0, 2, 2), 1);
        let area = Field::new(IndexBox::new_2d(0, 0, 1, 2), 1);
        assert!(matches!(
            weight_flux_by_area(&mut flux, &area),
            Err(StateError::RegionMismatch(..))
        ));
    }
}
