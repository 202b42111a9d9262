//! Update driver: one conservative finite-volume stage over a block.
//!
//! [`hydro_update`] validates the caller's fields, allocates the scratch
//! the flux scheme needs, dispatches to exactly one of the two flux
//! schemes, and runs the fixed post-flux pipeline: node-centered velocity
//! divergence, artificial-viscosity flux adjustment, face-area weighting,
//! and conservative accumulation.
//!
//! The reconstruction/Riemann stage itself is an external collaborator
//! behind the [`FluxScheme`] trait; this crate owns everything downstream
//! of the raw face fluxes.

use thiserror::Error;

use crate::mesh::{DomainBc, EmbeddedGeometry, GridGeometry, IndexBox};
use crate::solver::consup::accumulate_update;
#[cfg(not(feature = "parallel"))]
use crate::solver::divergence::compute_divergence;
#[cfg(feature = "parallel")]
use crate::solver::divergence::compute_divergence_parallel;
use crate::solver::transverse::TransverseOptions;
use crate::solver::viscosity::{apply_artificial_viscosity, weight_flux_by_area};
use crate::state::slots::{NGDNV, NQAUX};
use crate::state::{Field, PassiveMap, StateError};
use crate::types::{Direction, Real};

/// Error type for driver-level validation.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Wrong number of per-direction flux fields.
    #[error("expected {expected} flux fields, got {got}")]
    FluxCount { expected: usize, got: usize },

    /// A flux field does not live on the face box of the update region.
    #[error("flux field for direction {dir:?} covers {got:?}, expected {expected:?}")]
    FluxRegion {
        dir: Direction,
        expected: IndexBox,
        got: IndexBox,
    },

    /// An input field does not cover the region a stage reads.
    #[error("{what} covers {got:?}, must contain {needed:?}")]
    Coverage {
        what: &'static str,
        needed: IndexBox,
        got: IndexBox,
    },

    /// An input field carries the wrong number of components.
    #[error("{what} has {got} components, expected {expected}")]
    Components {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    State(#[from] StateError),
}

/// Global update parameters for one stage.
#[derive(Clone, Copy, Debug)]
pub struct HydroParams {
    /// Timestep
    pub dt: Real,
    /// Artificial-viscosity coefficient
    pub difmag: Real,
    /// Pressure floor
    pub small_pres: Real,
    /// Density floor
    pub small_dens: Real,
    /// Dispatch to the method-of-lines scheme instead of the Godunov
    /// predictor/corrector
    pub use_mol: bool,
    /// Discard transverse corrections that would drive density negative
    pub reset_density: bool,
}

impl Default for HydroParams {
    fn default() -> Self {
        Self {
            dt: 0.0,
            difmag: 0.1,
            small_pres: 1.0e-8,
            small_dens: 1.0e-10,
            use_mol: false,
            reset_density: true,
        }
    }
}

impl HydroParams {
    /// The per-kernel correction policy these parameters imply.
    pub fn transverse_options(&self) -> TransverseOptions {
        TransverseOptions {
            reset_density: self.reset_density,
            small_pres: self.small_pres,
        }
    }
}

/// Borrowed inputs handed to a flux scheme.
pub struct SchemeContext<'a> {
    /// Cell box receiving the update
    pub region: &'a IndexBox,
    pub geom: &'a GridGeometry,
    pub bc: &'a DomainBc,
    /// Conservative state, including ghost cells
    pub uin: &'a Field,
    /// Primitive state, including ghost cells
    pub q: &'a Field,
    /// Auxiliary state (adiabatic-index coefficient)
    pub qaux: &'a Field,
    /// Primitive-shaped source terms
    pub src_q: &'a Field,
    pub pmap: &'a PassiveMap,
    pub params: &'a HydroParams,
}

/// Mutable scratch and outputs a flux scheme fills.
pub struct SchemeOutput<'a> {
    /// Per-direction face fluxes on `region.surrounding_nodes(dir)`
    pub flux: &'a mut [Field],
    /// Per-direction face Godunov states on the grown face boxes
    pub qface: &'a mut [Field],
    /// Cell-centered pressure-work term on `region`
    pub pdivu: &'a mut Field,
}

/// External reconstruction/Riemann collaborator.
///
/// Exactly one method runs per [`hydro_update`] call, selected by
/// [`HydroParams::use_mol`]. Implementations fill every field of the
/// output bundle; the transverse kernels of this crate are at their
/// disposal for the corrector passes.
pub trait FluxScheme {
    /// Method-of-lines fluxes: a single unsplit evaluation with no
    /// characteristic predictor.
    fn mol_fluxes(
        &self,
        ctx: &SchemeContext<'_>,
        out: &mut SchemeOutput<'_>,
    ) -> Result<(), SolverError>;

    /// Full Godunov predictor/corrector fluxes, transverse corrections
    /// included.
    fn godunov_fluxes(
        &self,
        ctx: &SchemeContext<'_>,
        out: &mut SchemeOutput<'_>,
    ) -> Result<(), SolverError>;
}

fn validate(
    region: &IndexBox,
    geom: &GridGeometry,
    uin: &Field,
    q: &Field,
    qaux: &Field,
    src_q: &Field,
    flux: &[Field],
    dsdt: &Field,
) -> Result<(), SolverError> {
    let ndim = geom.ndim;
    if flux.len() != ndim {
        return Err(SolverError::FluxCount {
            expected: ndim,
            got: flux.len(),
        });
    }
    for &dir in geom.directions() {
        let expected = region.surrounding_nodes(dir);
        let got = *flux[dir.index()].region();
        if got != expected {
            return Err(SolverError::FluxRegion { dir, expected, got });
        }
    }

    // The divergence stencil over the grown node box reads the widest halo.
    let qneed = region.grow(3, ndim);
    if !q.region().contains_box(&qneed) {
        return Err(SolverError::Coverage {
            what: "primitive state q",
            needed: qneed,
            got: *q.region(),
        });
    }
    let uneed = region.grow(1, ndim);
    if !uin.region().contains_box(&uneed) {
        return Err(SolverError::Coverage {
            what: "conservative state uin",
            needed: uneed,
            got: *uin.region(),
        });
    }
    if !dsdt.region().contains_box(region) {
        return Err(SolverError::Coverage {
            what: "update dsdt",
            needed: *region,
            got: *dsdt.region(),
        });
    }

    if qaux.ncomp() < NQAUX {
        return Err(SolverError::Components {
            what: "auxiliary state qaux",
            expected: NQAUX,
            got: qaux.ncomp(),
        });
    }
    if src_q.ncomp() != q.ncomp() {
        return Err(SolverError::Components {
            what: "source terms src_q",
            expected: q.ncomp(),
            got: src_q.ncomp(),
        });
    }
    let ncomp = uin.ncomp();
    if dsdt.ncomp() != ncomp {
        return Err(SolverError::Components {
            what: "update dsdt",
            expected: ncomp,
            got: dsdt.ncomp(),
        });
    }
    for (d, f) in flux.iter().enumerate() {
        if f.ncomp() != ncomp {
            return Err(SolverError::Components {
                what: ["x-flux", "y-flux", "z-flux"][d],
                expected: ncomp,
                got: f.ncomp(),
            });
        }
    }
    Ok(())
}

/// Run one conservative update stage over `region`.
///
/// Stages, in order:
/// 1. allocate face Godunov-state scratch on the region grown by two cells
///    and the pressure-work scratch on the region;
/// 2. dispatch to [`FluxScheme::mol_fluxes`] or
///    [`FluxScheme::godunov_fluxes`] per `params.use_mol`;
/// 3. node-centered velocity divergence over the grown region;
/// 4. per direction, artificial-viscosity flux adjustment followed by
///    face-area weighting (embedded-boundary runs only);
/// 5. conservative accumulation into `dsdt`.
///
/// `flux` returns the final adjusted face fluxes for the caller's flux
/// register / refluxing bookkeeping.
#[allow(clippy::too_many_arguments)]
pub fn hydro_update(
    region: &IndexBox,
    geom: &GridGeometry,
    bc: &DomainBc,
    uin: &Field,
    q: &Field,
    qaux: &Field,
    src_q: &Field,
    pmap: &PassiveMap,
    params: &HydroParams,
    scheme: &dyn FluxScheme,
    eb: Option<&EmbeddedGeometry>,
    flux: &mut [Field],
    dsdt: &mut Field,
) -> Result<(), SolverError> {
    validate(region, geom, uin, q, qaux, src_q, flux, dsdt)?;

    let ndim = geom.ndim;
    let bxg2 = region.grow(2, ndim);
    let mut qface: Vec<Field> = geom
        .directions()
        .iter()
        .map(|&dir| Field::new(bxg2.surrounding_nodes(dir), NGDNV))
        .collect();
    let mut pdivu = Field::new(*region, 1);

    {
        let ctx = SchemeContext {
            region,
            geom,
            bc,
            uin,
            q,
            qaux,
            src_q,
            pmap,
            params,
        };
        let mut out = SchemeOutput {
            flux,
            qface: &mut qface,
            pdivu: &mut pdivu,
        };
        if params.use_mol {
            scheme.mol_fluxes(&ctx, &mut out)?;
        } else {
            scheme.godunov_fluxes(&ctx, &mut out)?;
        }
    }

    // Grown node box: every node the face-averaged viscosity reads.
    let mut divu = Field::new(bxg2, 1);
    #[cfg(feature = "parallel")]
    compute_divergence_parallel(&bxg2, q, geom, bc, &mut divu);
    #[cfg(not(feature = "parallel"))]
    compute_divergence(&bxg2, q, geom, bc, &mut divu);

    for &dir in geom.directions() {
        let f = &mut flux[dir.index()];
        apply_artificial_viscosity(region, dir, uin, &divu, geom, params.difmag, f);
        if let Some(eb) = eb {
            weight_flux_by_area(f, eb.area(dir))?;
        }
    }

    accumulate_update(
        region,
        flux,
        &pdivu,
        geom,
        eb.map(|e| e.volfrac()),
        dsdt,
    );
    Ok(())
}
