//! # godunov-rs
//!
//! Conservative finite-volume update core for a compressible flow solver
//! on block-structured grids.
//!
//! This crate provides the stage of an unsplit Godunov method that turns
//! raw directional face fluxes into a conservative rate of change:
//! - Transverse correction of predicted face states (2-D and 3-D)
//! - Node-centered velocity divergence
//! - Artificial-viscosity flux adjustment
//! - Embedded-boundary (cut-cell) face-area and volume-fraction weighting
//! - Conservative accumulation per cell
//! - An update driver dispatching between flux schemes
//!
//! The reconstruction/Riemann stage is an external collaborator behind the
//! [`FluxScheme`] trait; mesh hierarchy, ghost exchange and equation of
//! state live outside the crate.

pub mod mesh;
pub mod solver;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use mesh::{
    BcTag, DomainBc, EmbeddedError, EmbeddedGeometry, GridGeometry, IVec, IndexBox,
};
pub use solver::{
    accumulate_update, apply_artificial_viscosity, compute_divergence, correct_2d,
    correct_3d_both, correct_3d_one, hydro_update, weight_flux_by_area, FluxScheme, HydroParams,
    SchemeContext, SchemeOutput, SolverError, TransverseCoeffs, TransverseCoeffsBoth,
    TransverseInput2D, TransverseInput3D, TransverseInputBoth, TransverseOptions,
};
pub use state::{Field, PassiveMap, StateError};
pub use types::{Direction, Real};

#[cfg(feature = "parallel")]
pub use solver::compute_divergence_parallel;
