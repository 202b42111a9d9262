//! Conservative update pipeline.
//!
//! # Submodules
//!
//! - [`transverse`]: 2-D and 3-D transverse corrections of predicted face
//!   states
//! - [`divergence`]: node-centered velocity divergence
//! - [`viscosity`]: artificial-viscosity flux adjustment and face-area
//!   weighting
//! - [`consup`]: conservative accumulation of face fluxes per cell
//! - [`driver`]: the stage driver tying the pipeline together

pub mod consup;
pub mod divergence;
pub mod driver;
pub mod transverse;
pub mod viscosity;

pub use consup::accumulate_update;
pub use divergence::compute_divergence;
#[cfg(feature = "parallel")]
pub use divergence::compute_divergence_parallel;
pub use driver::{
    hydro_update, FluxScheme, HydroParams, SchemeContext, SchemeOutput, SolverError,
};
pub use transverse::{
    correct_2d, correct_3d_both, correct_3d_one, TransverseCoeffs, TransverseCoeffsBoth,
    TransverseInput2D, TransverseInput3D, TransverseInputBoth, TransverseOptions,
};
pub use viscosity::{apply_artificial_viscosity, weight_flux_by_area};
