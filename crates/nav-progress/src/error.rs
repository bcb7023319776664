//! Progress-subsystem error type.

use nav_core::{Coordinate, RouteError};
use nav_geo::GeometryError;
use thiserror::Error;

/// Errors produced by `nav-progress`.
///
/// Index errors are programming errors in the caller and surface
/// immediately; geometry errors mean the supplied route data is malformed
/// and the route is unusable (the data is static, so there is no retry).
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("leg index {leg} out of range (route has {legs} legs)")]
    LegIndexOutOfRange { leg: usize, legs: usize },

    #[error("step index {step} out of range (leg {leg} has {steps} steps)")]
    StepIndexOutOfRange { leg: usize, step: usize, steps: usize },

    #[error("intersection at {location} lies {offset_m:.1} m off the step geometry (limit {limit_m:.1} m)")]
    IntersectionOffGeometry {
        location: Coordinate,
        offset_m: f64,
        limit_m:  f64,
    },

    #[error("malformed route: {0}")]
    Route(#[from] RouteError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub type ProgressResult<T> = Result<T, ProgressError>;
