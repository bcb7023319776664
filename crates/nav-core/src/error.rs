//! Route-model error type.
//!
//! Sub-crates define their own error enums and lift `RouteError` into them
//! via `#[from]` where route-shape validation surfaces through their APIs.

use thiserror::Error;

/// Errors produced by route-shape validation.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route has no legs")]
    NoLegs,

    #[error("leg {0} has no steps")]
    EmptyLeg(usize),
}

pub type RouteResult<T> = Result<T, RouteError>;
