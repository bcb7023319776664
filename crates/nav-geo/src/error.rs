//! Geometry-subsystem error type.
//!
//! All variants describe malformed encoded geometry.  Degenerate but
//! well-formed inputs (empty paths, single vertices, non-finite projections)
//! are never errors; they are absorbed by documented fallback values so
//! navigation keeps producing best-effort progress.

use thiserror::Error;

/// Errors produced by `nav-geo`.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polyline input ended mid-coordinate at byte {0}")]
    Truncated(usize),

    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    #[error("overlong polyline varint at offset {0}")]
    OverlongVarint(usize),

    #[error("decoded coordinate out of range: lon {lon}, lat {lat}")]
    OutOfRange { lon: f64, lat: f64 },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
