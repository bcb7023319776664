//! `nav-geo` — polyline codec and geodesic measurement.
//!
//! Everything in this crate is pure, in-memory geometry: no I/O, no shared
//! state.  The progress engine (`nav-progress`) composes these primitives;
//! they are equally usable standalone.
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`polyline`]  | Encoded-polyline codec (`encode`/`decode`)             |
//! | [`measure`]   | Haversine distance, bearing, destination, path snapping |
//! | [`error`]     | `GeometryError`, `GeometryResult`                      |

pub mod error;
pub mod measure;
pub mod polyline;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GeometryError, GeometryResult};
pub use measure::{
    bearing_deg, destination, distance_m, nearest_point_on_path, path_length_m,
    user_true_distance_from_step, SnappedPoint, EARTH_RADIUS_M,
};
pub use polyline::PRECISION_6;
