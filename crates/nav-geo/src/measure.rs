//! Great-circle measurement and point-to-path snapping.
//!
//! All functions operate on a sphere of radius [`EARTH_RADIUS_M`].  This is
//! the radius the surrounding measurement stack standardises on; changing it
//! breaks byte-for-byte agreement with distances already baked into route
//! data and golden tests.
//!
//! # Numerical safety
//!
//! GPS-derived geometry routinely produces degenerate cases — empty paths,
//! single-vertex paths, projections that go non-finite near the poles or the
//! antimeridian.  None of those are errors here: every function falls back
//! to a documented best-effort value (`None`, the first vertex, distance 0)
//! so the navigation session keeps producing progress.

use nav_core::{Coordinate, Step};

use crate::error::GeometryResult;
use crate::polyline;

/// Mean Earth radius in metres used for all great-circle math.
pub const EARTH_RADIUS_M: f64 = 6_373_000.0;

// ── Point-to-point measurement ────────────────────────────────────────────────

/// Haversine great-circle distance in metres.
///
/// Symmetric, zero for identical inputs, and finite for any in-range pair:
/// the haversine term is clamped into `[0, 1]` so antipodal rounding can
/// never surface as NaN.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon * 0.5).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_M
}

/// Initial bearing from `a` to `b`, degrees in `(-180, 180]`.
pub fn bearing_deg(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lon.cos();
    y.atan2(x).to_degrees()
}

/// Project `origin` by `distance_m` metres along `bearing_deg`.
///
/// The bearing is normalized into `[0, 360)` first, so callers may pass
/// raw arithmetic results like `direction + 90.0`.
pub fn destination(origin: Coordinate, distance_m: f64, bearing_deg: f64) -> Coordinate {
    let theta = (bearing_deg.rem_euclid(360.0)).to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos())
            .atan2(delta.cos() - lat1.sin() * lat2.sin());

    Coordinate::new(lon2.to_degrees(), lat2.to_degrees())
}

/// Total length of a path in metres (sum of segment great-circle lengths).
pub fn path_length_m(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| distance_m(w[0], w[1])).sum()
}

// ── Point-to-path snapping ────────────────────────────────────────────────────

/// Result of projecting a query point onto a path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnappedPoint {
    /// The nearest point on the path geometry.
    pub point: Coordinate,

    /// Index of the segment the snap landed on (0-based; always 0 for a
    /// single-vertex path).
    pub segment_index: usize,

    /// Cumulative distance in metres from the path's first vertex to `point`,
    /// measured along the path.
    pub distance_along_m: f64,

    /// Great-circle distance in metres from the query point to `point`.
    pub distance_m: f64,
}

/// Find the nearest point on `path` to `point`.
///
/// Returns `None` only for an empty path.  A single-vertex path snaps to
/// that vertex at along-distance 0.  Otherwise every segment contributes
/// three candidates — its start, its end, and the intersection of the
/// segment with the perpendicular through the query point — and the overall
/// minimum by great-circle distance wins, ties resolving to the earliest
/// segment.  A non-finite winner falls back to the path's first vertex.
pub fn nearest_point_on_path(point: Coordinate, path: &[Coordinate]) -> Option<SnappedPoint> {
    let first = *path.first()?;
    if path.len() == 1 {
        return Some(SnappedPoint {
            point: first,
            segment_index: 0,
            distance_along_m: 0.0,
            distance_m: distance_m(point, first),
        });
    }

    let mut best = first;
    let mut best_dist = f64::INFINITY;
    let mut best_seg = 0usize;

    for (i, pair) in path.windows(2).enumerate() {
        let (start, stop) = (pair[0], pair[1]);

        let start_dist = distance_m(point, start);
        let stop_dist = distance_m(point, stop);

        // The perpendicular through the query point, long enough to be sure
        // it spans the segment's projection.
        let reach = start_dist.max(stop_dist);
        let direction = bearing_deg(start, stop);
        let perp_a = destination(point, reach, direction + 90.0);
        let perp_b = destination(point, reach, direction - 90.0);

        if start_dist < best_dist {
            best = start;
            best_dist = start_dist;
            best_seg = i;
        }
        if stop_dist < best_dist {
            best = stop;
            best_dist = stop_dist;
            best_seg = i;
        }
        if let Some(foot) = segment_intersection(perp_a, perp_b, start, stop) {
            let foot_dist = distance_m(point, foot);
            if foot_dist < best_dist {
                best = foot;
                best_dist = foot_dist;
                best_seg = i;
            }
        }
    }

    // Pole/antimeridian projections can go non-finite; degrade to the
    // path's first vertex rather than reporting garbage.
    if !best.is_finite() {
        best = first;
        best_dist = distance_m(point, first);
        best_seg = 0;
    }

    let mut along = 0.0;
    for pair in path.windows(2).take(best_seg) {
        along += distance_m(pair[0], pair[1]);
    }
    along += distance_m(path[best_seg], best);

    Some(SnappedPoint {
        point: best,
        segment_index: best_seg,
        distance_along_m: along,
        distance_m: best_dist,
    })
}

/// Intersection of segments `a1→a2` and `b1→b2`, treating degree space as
/// planar.  Returns `None` for parallel segments or an intersection outside
/// either segment's bounds.
///
/// Planar-in-degrees is intentionally identical to the reference snapping
/// behavior; at step scale (tens to hundreds of metres) the spherical error
/// is far below GPS noise.
fn segment_intersection(
    a1: Coordinate,
    a2: Coordinate,
    b1: Coordinate,
    b2: Coordinate,
) -> Option<Coordinate> {
    let denom = (b2.lat - b1.lat) * (a2.lon - a1.lon) - (b2.lon - b1.lon) * (a2.lat - a1.lat);
    if denom == 0.0 {
        return None;
    }

    let d_lat = a1.lat - b1.lat;
    let d_lon = a1.lon - b1.lon;
    let ua = ((b2.lon - b1.lon) * d_lat - (b2.lat - b1.lat) * d_lon) / denom;
    let ub = ((a2.lon - a1.lon) * d_lat - (a2.lat - a1.lat) * d_lon) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(Coordinate::new(
            a1.lon + ua * (a2.lon - a1.lon),
            a1.lat + ua * (a2.lat - a1.lat),
        ))
    } else {
        None
    }
}

// ── Composed measurement ──────────────────────────────────────────────────────

/// Distance in metres from a raw position fix to the nearest point of a
/// step's geometry.
///
/// Returns 0 for a step with empty geometry or when the fix coincides with
/// the geometry's first vertex (the common first-update-on-a-step case).
/// Any non-finite result degrades to a measurement against the first vertex,
/// and finally to 0 — numerical safety over precision for pathological input.
pub fn user_true_distance_from_step(
    point: Coordinate,
    step: &Step,
    precision: u32,
) -> GeometryResult<f64> {
    if step.geometry.is_empty() {
        return Ok(0.0);
    }

    let path = polyline::decode(&step.geometry, precision)?;
    match path.as_slice() {
        [] => Ok(0.0),
        [first, ..] if point == *first => Ok(0.0),
        [only] => Ok(distance_m(point, *only)),
        _ => {
            let Some(snapped) = nearest_point_on_path(point, &path) else {
                return Ok(0.0);
            };
            let snapped_point = if snapped.point.is_finite() {
                snapped.point
            } else {
                path[0]
            };
            let dist = distance_m(point, snapped_point);
            Ok(if dist.is_finite() { dist } else { 0.0 })
        }
    }
}
