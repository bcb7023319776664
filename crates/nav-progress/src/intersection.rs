//! Along-step intersection indexing and scanning.
//!
//! A step's intersections arrive in travel order but carry no distance
//! information.  [`index_intersections`] pins each one to its cumulative
//! distance from the step's start by matching it to the nearest vertex of
//! the step's decoded geometry; the scan functions below then answer "which
//! junction did the traveler pass last, and which comes next" for a given
//! distance traveled into the step.
//!
//! # Vertex matching
//!
//! Intersection coordinates and geometry vertices come from the same source
//! but pass through polyline encode/decode independently, so they are rarely
//! bit-identical.  Matching is nearest-vertex via an R-tree (`rstar`) over
//! the step's vertices.  A nearest vertex farther than the step's own length
//! (floored at [`MATCH_LIMIT_FLOOR_M`]) from the intersection indicates
//! malformed route data and is rejected rather than silently indexed.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use nav_core::{Coordinate, Intersection, Step};
use nav_geo::distance_m;

use crate::error::{ProgressError, ProgressResult};

/// Floor on the off-geometry rejection limit, metres.  Keeps tiny steps from
/// rejecting their own intersections over encode/decode rounding (~0.1 m at
/// precision 6).
pub const MATCH_LIMIT_FLOOR_M: f64 = 5.0;

// ── IntersectionDistance ──────────────────────────────────────────────────────

/// An intersection paired with its cumulative distance along the owning
/// step's geometry, from the step's start to the intersection's nearest
/// vertex.
///
/// Produced in travel order; distances are monotonically non-decreasing for
/// well-formed route data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionDistance {
    pub intersection: Intersection,
    pub distance_along_step_m: f64,
}

// ── R-tree vertex entry ───────────────────────────────────────────────────────

/// Entry in the vertex R-tree: a 2-D `[lon, lat]` point with its index into
/// the step's vertex sequence.
struct VertexEntry {
    point: [f64; 2],
    index: usize,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared Euclidean distance in lon/lat degree space.  Sufficient for
    /// nearest-vertex queries at step scale (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lon = self.point[0] - point[0];
        let d_lat = self.point[1] - point[1];
        d_lon * d_lon + d_lat * d_lat
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

/// Pin each intersection to its cumulative distance along the step geometry.
///
/// Output preserves intersection order.  An empty vertex path or an empty
/// intersection list yields an empty index.  An intersection whose nearest
/// vertex is farther away than `max(path length, MATCH_LIMIT_FLOOR_M)` fails
/// with [`ProgressError::IntersectionOffGeometry`].
pub fn index_intersections(
    step_points: &[Coordinate],
    intersections: &[Intersection],
) -> ProgressResult<Vec<IntersectionDistance>> {
    if step_points.is_empty() || intersections.is_empty() {
        return Ok(Vec::new());
    }

    // Prefix sums: cumulative[i] = distance from vertex 0 to vertex i.
    let mut cumulative = Vec::with_capacity(step_points.len());
    cumulative.push(0.0f64);
    for pair in step_points.windows(2) {
        let prev = *cumulative.last().unwrap_or(&0.0);
        cumulative.push(prev + distance_m(pair[0], pair[1]));
    }
    let path_length = *cumulative.last().unwrap_or(&0.0);
    let limit_m = path_length.max(MATCH_LIMIT_FLOOR_M);

    let entries: Vec<VertexEntry> = step_points
        .iter()
        .enumerate()
        .map(|(index, c)| VertexEntry { point: [c.lon, c.lat], index })
        .collect();
    let tree = RTree::bulk_load(entries);

    let mut indexed = Vec::with_capacity(intersections.len());
    for intersection in intersections {
        let query = [intersection.location.lon, intersection.location.lat];
        let entry = match tree.nearest_neighbor(&query) {
            Some(entry) => entry,
            // Every intersection must produce an index entry; the tree was
            // bulk-loaded from step_points, checked non-empty above.
            None => unreachable!("vertex tree is empty despite non-empty step_points"),
        };
        let offset_m = distance_m(intersection.location, step_points[entry.index]);
        if offset_m > limit_m {
            return Err(ProgressError::IntersectionOffGeometry {
                location: intersection.location,
                offset_m,
                limit_m,
            });
        }
        indexed.push(IntersectionDistance {
            intersection: intersection.clone(),
            distance_along_step_m: cumulative[entry.index],
        });
    }

    Ok(indexed)
}

// ── Assembly and scanning ─────────────────────────────────────────────────────

/// The intersection sequence a traveler encounters on `current_step`: the
/// step's own intersections plus the upcoming step's first intersection (the
/// shared boundary point marking the step's exit), when an upcoming step
/// exists.
pub fn assemble_intersections(
    current_step: &Step,
    upcoming_step: Option<&Step>,
) -> Vec<Intersection> {
    let mut assembled = current_step.intersections.clone();
    if let Some(boundary) = upcoming_step.and_then(|s| s.intersections.first()) {
        assembled.push(boundary.clone());
    }
    assembled
}

/// The intersection most recently passed after traveling
/// `step_distance_traveled_m` metres into the step.
///
/// Scans `distances` in order and keeps the last entry at or before the
/// traveled distance.  Before the first indexed entry the step's first
/// intersection is the baseline — a step always starts at an implicit
/// junction.  `None` only for an empty sequence.
pub fn find_current_intersection<'a>(
    intersections: &'a [Intersection],
    distances: &'a [IntersectionDistance],
    step_distance_traveled_m: f64,
) -> Option<&'a Intersection> {
    let mut current = None;
    for entry in distances {
        if entry.distance_along_step_m <= step_distance_traveled_m {
            current = Some(&entry.intersection);
        } else {
            break;
        }
    }
    current.or_else(|| intersections.first())
}

/// The intersection following `current` in the assembled sequence.
///
/// At the end of the sequence, the upcoming step's first intersection (the
/// boundary the traveler is about to cross) serves as the upcoming one;
/// `None` only when no upcoming step remains.
pub fn find_upcoming_intersection<'a>(
    intersections: &'a [Intersection],
    upcoming_step: Option<&'a Step>,
    current: &Intersection,
) -> Option<&'a Intersection> {
    if let Some(position) = intersections.iter().position(|i| i == current) {
        if position + 1 < intersections.len() {
            return Some(&intersections[position + 1]);
        }
    }
    upcoming_step.and_then(|s| s.intersections.first())
}
