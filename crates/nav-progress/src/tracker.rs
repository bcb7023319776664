//! Snapshot construction and the per-session tracker.
//!
//! [`build_snapshot`] is a pure function of the route and the update — no
//! side effects, no shared state — so hosts running many concurrent
//! navigation sessions need no locking beyond delivering each session's
//! snapshots in order.  [`ProgressTracker`] is the convenience wrapper one
//! session normally uses: it validates the route once and keeps the
//! clamped-update diagnostic counter.

use nav_core::Route;
use nav_geo::polyline;

use crate::error::{ProgressError, ProgressResult};
use crate::intersection::{
    assemble_intersections, find_current_intersection, find_upcoming_intersection,
    index_intersections,
};
use crate::snapshot::RouteProgress;

// ── ProgressUpdate ────────────────────────────────────────────────────────────

/// Inputs for one progress computation.
///
/// The caller's travel bookkeeping supplies the indices and the three
/// distance-remaining estimates; when driven from a raw fix, the step figure
/// is typically derived via `nav_geo::user_true_distance_from_step` composed
/// with the caller's own progress accounting.
///
/// Distance estimates are noisy.  Values outside the step's `[0, distance]`
/// range are clamped during snapshot construction, not rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressUpdate {
    pub leg_index: usize,
    pub step_index: usize,
    pub step_distance_remaining_m: f64,
    pub leg_distance_remaining_m: f64,
    pub route_distance_remaining_m: f64,
}

// ── Snapshot construction ─────────────────────────────────────────────────────

/// Build a [`RouteProgress`] snapshot for the given update.
///
/// Fails when the indices do not address a valid step or when the addressed
/// geometry is malformed.  Pure: same route, precision, and update always
/// produce the same snapshot.
pub fn build_snapshot(
    route: &Route,
    precision: u32,
    update: &ProgressUpdate,
) -> ProgressResult<RouteProgress> {
    let leg = route
        .legs
        .get(update.leg_index)
        .ok_or(ProgressError::LegIndexOutOfRange {
            leg: update.leg_index,
            legs: route.legs.len(),
        })?;
    let current_step =
        leg.steps
            .get(update.step_index)
            .ok_or(ProgressError::StepIndexOutOfRange {
                leg: update.leg_index,
                step: update.step_index,
                steps: leg.steps.len(),
            })?;

    let current_step_points = polyline::decode(&current_step.geometry, precision)?;
    let upcoming_step = route.next_step(update.leg_index, update.step_index);
    let upcoming_step_points = upcoming_step
        .map(|step| polyline::decode(&step.geometry, precision))
        .transpose()?;

    let intersections = assemble_intersections(current_step, upcoming_step);
    let intersection_distances = index_intersections(&current_step_points, &intersections)?;

    let step_distance_traveled_m = (current_step.distance_m - update.step_distance_remaining_m)
        .clamp(0.0, current_step.distance_m);

    let current_intersection = find_current_intersection(
        &intersections,
        &intersection_distances,
        step_distance_traveled_m,
    )
    .cloned();
    let upcoming_intersection = current_intersection
        .as_ref()
        .and_then(|current| find_upcoming_intersection(&intersections, upcoming_step, current))
        .cloned();

    Ok(RouteProgress {
        leg_index: update.leg_index,
        step_index: update.step_index,
        step_distance_remaining_m: update.step_distance_remaining_m.max(0.0),
        leg_distance_remaining_m: update.leg_distance_remaining_m.max(0.0),
        route_distance_remaining_m: update.route_distance_remaining_m.max(0.0),
        step_distance_traveled_m,
        current_step_distance_m: current_step.distance_m,
        is_final_step: route.is_final_step(update.leg_index, update.step_index),
        current_step_points,
        upcoming_step_points,
        intersections,
        intersection_distances,
        current_intersection,
        upcoming_intersection,
    })
}

// ── ProgressTracker ───────────────────────────────────────────────────────────

/// Per-session progress engine: a validated route reference, the polyline
/// precision of its geometry, and a diagnostic counter for clamped updates.
///
/// Logically single-threaded: one update is computed and consumed before the
/// next fix arrives.  The route itself is read-only and freely shareable.
pub struct ProgressTracker<'r> {
    route: &'r Route,
    precision: u32,
    clamped_updates: u64,
}

impl<'r> ProgressTracker<'r> {
    /// Create a tracker for a session, validating the route's shape once.
    pub fn new(route: &'r Route, precision: u32) -> ProgressResult<Self> {
        route.validate()?;
        Ok(Self { route, precision, clamped_updates: 0 })
    }

    pub fn route(&self) -> &'r Route {
        self.route
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Number of updates whose step-distance estimate fell outside the
    /// step's `[0, distance]` range and was clamped.  A steadily growing
    /// count points at drift in the caller's distance bookkeeping.
    pub fn clamped_updates(&self) -> u64 {
        self.clamped_updates
    }

    /// Compute the progress snapshot for `update`.
    pub fn update(&mut self, update: &ProgressUpdate) -> ProgressResult<RouteProgress> {
        let progress = build_snapshot(self.route, self.precision, update)?;

        let out_of_range = update.step_distance_remaining_m < 0.0
            || update.step_distance_remaining_m > progress.current_step_distance_m;
        if out_of_range {
            self.clamped_updates += 1;
            log::debug!(
                "step distance remaining {:.1} m outside [0, {:.1}] on leg {} step {}; clamped",
                update.step_distance_remaining_m,
                progress.current_step_distance_m,
                update.leg_index,
                update.step_index,
            );
        }

        Ok(progress)
    }
}
