//! The route model: `Route` → `Leg` → `Step` → `Intersection`.
//!
//! A route is supplied once per navigation session by an external directions
//! provider and is immutable for the session's duration.  All types here are
//! plain value types; the serde derives (behind the `serde` feature) map the
//! snake_case fields of a directions response directly.
//!
//! # Geometry convention
//!
//! A step's road geometry travels as an encoded polyline string
//! (`Step::geometry`); decoding lives in `nav-geo` so this crate stays free
//! of geometry code.  Invariant: a step's decoded geometry and its
//! intersections are co-located — every intersection's location equals, or
//! nearly equals after encode/decode rounding, some geometry vertex.

use crate::error::{RouteError, RouteResult};
use crate::geo::Coordinate;

// ── Intersection ──────────────────────────────────────────────────────────────

/// A road junction along a step, in travel order within `Step::intersections`.
///
/// `bearings` and `entry` are passed through opaquely for consumers
/// (lane/maneuver presentation); the progress engine only reads `location`.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    /// Position of the junction on the step geometry.
    pub location: Coordinate,

    /// Available road bearings at the junction, degrees clockwise from north.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bearings: Vec<u16>,

    /// Per-bearing entry allowance, parallel to `bearings`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entry: Vec<bool>,

    /// Index of the step this intersection ends.  Set only on the boundary
    /// intersection a step shares with its successor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ends_step: Option<usize>,
}

impl Intersection {
    /// Intersection with only a location, the common case in route data.
    pub fn at(location: Coordinate) -> Self {
        Self { location, ..Self::default() }
    }
}

// ── Step / Leg / Route ────────────────────────────────────────────────────────

/// One maneuver unit of a leg: a polyline geometry, distances, and the
/// junctions encountered while traveling it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Encoded polyline geometry (see `nav-geo::polyline`).
    pub geometry: String,

    /// Step length in metres, as reported by the directions provider.
    pub distance_m: f64,

    /// Expected travel time in seconds.
    pub duration_s: f64,

    /// Junctions along the step, in travel order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub intersections: Vec<Intersection>,
}

/// Portion of a route between two waypoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub distance_m: f64,
    pub duration_s: f64,
    pub steps: Vec<Step>,
}

/// A complete multi-leg driving route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub distance_m: f64,
    pub duration_s: f64,
    pub legs: Vec<Leg>,
}

impl Route {
    /// Check the shape invariant: at least one leg, every leg at least one
    /// step.  Call once when a session starts; lookups below assume nothing.
    pub fn validate(&self) -> RouteResult<()> {
        if self.legs.is_empty() {
            return Err(RouteError::NoLegs);
        }
        for (i, leg) in self.legs.iter().enumerate() {
            if leg.steps.is_empty() {
                return Err(RouteError::EmptyLeg(i));
            }
        }
        Ok(())
    }

    /// The step addressed by `(leg_index, step_index)`, if valid.
    pub fn step(&self, leg_index: usize, step_index: usize) -> Option<&Step> {
        self.legs.get(leg_index)?.steps.get(step_index)
    }

    /// The step after `(leg_index, step_index)` in travel order, crossing the
    /// leg boundary into the next leg's first step.  `None` only when the
    /// addressed step is the route's last.
    pub fn next_step(&self, leg_index: usize, step_index: usize) -> Option<&Step> {
        let leg = self.legs.get(leg_index)?;
        match leg.steps.get(step_index + 1) {
            Some(step) => Some(step),
            None => self.legs.get(leg_index + 1)?.steps.first(),
        }
    }

    /// `true` when `(leg_index, step_index)` addresses the final step of the
    /// final leg.
    pub fn is_final_step(&self, leg_index: usize, step_index: usize) -> bool {
        leg_index + 1 == self.legs.len()
            && self
                .legs
                .last()
                .is_some_and(|leg| step_index + 1 == leg.steps.len())
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}
