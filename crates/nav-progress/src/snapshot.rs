//! The immutable progress snapshot.

use nav_core::{Coordinate, Intersection};

use crate::intersection::IntersectionDistance;

/// A snapshot of the traveler's progress along a route, produced fresh on
/// every update cycle and never mutated in place.
///
/// Snapshots own their data and carry no reference back to the tracker or
/// the route, so they can be handed to listeners, queued, or sent across
/// threads freely.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteProgress {
    /// Current leg within the route (0-based).
    pub leg_index: usize,

    /// Current step within the leg (0-based).
    pub step_index: usize,

    /// Metres left on the current step.  Never negative.
    pub step_distance_remaining_m: f64,

    /// Metres left on the current leg.  Never negative.
    pub leg_distance_remaining_m: f64,

    /// Metres left on the whole route.  Never negative.
    pub route_distance_remaining_m: f64,

    /// Metres traveled into the current step, clamped into
    /// `[0, current_step_distance_m]`.
    pub step_distance_traveled_m: f64,

    /// The current step's total length in metres, from the route data.
    pub current_step_distance_m: f64,

    /// `true` when the current step is the final step of the final leg.
    pub is_final_step: bool,

    /// Decoded geometry of the current step.
    pub current_step_points: Vec<Coordinate>,

    /// Decoded geometry of the next step, or `None` at the route's last step.
    pub upcoming_step_points: Option<Vec<Coordinate>>,

    /// The current step's intersections plus the upcoming step's entry
    /// boundary, in travel order.
    pub intersections: Vec<Intersection>,

    /// `intersections` paired with cumulative along-step distances.
    pub intersection_distances: Vec<IntersectionDistance>,

    /// The intersection most recently passed, or `None` when the step has no
    /// intersections at all.
    pub current_intersection: Option<Intersection>,

    /// The next intersection ahead, or `None` when none remains.
    pub upcoming_intersection: Option<Intersection>,
}

impl RouteProgress {
    /// Fraction of the current step already traveled, in `[0, 1]`.
    ///
    /// A zero-length step reads as fully traveled.
    pub fn step_fraction_traveled(&self) -> f64 {
        if self.current_step_distance_m > 0.0 {
            self.step_distance_traveled_m / self.current_step_distance_m
        } else {
            1.0
        }
    }
}
