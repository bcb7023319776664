//! `nav-progress` — route-progress snapshots for turn-by-turn navigation.
//!
//! Given an immutable [`Route`](nav_core::Route) and a per-update position
//! estimate (leg/step indices plus distance-remaining figures), this crate
//! derives an immutable [`RouteProgress`] snapshot: current/upcoming step
//! geometry, the junction most recently passed and the next one ahead, and
//! all remaining-distance figures.
//!
//! The engine never decides *when* to advance a step or leg — that
//! bookkeeping belongs to the caller feeding it updates.  It only answers
//! *what progress looks like* at a given index with a given estimate.
//!
//! | Module           | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | [`intersection`] | Along-step intersection indexing and scanning     |
//! | [`snapshot`]     | `RouteProgress`, the immutable output record      |
//! | [`tracker`]      | `ProgressTracker`, `ProgressUpdate`, `build_snapshot` |
//! | [`dispatcher`]   | `ProgressObserver` fan-out with fault isolation   |
//! | [`error`]        | `ProgressError`, `ProgressResult`                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nav_geo::PRECISION_6;
//! use nav_progress::{ProgressTracker, ProgressUpdate};
//!
//! let mut tracker = ProgressTracker::new(&route, PRECISION_6)?;
//! let progress = tracker.update(&ProgressUpdate {
//!     leg_index: 0,
//!     step_index: 0,
//!     step_distance_remaining_m: 120.0,
//!     leg_distance_remaining_m: 840.0,
//!     route_distance_remaining_m: 2_310.0,
//! })?;
//! dispatcher.dispatch_progress(&progress);
//! ```

pub mod dispatcher;
pub mod error;
pub mod intersection;
pub mod snapshot;
pub mod tracker;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dispatcher::{NoopObserver, ObserverId, ProgressDispatcher, ProgressObserver};
pub use error::{ProgressError, ProgressResult};
pub use intersection::{
    assemble_intersections, find_current_intersection, find_upcoming_intersection,
    index_intersections, IntersectionDistance,
};
pub use snapshot::RouteProgress;
pub use tracker::{build_snapshot, ProgressTracker, ProgressUpdate};
