//! Progress-event fan-out.
//!
//! An ordered registry of [`ProgressObserver`]s.  Delivery follows
//! subscription order, and a panicking observer is isolated: the panic is
//! caught, logged, and delivery continues with the remaining observers, so
//! one faulty consumer cannot starve the others of progress events.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::snapshot::RouteProgress;

// ── Observer trait ────────────────────────────────────────────────────────────

/// Callbacks invoked by [`ProgressDispatcher`] as a navigation session
/// produces snapshots.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — remaining-distance printer
///
/// ```rust,ignore
/// struct RemainingPrinter;
///
/// impl ProgressObserver for RemainingPrinter {
///     fn on_progress(&mut self, progress: &RouteProgress) {
///         println!("{:.0} m to go", progress.route_distance_remaining_m);
///     }
/// }
/// ```
pub trait ProgressObserver {
    /// Called once per computed snapshot, in computation order.
    fn on_progress(&mut self, _progress: &RouteProgress) {}

    /// Called when the session stops being fed updates.
    fn on_session_end(&mut self) {}
}

/// A [`ProgressObserver`] that does nothing.
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Handle identifying a subscription, returned by
/// [`ProgressDispatcher::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u32);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({})", self.0)
    }
}

/// Ordered subscriber registry with per-observer fault isolation.
#[derive(Default)]
pub struct ProgressDispatcher {
    observers: Vec<(ObserverId, Box<dyn ProgressObserver>)>,
    next_id: u32,
}

impl ProgressDispatcher {
    pub fn new() -> Self {
        Self { observers: Vec::new(), next_id: 0 }
    }

    /// Register an observer; delivery follows subscription order.
    pub fn subscribe(&mut self, observer: Box<dyn ProgressObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove a subscription.  Idempotent: removing an id that is not (or no
    /// longer) registered logs a warning and returns `false`.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        let removed = self.observers.len() < before;
        if !removed {
            log::warn!("{id} is not subscribed; nothing removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver a snapshot to every observer in subscription order.
    pub fn dispatch_progress(&mut self, progress: &RouteProgress) {
        self.for_each_guarded(|observer| observer.on_progress(progress));
    }

    /// Notify every observer that the session has ended.
    pub fn dispatch_session_end(&mut self) {
        self.for_each_guarded(|observer| observer.on_session_end());
    }

    /// Guarded iteration: one observer's panic must not break delivery to
    /// the observers after it.
    fn for_each_guarded(&mut self, mut deliver: impl FnMut(&mut dyn ProgressObserver)) {
        for (id, observer) in &mut self.observers {
            let outcome = catch_unwind(AssertUnwindSafe(|| deliver(observer.as_mut())));
            if outcome.is_err() {
                log::warn!("{id} panicked during dispatch; continuing with remaining observers");
            }
        }
    }
}
