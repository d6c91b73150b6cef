//! Admission gate bounding concurrent rendering sessions.
//!
//! This module provides [`AdmissionGate`], the counting gate that limits how
//! many heavyweight rendering sessions may be active simultaneously, and
//! [`SlotPermit`], the RAII token proving admission.
//!
//! # Overview
//!
//! Rendering sessions are expensive (each is a full browser context), so the
//! gate admits at most `capacity` operations at a time. Excess requests
//! queue and are served in arrival order; they are never dropped or
//! rejected at this layer. Deadlines are enforced by the orchestration
//! layer wrapping the whole operation; the gate itself waits as long as
//! needed.
//!
//! # Fairness and hand-off
//!
//! Built on [`tokio::sync::Semaphore`], which queues waiters FIFO and hands
//! a released permit directly to the longest-waiting acquirer. The slot
//! never dips to "free" in between, so a burst of newcomers cannot starve
//! an old waiter.
//!
//! # Release discipline
//!
//! A slot is released exactly once per successful acquire, by dropping the
//! [`SlotPermit`]: on return, on error, or during unwinding. Because the
//! permit is the only way to release, "release without a matching acquire"
//! is unrepresentable rather than a runtime check.
//!
//! # Example
//!
//! ```rust,ignore
//! let gate = AdmissionGate::new(2);
//!
//! let permit = gate.acquire().await; // suspends until a slot is free
//! // ... drive a rendering session ...
//! drop(permit); // slot handed to the longest waiter, if any
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Shared occupancy counters, read by [`GateStats`](crate::stats::GateStats)
/// snapshots.
///
/// Kept separate from the gate itself so permits (and abandoned waiters) can
/// update them from wherever they are dropped.
#[derive(Debug, Default)]
pub(crate) struct GateCounters {
    /// Slots currently held. 0 <= in_use <= capacity.
    in_use: AtomicUsize,

    /// Acquirers currently parked in the FIFO queue.
    waiting: AtomicUsize,
}

/// Counting gate bounding concurrent rendering sessions.
///
/// `acquire()` suspends the caller until a slot is free, then returns a
/// [`SlotPermit`]. Capacity is fixed at construction.
///
/// # Thread Safety
///
/// The gate is `Send + Sync`; clone the surrounding [`Arc`] to share it.
pub struct AdmissionGate {
    permits: Arc<Semaphore>,
    counters: Arc<GateCounters>,
    capacity: usize,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` concurrent holders.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. The configuration builder rejects this
    /// before a gate is ever constructed.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "admission gate capacity must be positive");

        log::info!("Initializing admission gate with capacity {}", capacity);

        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            counters: Arc::new(GateCounters::default()),
            capacity,
        }
    }

    /// Acquire a slot, suspending until one is free.
    ///
    /// Never fails and never times out at this layer: the overall operation
    /// deadline is enforced by the caller, and abandoning this future while
    /// queued (deadline expiry) is safe: the waiter leaves the queue
    /// without ever having consumed a slot.
    pub async fn acquire(&self) -> SlotPermit {
        // Cancel-safe waiting counter: the guard decrements on drop whether
        // we were granted a slot or abandoned in the queue.
        let wait_guard = WaitGuard::enter(&self.counters);

        log::trace!(
            "Admission gate: waiting for slot ({} in use, {} queued)",
            self.counters.in_use.load(Ordering::Relaxed),
            self.counters.waiting.load(Ordering::Relaxed)
        );

        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .expect("admission gate semaphore is never closed");

        drop(wait_guard);
        self.counters.in_use.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "Admission gate: slot granted ({}/{} in use)",
            self.counters.in_use.load(Ordering::Relaxed),
            self.capacity
        );

        SlotPermit {
            _permit: permit,
            counters: Arc::clone(&self.counters),
        }
    }

    /// Fixed capacity of this gate.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held.
    pub fn in_use(&self) -> usize {
        self.counters.in_use.load(Ordering::Relaxed)
    }

    /// Number of acquirers currently queued.
    pub fn waiting(&self) -> usize {
        self.counters.waiting.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("capacity", &self.capacity)
            .field("in_use", &self.in_use())
            .field("waiting", &self.waiting())
            .finish()
    }
}

/// RAII token proving admission through the gate.
///
/// Dropping the permit releases the slot and wakes the longest waiter.
/// Hold it for the whole lifetime of the rendering session it admits; no
/// operation may hold more than one.
pub struct SlotPermit {
    _permit: OwnedSemaphorePermit,
    counters: Arc<GateCounters>,
}

impl Drop for SlotPermit {
    fn drop(&mut self) {
        self.counters.in_use.fetch_sub(1, Ordering::Relaxed);
        log::trace!("Admission gate: slot released");
        // The inner permit drop performs the actual semaphore hand-off.
    }
}

impl std::fmt::Debug for SlotPermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotPermit").finish()
    }
}

/// Increments `waiting` on entry, decrements on drop.
///
/// Lives across the `acquire_owned().await` so that a future dropped
/// mid-wait (operation deadline) still corrects the queue count.
struct WaitGuard {
    counters: Arc<GateCounters>,
}

impl WaitGuard {
    fn enter(counters: &Arc<GateCounters>) -> Self {
        counters.waiting.fetch_add(1, Ordering::Relaxed);
        Self {
            counters: Arc::clone(counters),
        }
    }
}

impl Drop for WaitGuard {
    fn drop(&mut self) {
        self.counters.waiting.fetch_sub(1, Ordering::Relaxed);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Verifies that at most `capacity` holders are admitted at any instant
    /// and that all launched operations eventually complete.
    #[tokio::test]
    async fn test_capacity_bound_under_oversubscription() {
        let gate = Arc::new(AdmissionGate::new(2));
        let concurrent = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let gate = Arc::clone(&gate);
            let concurrent = Arc::clone(&concurrent);
            let peak = Arc::clone(&peak);

            handles.push(tokio::spawn(async move {
                let _permit = gate.acquire().await;

                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);

                tokio::time::sleep(Duration::from_millis(20)).await;

                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        for handle in handles {
            handle.await.expect("task should complete");
        }

        assert!(
            peak.load(Ordering::SeqCst) <= 2,
            "more than capacity holders were admitted simultaneously"
        );
        assert_eq!(gate.in_use(), 0, "all slots should be released");
        assert_eq!(gate.waiting(), 0, "queue should be drained");
    }

    /// Verifies FIFO hand-off: a request that queued earlier is granted its
    /// slot no later than one that queued after it.
    #[tokio::test]
    async fn test_fifo_grant_order() {
        let gate = Arc::new(AdmissionGate::new(1));
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        // Occupy the single slot so the next acquirers must queue.
        let holder = gate.acquire().await;

        let mut handles = Vec::new();
        for label in ["first", "second", "third"] {
            let gate = Arc::clone(&gate);
            let order = Arc::clone(&order);

            handles.push(tokio::spawn(async move {
                let _permit = gate.acquire().await;
                order.lock().unwrap().push(label);
            }));

            // Give each task time to park in the queue before the next one
            // arrives, so arrival order is deterministic.
            tokio::time::sleep(Duration::from_millis(30)).await;
        }

        assert_eq!(gate.waiting(), 3);

        drop(holder);
        for handle in handles {
            handle.await.expect("task should complete");
        }

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    /// Verifies that dropping the permit releases exactly one slot.
    #[tokio::test]
    async fn test_permit_drop_releases() {
        let gate = AdmissionGate::new(1);

        {
            let _permit = gate.acquire().await;
            assert_eq!(gate.in_use(), 1);
        }

        assert_eq!(gate.in_use(), 0);

        // The slot is immediately reusable.
        let _again = gate.acquire().await;
        assert_eq!(gate.in_use(), 1);
    }

    /// Verifies that a waiter abandoned mid-wait (deadline expiry) never
    /// consumes a slot and leaves the queue count at zero.
    #[tokio::test]
    async fn test_abandoned_waiter_leaks_nothing() {
        let gate = Arc::new(AdmissionGate::new(1));
        let holder = gate.acquire().await;

        let queued = {
            let gate = Arc::clone(&gate);
            tokio::time::timeout(Duration::from_millis(50), async move {
                let _permit = gate.acquire().await;
            })
            .await
        };
        assert!(queued.is_err(), "waiter should have timed out in the queue");

        assert_eq!(gate.waiting(), 0, "abandoned waiter must leave the queue");
        assert_eq!(gate.in_use(), 1, "only the original holder has a slot");

        drop(holder);
        assert_eq!(gate.in_use(), 0);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        let _ = AdmissionGate::new(0);
    }
}
