//! Occupancy statistics for monitoring and health checks.
//!
//! This module provides [`GateStats`], a point-in-time snapshot of the
//! admission gate and engine state. Expose it through whatever readiness or
//! metrics endpoint the host application runs.
//!
//! # Example
//!
//! ```rust,ignore
//! let stats = scout.stats();
//!
//! if stats.waiting > stats.capacity {
//!     log::warn!("admission queue is backing up: {:?}", stats);
//! }
//! ```

use serde::Serialize;

/// Point-in-time snapshot of scout occupancy.
///
/// All values are sampled independently and may be momentarily
/// inconsistent with each other under concurrent load; treat them as
/// monitoring signals, not invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateStats {
    /// Fixed admission capacity (maximum concurrent sessions).
    pub capacity: usize,

    /// Slots currently held by in-flight operations.
    pub in_use: usize,

    /// Operations currently queued for a slot.
    pub waiting: usize,

    /// Whether a rendering engine is currently live.
    pub engine_ready: bool,
}

impl GateStats {
    /// Free slots at the sampled instant.
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.in_use)
    }

    /// Whether a new operation would be admitted without queueing.
    pub fn has_headroom(&self) -> bool {
        self.in_use < self.capacity && self.waiting == 0
    }
}

impl std::fmt::Display for GateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} slots in use, {} waiting, engine {}",
            self.in_use,
            self.capacity,
            self.waiting,
            if self.engine_ready { "ready" } else { "cold" }
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_slots() {
        let stats = GateStats {
            capacity: 4,
            in_use: 1,
            waiting: 0,
            engine_ready: true,
        };

        assert_eq!(stats.available(), 3);
        assert!(stats.has_headroom());
    }

    #[test]
    fn test_available_saturates() {
        // in_use can momentarily read above capacity between samples;
        // available must not underflow.
        let stats = GateStats {
            capacity: 2,
            in_use: 3,
            waiting: 0,
            engine_ready: true,
        };

        assert_eq!(stats.available(), 0);
    }

    #[test]
    fn test_no_headroom_when_queued() {
        let stats = GateStats {
            capacity: 2,
            in_use: 1,
            waiting: 1,
            engine_ready: false,
        };

        assert!(!stats.has_headroom());
    }

    #[test]
    fn test_display_format() {
        let stats = GateStats {
            capacity: 2,
            in_use: 2,
            waiting: 3,
            engine_ready: true,
        };

        assert_eq!(stats.to_string(), "2/2 slots in use, 3 waiting, engine ready");
    }
}
