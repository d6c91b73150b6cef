//! Content readiness probing.
//!
//! Pages in scope render their useful content late, from JavaScript, and
//! often only partially; waiting for a single "the page is done" signal
//! either blocks forever or gives up too early. The probe instead races a
//! small set of **acceptance markers** (structural signals that the target
//! content has rendered: a title region, an avatar image, a known attribute
//! marker) and declares the document "ready enough to extract" as soon as
//! **any** of them appears.
//!
//! # Budgeting
//!
//! The probe has one overall budget, split evenly across the markers, so a
//! single slow marker cannot consume the whole budget while others could
//! still succeed within it. The probe never blocks indefinitely.
//!
//! # Failure is not an error
//!
//! Exhausting every marker yields [`ProbeOutcome::Degraded`]: a logged
//! degraded-confidence signal, after which extraction proceeds anyway, since
//! the content may still be partially present. The stricter
//! [`confirm_any`](ReadinessProbe::confirm_any) check is what
//! distinguishes "private or nonexistent target" (no marker at all, return
//! nothing) from "slow-loading target" (extract what's there).

use std::time::{Duration, Instant};

use tokio::task::JoinSet;

use crate::session::WorkSession;

/// Floor for the per-marker sub-deadline, so generous marker lists against
/// a tight budget still give each wait a fighting chance.
const MIN_MARKER_BUDGET: Duration = Duration::from_millis(50);

/// Result of a readiness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// At least one acceptance marker rendered within its sub-deadline.
    Satisfied {
        /// The marker that won the race.
        marker: String,
        /// Time until the winning marker appeared.
        elapsed: Duration,
    },

    /// No marker rendered in budget. Extraction should still be attempted;
    /// confidence in the result is degraded.
    Degraded,
}

/// Bounded-time readiness probe over a set of acceptance markers.
#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    markers: Vec<String>,
    budget: Duration,
}

impl ReadinessProbe {
    /// Create a probe over the given acceptance markers (CSS selectors)
    /// with an overall budget.
    pub fn new<I, S>(markers: I, budget: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
            budget,
        }
    }

    /// The markers this probe races.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Race all marker waits; resolve as soon as any succeeds.
    ///
    /// Each wait is individually time-boxed to `budget / markers.len()`.
    /// Returns [`ProbeOutcome::Degraded`] (never an error) when every wait
    /// exhausts its sub-deadline. Losing waits are abandoned once a winner
    /// is found; each is bounded by its own sub-deadline regardless.
    pub async fn wait_any(&self, session: &WorkSession) -> ProbeOutcome {
        if self.markers.is_empty() {
            log::warn!("⚠️ Readiness probe has no markers configured");
            return ProbeOutcome::Degraded;
        }

        let sub_deadline = per_marker_budget(self.budget, self.markers.len());
        let start = Instant::now();

        log::debug!(
            "Probing session {} readiness: {} markers, {:?} each",
            session.id(),
            self.markers.len(),
            sub_deadline
        );

        let mut waits = JoinSet::new();
        for marker in &self.markers {
            let tab = session.tab();
            let marker = marker.clone();

            waits.spawn(async move {
                let found = tokio::task::spawn_blocking({
                    let marker = marker.clone();
                    move || tab.wait_for_element_with_custom_timeout(&marker, sub_deadline).is_ok()
                })
                .await
                .unwrap_or(false);

                found.then_some(marker)
            });
        }

        while let Some(joined) = waits.join_next().await {
            if let Ok(Some(marker)) = joined {
                let elapsed = start.elapsed();
                log::debug!(
                    "✅ Session {} ready: marker '{}' rendered after {:?}",
                    session.id(),
                    marker,
                    elapsed
                );
                return ProbeOutcome::Satisfied { marker, elapsed };
            }
        }

        log::warn!(
            "⚠️ Session {} readiness degraded: no acceptance marker within {:?}",
            session.id(),
            self.budget
        );
        ProbeOutcome::Degraded
    }

    /// Stricter confirmation step: is at least one acceptance marker
    /// present *right now*, without waiting?
    ///
    /// Used after [`wait_any`](Self::wait_any) came back degraded to
    /// short-circuit extraction entirely: zero markers post-probe means a
    /// private or nonexistent target, which callers report as an empty
    /// result rather than an error.
    pub async fn confirm_any(&self, session: &WorkSession) -> bool {
        let tab = session.tab();
        let markers = self.markers.clone();

        tokio::task::spawn_blocking(move || {
            markers.iter().any(|marker| tab.find_element(marker).is_ok())
        })
        .await
        .unwrap_or(false)
    }
}

/// Split the overall budget evenly across `count` markers, with a floor.
fn per_marker_budget(budget: Duration, count: usize) -> Duration {
    let split = budget / count.max(1) as u32;
    split.max(MIN_MARKER_BUDGET)
}

// ============================================================================
// Unit Tests
// ============================================================================
