//! Deferred disposal decisions (sleep vs. evict).
//!
//! Results are queued when a customer finishes and stay queued until the
//! user resolves them, independently of whoever is being served. Only
//! results with `can_sleep_at_inn` are ever queued.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::domain::{CustomerId, CustomerResult};

/// A mutation of the queue, reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueChange {
    Enqueued { customer_id: CustomerId, pending: usize },
    Slept { customer_id: CustomerId, success: bool, pending: usize },
    Evicted { customer_id: CustomerId, pending: usize },
}

impl QueueChange {
    /// Entries left after the change.
    pub fn pending(&self) -> usize {
        match self {
            QueueChange::Enqueued { pending, .. }
            | QueueChange::Slept { pending, .. }
            | QueueChange::Evicted { pending, .. } => *pending,
        }
    }
}

/// Outcome of resolving the front entry as a stay.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepResolution {
    pub result: CustomerResult,
    pub slept: bool,
    pub change: QueueChange,
}

#[derive(Debug, Default)]
pub struct DecisionQueue {
    entries: VecDeque<CustomerResult>,
    revision: u64,
}

impl DecisionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn peek(&self) -> Option<&CustomerResult> {
        self.entries.front()
    }

    /// Queue `result` if the customer may stay; otherwise do nothing.
    pub fn enqueue(&mut self, result: CustomerResult) -> Option<QueueChange> {
        if !result.can_sleep_at_inn {
            debug!(customer_id = %result.customer_id, "Result not eligible for a stay; not queued");
            return None;
        }
        let customer_id = result.customer_id.clone();
        self.entries.push_back(result);
        self.revision += 1;
        info!(%customer_id, pending = self.entries.len(), "Disposal decision queued");
        Some(QueueChange::Enqueued {
            customer_id,
            pending: self.entries.len(),
        })
    }

    /// Dequeue the front entry and run `apply_stay` on it.
    ///
    /// The entry is gone afterwards whatever `apply_stay` returns; a failed
    /// stay is not retried.
    pub fn resolve_sleep<F>(&mut self, apply_stay: F) -> Option<SleepResolution>
    where
        F: FnOnce(&CustomerResult) -> bool,
    {
        let result = self.entries.pop_front()?;
        self.revision += 1;
        let slept = apply_stay(&result);
        info!(
            customer_id = %result.customer_id,
            slept,
            pending = self.entries.len(),
            "Disposal resolved: sleep"
        );
        let change = QueueChange::Slept {
            customer_id: result.customer_id.clone(),
            success: slept,
            pending: self.entries.len(),
        };
        Some(SleepResolution {
            result,
            slept,
            change,
        })
    }

    /// Dequeue the front entry with no other effect.
    pub fn resolve_evict(&mut self) -> Option<(CustomerResult, QueueChange)> {
        let result = self.entries.pop_front()?;
        self.revision += 1;
        info!(
            customer_id = %result.customer_id,
            pending = self.entries.len(),
            "Disposal resolved: evict"
        );
        let change = QueueChange::Evicted {
            customer_id: result.customer_id.clone(),
            pending: self.entries.len(),
        };
        Some((result, change))
    }
}
