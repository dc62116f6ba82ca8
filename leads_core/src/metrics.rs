//! Counters for submissions passing through the gateway

use crate::crm::SubmissionOutcome;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

#[derive(Clone)]
pub struct SubmissionMetrics {
    pub total: Arc<AtomicU64>,
    pub accepted: Arc<AtomicU64>,
    pub duplicates: Arc<AtomicU64>,
    pub failed: Arc<AtomicU64>,
    pub rejected: Arc<AtomicU64>,
    pub last_submission_at: Arc<RwLock<Option<DateTime<Utc>>>>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: u64,
    pub accepted: u64,
    pub duplicates: u64,
    pub failed: u64,
    pub rejected: u64,
    pub acceptance_rate: f64,
    pub last_submission_at: Option<DateTime<Utc>>,
    pub uptime_seconds: i64,
}

impl Default for SubmissionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionMetrics {
    pub fn new() -> Self {
        Self {
            total: Arc::new(AtomicU64::new(0)),
            accepted: Arc::new(AtomicU64::new(0)),
            duplicates: Arc::new(AtomicU64::new(0)),
            failed: Arc::new(AtomicU64::new(0)),
            rejected: Arc::new(AtomicU64::new(0)),
            last_submission_at: Arc::new(RwLock::new(None)),
            start_time: Utc::now(),
        }
    }

    /// Validation failures never reach the CRM but still count as attempts.
    pub fn record_rejected(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.rejected.fetch_add(1, Ordering::Relaxed);
        *self.last_submission_at.write() = Some(Utc::now());
    }

    pub fn record_outcome(&self, outcome: &SubmissionOutcome) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            SubmissionOutcome::Success { .. } => &self.accepted,
            SubmissionOutcome::Duplicate { .. } => &self.duplicates,
            SubmissionOutcome::Failure { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        *self.last_submission_at.write() = Some(Utc::now());
    }

    pub fn snapshot(&self) -> SubmissionStats {
        let total = self.total.load(Ordering::Relaxed);
        let accepted = self.accepted.load(Ordering::Relaxed);

        SubmissionStats {
            total,
            accepted,
            duplicates: self.duplicates.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            acceptance_rate: if total > 0 {
                accepted as f64 / total as f64
            } else {
                0.0
            },
            last_submission_at: *self.last_submission_at.read(),
            uptime_seconds: (Utc::now() - self.start_time).num_seconds(),
        }
    }
}
