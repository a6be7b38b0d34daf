//! Decision counters for operator-facing observability
//!
//! Fail-closed means the host only ever sees a boolean, so these counters
//! are how an operator tells "denied by policy" apart from "denied because
//! the directory was unreachable".

use crate::error::AuthzError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot of authorization decision counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionMetrics {
    /// Total number of authorize calls
    pub total_requests: u64,

    /// Decisions that allowed the operation
    pub allowed: u64,

    /// Decisions denied by policy (no matching allow entry, or a deny matched)
    pub denied_by_policy: u64,

    /// Decisions denied because resolution or lookup failed
    pub denied_by_failure: u64,

    /// Malformed principals
    pub invalid_principals: u64,

    /// Accounts with no directory entry
    pub accounts_not_found: u64,

    /// Connect or bind failures
    pub directory_unavailable: u64,

    /// Lookups that hit the configured timeout
    pub directory_timeouts: u64,
}

impl DecisionMetrics {
    /// Fraction of requests that were allowed
    pub fn allow_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.allowed as f64 / self.total_requests as f64
        }
    }
}

/// Metrics collector shared by concurrent authorize calls
pub struct MetricsCollector {
    metrics: Arc<RwLock<DecisionMetrics>>,
}

impl MetricsCollector {
    /// Create a collector with zeroed counters
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(DecisionMetrics::default())),
        }
    }

    /// Record an allow decision
    pub async fn record_allowed(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.total_requests += 1;
        metrics.allowed += 1;
    }

    /// Record a policy deny (the matcher said no)
    pub async fn record_denied(&self) {
        let mut metrics = self.metrics.write().await;
        metrics.total_requests += 1;
        metrics.denied_by_policy += 1;
    }

    /// Record a fail-closed deny, classified by failure kind
    pub async fn record_failure(&self, error: &AuthzError) {
        let mut metrics = self.metrics.write().await;
        metrics.total_requests += 1;
        metrics.denied_by_failure += 1;

        match error {
            AuthzError::InvalidPrincipal(_) => metrics.invalid_principals += 1,
            AuthzError::AccountNotFound(_) => metrics.accounts_not_found += 1,
            AuthzError::DirectoryUnavailable(_) => metrics.directory_unavailable += 1,
            AuthzError::DirectoryTimeout { .. } => metrics.directory_timeouts += 1,
        }
    }

    /// Snapshot the current counters
    pub async fn snapshot(&self) -> DecisionMetrics {
        self.metrics.read().await.clone()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decision_counters() {
        let collector = MetricsCollector::new();
        collector.record_allowed().await;
        collector.record_allowed().await;
        collector.record_denied().await;

        let snapshot = collector.snapshot().await;
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.allowed, 2);
        assert_eq!(snapshot.denied_by_policy, 1);
        assert!((snapshot.allow_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_failure_classification() {
        let collector = MetricsCollector::new();
        collector
            .record_failure(&AuthzError::DirectoryUnavailable("down".into()))
            .await;
        collector
            .record_failure(&AuthzError::DirectoryTimeout { elapsed_ms: 3000 })
            .await;
        collector
            .record_failure(&AuthzError::AccountNotFound("zdoe".into()))
            .await;

        let snapshot = collector.snapshot().await;
        assert_eq!(snapshot.denied_by_failure, 3);
        assert_eq!(snapshot.directory_unavailable, 1);
        assert_eq!(snapshot.directory_timeouts, 1);
        assert_eq!(snapshot.accounts_not_found, 1);
        assert_eq!(snapshot.allowed, 0);
    }

    #[test]
    fn test_allow_rate_with_no_requests() {
        assert_eq!(DecisionMetrics::default().allow_rate(), 0.0);
    }
}
