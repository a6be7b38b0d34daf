//! Authorization engine orchestration

use crate::directory::DirectoryClient;
use crate::matcher;
use crate::metrics::{DecisionMetrics, MetricsCollector};
use crate::resolver;
use crate::types::{AclEntry, AclOperation, Principal};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Group-membership authorization engine.
///
/// Holds the long-lived directory client; everything else is created fresh
/// per call and discarded with the boolean result. Safe under concurrent
/// invocation: calls share nothing mutable beyond the injected client and
/// the metrics counters.
pub struct Authorizer {
    directory: Arc<dyn DirectoryClient>,
    metrics: Arc<MetricsCollector>,
}

impl Authorizer {
    /// Create an engine around an injected directory client
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self {
            directory,
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    /// Decide whether `principal` may perform `operation` under `entries`.
    ///
    /// Pipeline: resolve the principal to an account name, ask the
    /// directory for its groups, match against the entries. Fail-closed:
    /// every resolver or directory failure is reported through the log and
    /// counters and collapses to `false`; the host sees a plain boolean,
    /// never an error. No retries happen inside a call.
    pub async fn authorize(
        &self,
        principal: &Principal,
        operation: AclOperation,
        entries: &HashSet<AclEntry>,
    ) -> bool {
        debug!(
            "authorization request: principal={}, operation={:?}, entries={}",
            principal,
            operation,
            entries.len()
        );

        let account = match resolver::resolve(principal) {
            Ok(account) => account,
            Err(e) => {
                warn!("DENY {}: {}", principal, e);
                self.metrics.record_failure(&e).await;
                return false;
            }
        };

        let account_groups = match self.directory.lookup_groups(&account).await {
            Ok(groups) => groups,
            Err(e) if e.is_transient() => {
                // Outage, not policy. Logged distinctly so operators can
                // tell this deny apart from a membership miss.
                warn!("DENY {} for {:?}: directory failure: {}", account, operation, e);
                self.metrics.record_failure(&e).await;
                return false;
            }
            Err(e) => {
                warn!("DENY {} for {:?}: {}", account, operation, e);
                self.metrics.record_failure(&e).await;
                return false;
            }
        };

        debug!(
            "account {} belongs to {} groups",
            account,
            account_groups.len()
        );

        let allowed = matcher::decide(&account_groups, entries, operation);
        if allowed {
            info!("ALLOW {} for {:?}", account, operation);
            self.metrics.record_allowed().await;
        } else {
            info!("DENY {} for {:?}: no allowed group matched", account, operation);
            self.metrics.record_denied().await;
        }

        allowed
    }

    /// Snapshot of the decision counters, for host-side export
    pub async fn metrics(&self) -> DecisionMetrics {
        self.metrics.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;

    #[tokio::test]
    async fn test_invalid_principal_fails_closed() {
        let directory = Arc::new(InMemoryDirectory::new());
        let authorizer = Authorizer::new(directory);

        let entries = [AclEntry::allow("ktACons", AclOperation::Read)].into();
        let allowed = authorizer
            .authorize(&Principal::anonymous(), AclOperation::Read, &entries)
            .await;

        assert!(!allowed);
        let metrics = authorizer.metrics().await;
        assert_eq!(metrics.denied_by_failure, 1);
        assert_eq!(metrics.invalid_principals, 1);
    }

    #[tokio::test]
    async fn test_qualified_principal_resolves_before_lookup() {
        let directory = Arc::new(InMemoryDirectory::new());
        directory.add_account("bdoe", ["ktACons"]).await;
        let authorizer = Authorizer::new(directory);

        let entries = [AclEntry::allow("ktACons", AclOperation::Read)].into();
        assert!(
            authorizer
                .authorize(&Principal::user("User:bdoe"), AclOperation::Read, &entries)
                .await
        );
    }
}
