//! Directory service clients
//!
//! Group membership is an external-service call with variable latency and
//! partial-failure modes, so it sits behind the [`DirectoryClient`]
//! capability trait. The engine and matcher are exercised against
//! [`InMemoryDirectory`] in tests; production wires in [`LdapDirectory`].

use crate::config::DirectoryConfig;
use crate::error::{AuthzError, Result};
use crate::resolver::AccountName;
use crate::types::GroupName;
use async_trait::async_trait;
use ldap3::{LdapConnAsync, Scope, SearchEntry};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::debug;

/// Capability to answer "what groups does this account belong to?"
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Complete set of groups the account belongs to at lookup time.
    ///
    /// An account with no memberships yields an empty set. A missing
    /// account entry is [`AuthzError::AccountNotFound`]; connection,
    /// bind, and timeout failures map to the transient variants.
    async fn lookup_groups(&self, account: &AccountName) -> Result<HashSet<GroupName>>;
}

/// LDAP-backed directory client.
///
/// Opens a fresh connection per lookup and binds with the configured
/// service credentials before any search; the directory server is expected
/// to reject anonymous compare-class operations, so no query ever runs on
/// an unauthenticated session. Nothing is cached across lookups.
pub struct LdapDirectory {
    config: DirectoryConfig,
}

impl LdapDirectory {
    /// Create a client from validated configuration
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    async fn query(&self, account: &AccountName) -> Result<HashSet<GroupName>> {
        let (conn, mut ldap) = LdapConnAsync::new(&self.config.url).await.map_err(|e| {
            AuthzError::DirectoryUnavailable(format!(
                "connect to {} failed: {e}",
                self.config.url
            ))
        })?;
        ldap3::drive!(conn);

        ldap.simple_bind(&self.config.bind_dn, &self.config.bind_password)
            .await
            .and_then(|res| res.success())
            .map_err(|e| {
                AuthzError::DirectoryUnavailable(format!(
                    "bind as {} failed: {e}",
                    self.config.bind_dn
                ))
            })?;

        // Membership is only meaningful for an account that exists.
        let account_filter = format!(
            "({}={})",
            self.config.user_attribute,
            ldap3::ldap_escape(account.as_str())
        );
        let (account_entries, _) = ldap
            .search(
                &self.config.user_base_dn,
                Scope::Subtree,
                &account_filter,
                vec!["dn"],
            )
            .await
            .and_then(|res| res.success())
            .map_err(|e| AuthzError::DirectoryUnavailable(format!("account search failed: {e}")))?;

        if account_entries.is_empty() {
            return Err(AuthzError::AccountNotFound(account.to_string()));
        }

        let member_dn = self.config.user_dn(account.as_str());
        let group_filter = format!(
            "({}={})",
            self.config.group_attribute,
            ldap3::ldap_escape(member_dn.as_str())
        );
        let (group_entries, _) = ldap
            .search(
                &self.config.group_base_dn,
                Scope::Subtree,
                &group_filter,
                vec![self.config.group_name_attribute.as_str()],
            )
            .await
            .and_then(|res| res.success())
            .map_err(|e| AuthzError::DirectoryUnavailable(format!("group search failed: {e}")))?;

        let mut groups = HashSet::new();
        for entry in group_entries {
            let entry = SearchEntry::construct(entry);
            if let Some(names) = entry.attrs.get(&self.config.group_name_attribute) {
                groups.extend(names.iter().cloned());
            }
        }

        let _ = ldap.unbind().await;
        Ok(groups)
    }
}

#[async_trait]
impl DirectoryClient for LdapDirectory {
    async fn lookup_groups(&self, account: &AccountName) -> Result<HashSet<GroupName>> {
        let start = Instant::now();

        // The in-flight exchange is abandoned once the deadline passes;
        // the caller retries the whole authorize call if it wants to.
        match tokio::time::timeout(self.config.lookup_timeout(), self.query(account)).await {
            Ok(result) => {
                if let Ok(groups) = &result {
                    debug!(
                        "directory lookup for {} returned {} groups in {:?}",
                        account,
                        groups.len(),
                        start.elapsed()
                    );
                }
                result
            }
            Err(_) => Err(AuthzError::DirectoryTimeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            }),
        }
    }
}

/// Deterministic in-memory directory substitute.
///
/// Tests seed accounts and flip availability to drive the engine through
/// every failure path without a live directory server.
pub struct InMemoryDirectory {
    accounts: Arc<RwLock<HashMap<String, HashSet<GroupName>>>>,
    available: Arc<RwLock<bool>>,
}

impl InMemoryDirectory {
    /// Create an empty, available directory
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(RwLock::new(true)),
        }
    }

    /// Add an account with its group memberships
    pub async fn add_account(
        &self,
        account: impl Into<String>,
        groups: impl IntoIterator<Item = impl Into<GroupName>>,
    ) {
        let groups = groups.into_iter().map(Into::into).collect();
        self.accounts.write().await.insert(account.into(), groups);
    }

    /// Simulate the directory going down (or coming back)
    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn lookup_groups(&self, account: &AccountName) -> Result<HashSet<GroupName>> {
        if !*self.available.read().await {
            return Err(AuthzError::DirectoryUnavailable(
                "directory is offline".to_string(),
            ));
        }

        self.accounts
            .read()
            .await
            .get(account.as_str())
            .cloned()
            .ok_or_else(|| AuthzError::AccountNotFound(account.to_string()))
    }
}
