//! # ldap-authz
//!
//! Group-membership-resolving authorization decision engine.
//!
//! Access-control entries grant operations to named directory groups, not
//! to individual users. A decision resolves the requesting principal to a
//! bare account name, asks the directory service which groups that account
//! belongs to right now, and matches the membership set against the
//! entries. Membership in any allowed group suffices; a matching deny
//! entry, or any failure along the way, collapses to deny.
//!
//! The directory sits behind the [`DirectoryClient`] trait:
//! [`LdapDirectory`] binds and searches a real LDAP server, while
//! [`InMemoryDirectory`] gives tests and embedders a deterministic
//! substitute.
//!
//! ## Example
//!
//! ```rust
//! use ldap_authz::{AclEntry, AclOperation, Authorizer, InMemoryDirectory, Principal};
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let directory = Arc::new(InMemoryDirectory::new());
//! directory.add_account("bdoe", ["ktACons"]).await;
//!
//! let entries: HashSet<_> = [AclEntry::allow("ktACons", AclOperation::Read)].into();
//! let authorizer = Authorizer::new(directory);
//!
//! assert!(authorizer.authorize(&Principal::user("bdoe"), AclOperation::Read, &entries).await);
//! assert!(!authorizer.authorize(&Principal::user("adoe"), AclOperation::Read, &entries).await);
//! # }
//! ```

pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod metrics;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use config::DirectoryConfig;
pub use directory::{DirectoryClient, InMemoryDirectory, LdapDirectory};
pub use engine::Authorizer;
pub use error::{AuthzError, Result};
pub use metrics::{DecisionMetrics, MetricsCollector};
pub use resolver::AccountName;
pub use types::{
    AclEntry, AclOperation, AclPermission, GroupName, GroupPrincipal, Principal, PrincipalType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
