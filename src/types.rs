//! Core authorization types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group name as reported by the directory service
pub type GroupName = String;

/// Principal type (who is making the request)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalType {
    /// An authenticated user account
    User,
    /// An unauthenticated caller
    Anonymous,
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrincipalType::User => write!(f, "User"),
            PrincipalType::Anonymous => write!(f, "Anonymous"),
        }
    }
}

/// Identity making an authorization request, supplied by the host per call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Principal type
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,

    /// Principal name, possibly carrying a type qualifier (e.g. "User:bdoe")
    pub name: String,
}

impl Principal {
    /// Create a user principal
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            principal_type: PrincipalType::User,
            name: name.into(),
        }
    }

    /// Create an anonymous principal
    pub fn anonymous() -> Self {
        Self {
            principal_type: PrincipalType::Anonymous,
            name: String::new(),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.principal_type, self.name)
    }
}

/// Directory group named by an access-control entry.
///
/// Entries grant permissions to groups, never to individual users. Keeping
/// this a separate type from [`Principal`] makes it impossible to match an
/// entry against a literal user name by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupPrincipal(String);

impl GroupPrincipal {
    /// Create a group principal from a directory group name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The group name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupPrincipal {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for GroupPrincipal {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for GroupPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operation requested against a resource.
///
/// Matching is exact equality only; `All` is a distinct literal, not a
/// wildcard that implies the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclOperation {
    Read,
    Write,
    Create,
    Delete,
    Alter,
    Describe,
    ClusterAction,
    DescribeConfigs,
    AlterConfigs,
    IdempotentWrite,
    All,
}

/// Permission carried by an access-control entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AclPermission {
    /// Grant the operation
    Allow,
    /// Refuse the operation
    Deny,
}

/// Access-control entry granting or denying an operation to a named group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclEntry {
    /// Group the entry applies to
    pub principal: GroupPrincipal,

    /// Allow or deny
    pub permission: AclPermission,

    /// Resource pattern, carried verbatim (hosts pass "*")
    pub resource_pattern: String,

    /// Operation the entry covers
    pub operation: AclOperation,
}

impl AclEntry {
    /// Create an allow entry for a group with the wildcard resource pattern
    pub fn allow(group: impl Into<GroupPrincipal>, operation: AclOperation) -> Self {
        Self {
            principal: group.into(),
            permission: AclPermission::Allow,
            resource_pattern: "*".to_string(),
            operation,
        }
    }

    /// Create a deny entry for a group with the wildcard resource pattern
    pub fn deny(group: impl Into<GroupPrincipal>, operation: AclOperation) -> Self {
        Self {
            principal: group.into(),
            permission: AclPermission::Deny,
            resource_pattern: "*".to_string(),
            operation,
        }
    }
}
