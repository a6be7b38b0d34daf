//! Principal normalization
//!
//! Hosts hand over principals whose names may still carry a type qualifier
//! (`"User:bdoe"`). The directory only knows bare account names, so every
//! request passes through [`resolve`] before any lookup.

use crate::error::{AuthzError, Result};
use crate::types::{Principal, PrincipalType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bare account name suitable for directory lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Create an account name directly, bypassing principal resolution
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The account name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a host-supplied principal into a bare account name.
///
/// Strips a `"User:"` qualifier embedded in the name. Anonymous principals,
/// unrecognized qualifiers, and empty names are rejected with
/// [`AuthzError::InvalidPrincipal`]. No directory interaction happens here.
pub fn resolve(principal: &Principal) -> Result<AccountName> {
    if principal.principal_type == PrincipalType::Anonymous {
        return Err(AuthzError::InvalidPrincipal(
            "anonymous principals cannot be resolved to an account".to_string(),
        ));
    }

    let name = principal.name.trim();

    let account = match name.split_once(':') {
        Some(("User", rest)) => rest,
        Some((qualifier, _)) => {
            return Err(AuthzError::InvalidPrincipal(format!(
                "unrecognized principal qualifier '{qualifier}'"
            )));
        }
        None => name,
    };

    if account.is_empty() {
        return Err(AuthzError::InvalidPrincipal(
            "empty principal name".to_string(),
        ));
    }

    Ok(AccountName(account.to_string()))
}
