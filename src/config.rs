//! Directory connection configuration loading and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Connection and query settings for the directory service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Directory server URL, e.g. "ldap://directory.example.com:389"
    pub url: String,

    /// Distinguished name used for the service bind
    pub bind_dn: String,

    /// Password for the service bind
    pub bind_password: String,

    /// Base DN under which user entries live
    pub user_base_dn: String,

    /// Attribute naming a user entry (combined with the user base DN to
    /// form the account's distinguished name)
    #[serde(default = "default_user_attribute")]
    pub user_attribute: String,

    /// Base DN under which group entries live
    pub group_base_dn: String,

    /// Group attribute holding member DNs
    #[serde(default = "default_group_attribute")]
    pub group_attribute: String,

    /// Attribute holding a group's name
    #[serde(default = "default_group_name_attribute")]
    pub group_name_attribute: String,

    /// Per-lookup timeout in milliseconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_ms: u64,
}

fn default_user_attribute() -> String {
    "uid".to_string()
}
fn default_group_attribute() -> String {
    "member".to_string()
}
fn default_group_name_attribute() -> String {
    "cn".to_string()
}
fn default_lookup_timeout() -> u64 {
    3_000
}

impl DirectoryConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .context("Failed to read directory configuration file")?;

        let config: DirectoryConfig =
            toml::from_str(&contents).context("Failed to parse directory configuration file")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            anyhow::bail!("Directory URL must not be empty");
        }

        if self.bind_dn.is_empty() {
            anyhow::bail!("Bind DN must not be empty; anonymous binds are not supported");
        }

        if self.user_base_dn.is_empty() || self.group_base_dn.is_empty() {
            anyhow::bail!("User and group base DNs must not be empty");
        }

        if self.lookup_timeout_ms == 0 {
            anyhow::bail!("Lookup timeout must be greater than zero");
        }

        Ok(())
    }

    /// Per-lookup timeout as a [`Duration`]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Distinguished name of an account under the user base DN
    pub(crate) fn user_dn(&self, account: &str) -> String {
        format!("{}={},{}", self.user_attribute, account, self.user_base_dn)
    }
}
