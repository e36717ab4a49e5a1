//! Clear cycle configuration.
//!
//! Loaded once at process start, typically from a JSON file:
//!
//! ```json
//! {
//!   "allow_list": ["https://duckduckgo.com", "https://surveys.duckduckgo.com"],
//!   "ack_timeout_ms": 5000
//! }
//! ```

use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use crate::fire::allowlist::{AllowList, DEFAULT_COOKIE_DOMAINS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration options for [`CookiePreserver`](crate::fire::preserver::CookiePreserver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreserverConfig {
    /// Domains restored after every clear, in restore order.
    pub allow_list: Vec<String>,

    /// Upper bound on waiting for one restore write to be acknowledged.
    /// `None` waits indefinitely.
    #[serde(rename = "ack_timeout_ms", with = "millis")]
    pub ack_timeout: Option<Duration>,
}

impl Default for PreserverConfig {
    fn default() -> Self {
        Self {
            allow_list: DEFAULT_COOKIE_DOMAINS.iter().map(|d| d.to_string()).collect(),
            ack_timeout: None,
        }
    }
}

impl PreserverConfig {
    pub fn with_allow_list<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = Some(timeout);
        self
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).path_context(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.ack_timeout == Some(Duration::ZERO) {
            return Err(StoreError::invalid_config(
                "ack_timeout_ms must be greater than zero",
            ));
        }
        self.resolve_allow_list().map(|_| ())
    }

    /// Build the immutable allow list from the configured domains.
    pub fn resolve_allow_list(&self) -> Result<AllowList, StoreError> {
        AllowList::new(&self.allow_list)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
