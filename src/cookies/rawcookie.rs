use cookie::Cookie;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A cookie as held by [`CookieMonster`](crate::cookies::monster::CookieMonster).
///
/// Only the name/value pair of a raw cookie string is kept. Attributes such
/// as `Path` or `Expires` are accepted on input and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCookie {
    pub name: String,
    pub value: String,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

impl RawCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            creation_time: OffsetDateTime::now_utc(),
        }
    }

    /// Parse a raw `Set-Cookie`-style string. Returns `None` if the string
    /// has no `name=value` pair.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = Cookie::parse(raw).ok()?;
        Some(Self::new(parsed.name(), parsed.value()))
    }

    /// The `name=value` form returned to readers of the store.
    pub fn pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}
