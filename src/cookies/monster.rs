use crate::base::storeerror::StoreError;
use crate::cookies::persistence;
use crate::cookies::rawcookie::RawCookie;
use crate::cookies::store::{CookieStore, SetCookieCallback};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
const MAX_COOKIES_TOTAL: usize = 3000;

/// In-memory cookie store keyed by host.
/// Modeled after Chromium's `net::CookieMonster`, reduced to the raw
/// header contract of [`CookieStore`].
pub struct CookieMonster {
    // Store: Map<Host, List<Cookie>> in insertion order.
    store: Arc<DashMap<String, Vec<RawCookie>>>,
    persist_path: Option<PathBuf>,
    flushes: AtomicUsize,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            persist_path: None,
            flushes: AtomicUsize::new(0),
        }
    }

    /// A store that writes itself to `path` on every [`flush`](CookieStore::flush).
    /// Existing file contents are ignored; use [`CookieMonster::open`] to load them.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Self {
        Self {
            persist_path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Load the store persisted at `path`, or start empty if the file does
    /// not exist yet. Later flushes write back to the same file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let monster = if path.exists() {
            persistence::load_cookies(path)?
        } else {
            Self::new()
        };
        Ok(Self {
            persist_path: Some(path.to_path_buf()),
            ..monster
        })
    }

    /// Normalize a domain identifier into a store key.
    ///
    /// URLs are keyed by their host; anything else is treated as a bare
    /// hostname. Returns `None` for identifiers with no usable host.
    pub fn domain_key(domain: &str) -> Option<String> {
        let domain = domain.trim();
        if let Ok(url) = Url::parse(domain) {
            if let Some(host) = url.host_str() {
                return Some(host.to_lowercase());
            }
        }

        let host = domain.trim_start_matches('.').to_lowercase();
        if host.is_empty() || host.contains(['/', ' ', ';']) {
            return None;
        }
        Some(host)
    }

    /// Parse `raw` and store it for `domain`. Returns whether it was stored.
    pub fn set_raw_cookie(&self, domain: &str, raw: &str) -> bool {
        let Some(key) = Self::domain_key(domain) else {
            tracing::debug!(domain = %domain, "rejecting cookie for invalid domain");
            return false;
        };
        let Some(cookie) = RawCookie::parse(raw) else {
            tracing::debug!(domain = %key, "rejecting unparseable cookie");
            return false;
        };

        self.insert(key, cookie);
        true
    }

    fn insert(&self, key: String, cookie: RawCookie) {
        let mut entry = self.store.entry(key).or_default();

        // Same name replaces in place so header order stays stable.
        if let Some(existing) = entry.iter_mut().find(|c| c.name == cookie.name) {
            *existing = cookie;
            return;
        }

        // Enforce per-domain limit with LRU eviction
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                entry.remove(oldest_idx);
            } else {
                break;
            }
        }

        entry.push(cookie);
        drop(entry); // Release lock before checking global count

        self.enforce_global_limit();
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, time::OffsetDateTime)> = None;

            for entry in self.store.iter() {
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let older = oldest
                        .as_ref()
                        .map_or(true, |(_, _, t)| cookie.creation_time < *t);
                    if older {
                        oldest = Some((entry.key().clone(), idx, cookie.creation_time));
                    }
                }
            }

            let Some((domain, idx, _)) = oldest else {
                break;
            };
            if let Some(mut entry) = self.store.get_mut(&domain) {
                if idx < entry.len() {
                    entry.remove(idx);
                }
            }
        }
    }

    /// Cookies held for `domain`, in insertion order.
    pub fn cookies_for(&self, domain: &str) -> Vec<RawCookie> {
        Self::domain_key(domain)
            .and_then(|key| self.store.get(&key).map(|e| e.value().clone()))
            .unwrap_or_default()
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Drop every domain for which `keep` returns false.
    /// `keep` receives normalized store keys.
    pub fn retain_domains(&self, mut keep: impl FnMut(&str) -> bool) {
        self.store.retain(|domain, _| keep(domain.as_str()));
    }

    /// Number of flushes observed since creation.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Snapshot of all domains and their cookies (for persistence).
    pub(crate) fn domains(&self) -> Vec<(String, Vec<RawCookie>)> {
        self.store
            .iter()
            .filter(|e| !e.value().is_empty())
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    pub(crate) fn load_domain(&self, key: String, cookies: Vec<RawCookie>) {
        for cookie in cookies {
            self.insert(key.clone(), cookie);
        }
    }

    fn complete(on_complete: SetCookieCallback, success: bool) {
        // Platform stores acknowledge writes off the caller's stack.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { on_complete(success) });
            }
            Err(_) => on_complete(success),
        }
    }
}

impl CookieStore for CookieMonster {
    fn get(&self, domain: &str) -> Option<String> {
        let key = Self::domain_key(domain)?;
        let entry = self.store.get(&key)?;
        if entry.is_empty() {
            return None;
        }
        let pairs: Vec<String> = entry.iter().map(RawCookie::pair).collect();
        Some(pairs.join("; "))
    }

    fn set_cookie(&self, domain: &str, cookie: &str, on_complete: SetCookieCallback) {
        let stored = self.set_raw_cookie(domain, cookie);
        Self::complete(on_complete, stored);
    }

    fn has_cookies(&self) -> bool {
        self.store.iter().any(|e| !e.value().is_empty())
    }

    fn remove_all(&self) {
        self.store.clear();
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        if let Some(path) = &self.persist_path {
            if let Err(e) = persistence::save_cookies(self, path) {
                tracing::warn!(error = %e, "failed to persist cookie store");
            }
        }
    }
}

impl std::fmt::Debug for CookieMonster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieMonster")
            .field("domains", &self.store.len())
            .field("persist_path", &self.persist_path)
            .field("flushes", &self.flush_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn set(jar: &CookieMonster, domain: &str, cookie: &str) -> bool {
        // No runtime here, so the callback fires inline.
        let (tx, rx) = mpsc::channel();
        jar.set_cookie(domain, cookie, Box::new(move |ok| tx.send(ok).unwrap()));
        rx.recv().unwrap()
    }

    #[test]
    fn test_domain_key_normalization() {
        assert_eq!(
            CookieMonster::domain_key("https://DuckDuckGo.com/settings"),
            Some("duckduckgo.com".to_string())
        );
        assert_eq!(
            CookieMonster::domain_key(".Example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(CookieMonster::domain_key(""), None);
        assert_eq!(CookieMonster::domain_key("a b"), None);
    }

    #[test]
    fn test_get_joins_in_insertion_order() {
        let jar = CookieMonster::new();
        assert!(set(&jar, "https://duckduckgo.com", "ae=d"));
        assert!(set(&jar, "https://duckduckgo.com", "s=l; Path=/"));

        assert_eq!(jar.get("duckduckgo.com").as_deref(), Some("ae=d; s=l"));
    }

    #[test]
    fn test_same_name_replaces_in_place() {
        let jar = CookieMonster::new();
        set(&jar, "example.com", "a=1");
        set(&jar, "example.com", "b=2");
        set(&jar, "example.com", "a=3");

        assert_eq!(jar.get("example.com").as_deref(), Some("a=3; b=2"));
        assert_eq!(jar.total_cookie_count(), 2);
    }

    #[test]
    fn test_unparseable_cookie_reports_failure() {
        let jar = CookieMonster::new();
        assert!(!set(&jar, "example.com", "garbage"));
        assert!(!set(&jar, "", "a=1"));
        assert!(!jar.has_cookies());
        assert_eq!(jar.get("example.com"), None);
    }

    #[test]
    fn test_per_domain_limit_evicts_oldest() {
        let jar = CookieMonster::new();
        for i in 0..(MAX_COOKIES_PER_DOMAIN + 5) {
            jar.set_raw_cookie("example.com", &format!("c{}=v", i));
        }
        let cookies = jar.cookies_for("example.com");
        assert_eq!(cookies.len(), MAX_COOKIES_PER_DOMAIN);
        assert!(cookies.iter().any(|c| c.name == "c54"));
    }

    #[test]
    fn test_remove_all_and_has_cookies() {
        let jar = CookieMonster::new();
        set(&jar, "a.com", "x=1");
        set(&jar, "b.com", "y=2");
        assert!(jar.has_cookies());

        jar.remove_all();
        assert!(!jar.has_cookies());
        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_retain_domains() {
        let jar = CookieMonster::new();
        set(&jar, "keep.com", "x=1");
        set(&jar, "drop.com", "y=2");

        jar.retain_domains(|d| d == "keep.com");
        assert_eq!(jar.get("keep.com").as_deref(), Some("x=1"));
        assert_eq!(jar.get("drop.com"), None);
    }

    #[test]
    fn test_flush_without_persistence_counts() {
        let jar = CookieMonster::new();
        jar.flush();
        jar.flush();
        assert_eq!(jar.flush_count(), 2);
    }

    #[tokio::test]
    async fn test_callback_dispatched_on_runtime() {
        let jar = CookieMonster::new();
        let (tx, rx) = tokio::sync::oneshot::channel();
        jar.set_cookie("example.com", "a=1", Box::new(move |ok| {
            let _ = tx.send(ok);
        }));
        assert!(rx.await.unwrap());
        assert_eq!(jar.get("example.com").as_deref(), Some("a=1"));
    }
}
