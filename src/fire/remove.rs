//! Bulk cookie removal strategies.
//!
//! A [`RemoveCookiesStrategy`] is the destructive step of a Fire Button
//! clear. It reports nothing back: the preserver makes no assumption about
//! which domains survive it.

use crate::cookies::monster::CookieMonster;
use crate::cookies::store::CookieStore;
use std::{future::Future, pin::Pin, sync::Arc};

/// Alias for the `Future` type returned by a removal strategy.
pub type Removing<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Trait for bulk cookie removal.
pub trait RemoveCookiesStrategy: Send + Sync {
    fn remove_cookies(&self) -> Removing<'_>;
}

/// Blanket implementation for Arc-wrapped strategies.
impl<R: RemoveCookiesStrategy + ?Sized> RemoveCookiesStrategy for Arc<R> {
    fn remove_cookies(&self) -> Removing<'_> {
        (**self).remove_cookies()
    }
}

/// Removes every cookie through [`CookieStore::remove_all`].
///
/// The store call runs in `tokio::task::spawn_blocking`, since platform
/// stores typically delete from disk.
#[derive(Clone)]
pub struct RemoveAllCookies {
    store: Arc<dyn CookieStore>,
}

impl RemoveAllCookies {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }
}

impl RemoveCookiesStrategy for RemoveAllCookies {
    fn remove_cookies(&self) -> Removing<'_> {
        let store = self.store.clone();
        Box::pin(async move {
            if let Err(e) = tokio::task::spawn_blocking(move || store.remove_all()).await {
                tracing::error!(error = %e, "bulk cookie removal task failed");
            }
        })
    }
}

impl std::fmt::Debug for RemoveAllCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoveAllCookies").finish_non_exhaustive()
    }
}

/// Removes every domain from a [`CookieMonster`] except fireproofed ones.
///
/// Fireproofed domains are a user choice and unrelated to the allow list.
#[derive(Debug, Clone)]
pub struct RemoveCookiesExcept {
    jar: Arc<CookieMonster>,
    fireproof: Arc<[String]>,
}

impl RemoveCookiesExcept {
    /// Domain identifiers with no usable host are ignored.
    pub fn new<I, S>(jar: Arc<CookieMonster>, fireproof: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fireproof = fireproof
            .into_iter()
            .filter_map(|d| CookieMonster::domain_key(d.as_ref()))
            .collect();
        Self { jar, fireproof }
    }
}

impl RemoveCookiesStrategy for RemoveCookiesExcept {
    fn remove_cookies(&self) -> Removing<'_> {
        Box::pin(async move {
            let before = self.jar.total_cookie_count();
            self.jar
                .retain_domains(|domain| self.fireproof.iter().any(|f| f == domain));
            tracing::debug!(
                removed = before.saturating_sub(self.jar.total_cookie_count()),
                fireproof = self.fireproof.len(),
                "removed cookies outside fireproofed domains"
            );
        })
    }
}
