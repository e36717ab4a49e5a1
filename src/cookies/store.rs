//! The platform cookie store contract.
//!
//! A [`CookieStore`] is a process-wide shared resource keyed by domain
//! identifier, holding a raw `name=value; name2=value2` header per domain.
//! Writes complete asynchronously through a callback carrying a success
//! flag; everything else is synchronous from the caller's point of view.

use std::sync::Arc;

/// Completion callback for [`CookieStore::set_cookie`].
///
/// The store must invoke it exactly once. Invoking it more than once is
/// impossible by construction; never invoking it stalls the waiting caller.
pub type SetCookieCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Trait for a platform cookie store.
///
/// Implementations must be thread-safe. Nothing here imposes a locking
/// discipline across calls: callers that need a consistent view over
/// several calls must serialize their own access.
pub trait CookieStore: Send + Sync {
    /// Returns the raw cookie header for `domain`, or `None` if absent.
    fn get(&self, domain: &str) -> Option<String>;

    /// Stores a single raw cookie string for `domain` and reports the
    /// outcome through `on_complete`.
    fn set_cookie(&self, domain: &str, cookie: &str, on_complete: SetCookieCallback);

    /// Whether the store holds at least one cookie for any domain.
    fn has_cookies(&self) -> bool;

    /// Removes every cookie in the store.
    fn remove_all(&self);

    /// Durability barrier: all completed writes are persisted on return.
    fn flush(&self);
}

/// Blanket implementation for Arc-wrapped stores.
impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn get(&self, domain: &str) -> Option<String> {
        (**self).get(domain)
    }

    fn set_cookie(&self, domain: &str, cookie: &str, on_complete: SetCookieCallback) {
        (**self).set_cookie(domain, cookie, on_complete)
    }

    fn has_cookies(&self) -> bool {
        (**self).has_cookies()
    }

    fn remove_all(&self) {
        (**self).remove_all()
    }

    fn flush(&self) {
        (**self).flush()
    }
}
