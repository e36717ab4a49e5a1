//! The Fire Button clear cycle.
//!
//! [`CookiePreserver::remove_external_cookies`] runs, in strict order:
//!
//! 1. a flush barrier, so earlier writes are durable before anything is read;
//! 2. a [`DomainSnapshot`] of every allow-listed domain;
//! 3. the bulk removal, only if the store holds any cookie at all;
//! 4. the restore of every snapshotted cookie, one acknowledged write at a
//!    time, in allow list order and then header order;
//! 5. a second flush barrier, issued on every branch.
//!
//! Restore writes are best-effort. A rejected, abandoned or timed-out write
//! is logged and the loop moves on; nothing is retried.
//!
//! # Concurrency
//!
//! The preserver takes no lock. Callers must not run two cycles at once,
//! nor write cookies while a cycle is in flight, or the restored state may
//! not match the snapshot.

use crate::base::clearstate::ClearPhase;
use crate::base::storeerror::StoreError;
use crate::cookies::store::CookieStore;
use crate::fire::allowlist::AllowList;
use crate::fire::bridge::{set_cookie_acknowledged, WriteAck};
use crate::fire::config::PreserverConfig;
use crate::fire::remove::RemoveCookiesStrategy;
use crate::fire::report::ClearReport;
use crate::fire::snapshot::DomainSnapshot;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Alias for the `Future` type returned by a clear cycle.
pub type Clearing<'a> = Pin<Box<dyn Future<Output = ClearReport> + Send + 'a>>;

/// The surface a Fire Button trigger holds on to.
pub trait FireCookieManager: Send + Sync {
    /// Run one full clear cycle. Resolves after the final flush.
    fn remove_external_cookies(&self) -> Clearing<'_>;

    /// Make all completed cookie writes durable.
    fn flush(&self);
}

/// Preserves allow-listed cookies across a bulk cookie clear.
pub struct CookiePreserver {
    store: Arc<dyn CookieStore>,
    remover: Arc<dyn RemoveCookiesStrategy>,
    allow_list: AllowList,
    ack_timeout: Option<Duration>,
    phase: AtomicU8,
}

impl CookiePreserver {
    /// A preserver over the default allow list that waits indefinitely for
    /// write acknowledgments.
    pub fn new(store: Arc<dyn CookieStore>, remover: Arc<dyn RemoveCookiesStrategy>) -> Self {
        Self {
            store,
            remover,
            allow_list: AllowList::default(),
            ack_timeout: None,
            phase: AtomicU8::new(ClearPhase::Idle.as_u8()),
        }
    }

    pub fn from_config(
        store: Arc<dyn CookieStore>,
        remover: Arc<dyn RemoveCookiesStrategy>,
        config: &PreserverConfig,
    ) -> Result<Self, StoreError> {
        config.validate()?;
        let mut preserver = Self::new(store, remover).with_allow_list(config.resolve_allow_list()?);
        preserver.ack_timeout = config.ack_timeout;
        Ok(preserver)
    }

    pub fn with_allow_list(mut self, allow_list: AllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = Some(timeout);
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Step the current cycle is in, or [`ClearPhase::Idle`].
    pub fn phase(&self) -> ClearPhase {
        ClearPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Run one clear cycle, preserving allow-listed cookies.
    ///
    /// Dropping the returned future mid-cycle leaves the store in whatever
    /// state it reached; nothing is rolled back.
    pub async fn remove_external_cookies(&self) -> ClearReport {
        if self.phase().is_active() {
            tracing::warn!(phase = ?self.phase(), "clear cycle started while another is in flight");
        }
        let phase = PhaseGuard::new(&self.phase);
        let mut report = ClearReport::default();

        phase.enter(ClearPhase::FlushingBeforeSnapshot);
        self.flush_barrier().await;

        phase.enter(ClearPhase::Snapshotting);
        let snapshot = self.snapshot().await;
        report.snapshot = snapshot
            .iter()
            .map(|(domain, cookies)| (domain.to_string(), cookies.len()))
            .collect();

        if self.store.has_cookies() {
            phase.enter(ClearPhase::Clearing);
            self.remover.remove_cookies().await;
            report.cleared = true;

            phase.enter(ClearPhase::Restoring);
            self.restore(&snapshot, &mut report).await;
        } else {
            tracing::debug!("cookie store empty, skipping removal");
        }

        phase.enter(ClearPhase::FlushingAfterRestore);
        self.flush_barrier().await;

        tracing::debug!(
            cleared = report.cleared,
            restored = report.restored,
            failed = report.failed(),
            "clear cycle complete"
        );
        report
    }

    /// Synchronous pass-through to the store's durability barrier.
    pub fn flush(&self) {
        self.store.flush();
    }

    async fn flush_barrier(&self) {
        let store = self.store.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || store.flush()).await {
            tracing::error!(error = %e, "cookie flush task failed");
        }
    }

    async fn snapshot(&self) -> DomainSnapshot {
        let store = self.store.clone();
        let allow_list = self.allow_list.clone();
        let captured =
            tokio::task::spawn_blocking(move || DomainSnapshot::capture(&*store, &allow_list))
                .await;

        match captured {
            Ok(snapshot) => {
                tracing::debug!(
                    domains = self.allow_list.len(),
                    cookies = snapshot.cookie_count(),
                    "captured allow-listed cookies"
                );
                snapshot
            }
            Err(e) => {
                tracing::error!(error = %e, "cookie snapshot task failed");
                DomainSnapshot::default()
            }
        }
    }

    async fn restore(&self, snapshot: &DomainSnapshot, report: &mut ClearReport) {
        for (domain, cookies) in snapshot.iter() {
            debug_assert!(self.allow_list.contains(domain));

            for cookie in cookies {
                tracing::trace!(domain = %domain, cookie = %cookie, "restoring cookie");
                let ack =
                    set_cookie_acknowledged(self.store.as_ref(), domain, cookie, self.ack_timeout)
                        .await;

                match ack {
                    WriteAck::Stored => tracing::trace!(domain = %domain, "cookie restored"),
                    failed => tracing::warn!(
                        domain = %domain,
                        ack = ?failed,
                        "cookie restore not acknowledged"
                    ),
                }
                report.record(ack);
            }

            if !cookies.is_empty() {
                tracing::debug!(domain = %domain, count = cookies.len(), "restored domain cookies");
            }
        }
    }
}

impl FireCookieManager for CookiePreserver {
    fn remove_external_cookies(&self) -> Clearing<'_> {
        Box::pin(CookiePreserver::remove_external_cookies(self))
    }

    fn flush(&self) {
        CookiePreserver::flush(self)
    }
}

impl std::fmt::Debug for CookiePreserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookiePreserver")
            .field("allow_list", &self.allow_list)
            .field("ack_timeout", &self.ack_timeout)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

/// Publishes the current phase; resets to idle when the cycle ends or is dropped.
struct PhaseGuard<'a> {
    phase: &'a AtomicU8,
}

impl<'a> PhaseGuard<'a> {
    fn new(phase: &'a AtomicU8) -> Self {
        Self { phase }
    }

    fn enter(&self, next: ClearPhase) {
        self.phase.store(next.as_u8(), Ordering::Release);
        tracing::trace!(phase = ?next, "clear phase");
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.store(ClearPhase::Idle.as_u8(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::monster::CookieMonster;
    use crate::fire::remove::RemoveAllCookies;

    fn preserver_over(jar: &Arc<CookieMonster>) -> CookiePreserver {
        let store: Arc<dyn CookieStore> = jar.clone();
        let remover = Arc::new(RemoveAllCookies::new(store.clone()));
        CookiePreserver::new(store, remover)
    }

    #[tokio::test]
    async fn test_preserves_default_domains() {
        let jar = Arc::new(CookieMonster::new());
        jar.set_raw_cookie("https://duckduckgo.com", "ae=d");
        jar.set_raw_cookie("https://duckduckgo.com", "s=l");
        jar.set_raw_cookie("https://surveys.duckduckgo.com", "survey=1");
        jar.set_raw_cookie("https://tracker.example", "id=42");

        let report = preserver_over(&jar).remove_external_cookies().await;

        assert!(report.cleared);
        assert_eq!(report.restored, 3);
        assert_eq!(jar.get("https://duckduckgo.com").as_deref(), Some("ae=d; s=l"));
        assert_eq!(
            jar.get("https://surveys.duckduckgo.com").as_deref(),
            Some("survey=1")
        );
        assert_eq!(jar.get("https://tracker.example"), None);
        assert_eq!(jar.flush_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_store_skips_clear_but_flushes() {
        let jar = Arc::new(CookieMonster::new());
        let report = preserver_over(&jar).remove_external_cookies().await;

        assert!(!report.cleared);
        assert_eq!(report.attempted(), 0);
        assert_eq!(jar.flush_count(), 2);
    }

    #[tokio::test]
    async fn test_phase_returns_to_idle() {
        let jar = Arc::new(CookieMonster::new());
        jar.set_raw_cookie("a.com", "x=1");
        let preserver = preserver_over(&jar);

        assert_eq!(preserver.phase(), ClearPhase::Idle);
        preserver.remove_external_cookies().await;
        assert_eq!(preserver.phase(), ClearPhase::Idle);
    }

    #[tokio::test]
    async fn test_from_config_applies_allow_list() {
        let jar = Arc::new(CookieMonster::new());
        jar.set_raw_cookie("keep.com", "k=1");
        jar.set_raw_cookie("https://duckduckgo.com", "ae=d");

        let store: Arc<dyn CookieStore> = jar.clone();
        let remover = Arc::new(RemoveAllCookies::new(store.clone()));
        let config = PreserverConfig::default().with_allow_list(["keep.com"]);
        let preserver = CookiePreserver::from_config(store, remover, &config).unwrap();

        preserver.remove_external_cookies().await;

        assert_eq!(jar.get("keep.com").as_deref(), Some("k=1"));
        assert_eq!(jar.get("https://duckduckgo.com"), None);
    }

    #[tokio::test]
    async fn test_trait_object_runs_cycle() {
        let jar = Arc::new(CookieMonster::new());
        jar.set_raw_cookie("https://duckduckgo.com", "ae=d");

        let manager: Arc<dyn FireCookieManager> = Arc::new(preserver_over(&jar));
        let report = manager.remove_external_cookies().await;
        manager.flush();

        assert_eq!(report.restored, 1);
        assert_eq!(jar.flush_count(), 3);
    }
}
