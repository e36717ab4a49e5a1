//! Fire Button cookie preservation.
//!
//! A Fire Button clear wipes the browser's cookie store but must keep a
//! small, fixed set of first-party cookies (search settings, pending survey
//! answers). This module snapshots those cookies, runs the bulk removal,
//! and writes them back one acknowledged write at a time.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookiePreserver`] | Runs the flush → snapshot → clear → restore → flush cycle |
//! | [`AllowList`] | Ordered domains whose cookies survive a clear |
//! | [`DomainSnapshot`] | Cookies captured for one cycle |
//! | [`RemoveCookiesStrategy`] | Opaque bulk removal step |
//! | [`bridge`] | Turns callback-acknowledged writes into awaitable ones |
//!
//! # Example
//!
//! ```rust
//! use firecookies::cookies::monster::CookieMonster;
//! use firecookies::cookies::store::CookieStore;
//! use firecookies::fire::{CookiePreserver, RemoveAllCookies};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let jar = Arc::new(CookieMonster::new());
//! jar.set_raw_cookie("https://duckduckgo.com", "ae=d");
//! jar.set_raw_cookie("https://tracker.example", "id=42");
//!
//! let store: Arc<dyn CookieStore> = jar.clone();
//! let preserver = CookiePreserver::new(store.clone(), Arc::new(RemoveAllCookies::new(store)));
//! preserver.remove_external_cookies().await;
//!
//! assert_eq!(jar.get("https://duckduckgo.com").as_deref(), Some("ae=d"));
//! assert_eq!(jar.get("https://tracker.example"), None);
//! # }
//! ```

pub mod allowlist;
pub mod bridge;
pub mod config;
pub mod preserver;
pub mod remove;
pub mod report;
pub mod snapshot;

pub use allowlist::{AllowList, DEFAULT_COOKIE_DOMAINS};
pub use bridge::WriteAck;
pub use config::PreserverConfig;
pub use preserver::{CookiePreserver, FireCookieManager};
pub use remove::{RemoveAllCookies, RemoveCookiesExcept, RemoveCookiesStrategy};
pub use report::ClearReport;
pub use snapshot::DomainSnapshot;
