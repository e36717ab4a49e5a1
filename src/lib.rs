//! # firecookies
//!
//! Selective cookie preservation for a browser's Fire Button.
//!
//! A Fire Button clear deletes every cookie the browser holds, except for
//! a short allow list of first-party domains whose cookies carry user
//! settings. `firecookies` runs that clear against an opaque platform
//! cookie store whose writes complete through callbacks, turning it into a
//! strictly ordered, awaitable sequence with durability barriers.
//!
//! ## Features
//!
//! - **Clear cycle**: flush, snapshot, conditional bulk removal, sequential restore, flush
//! - **Callback bridge**: one single-shot channel per acknowledged write
//! - **Pluggable stores and removal strategies**: [`CookieStore`](cookies::store::CookieStore),
//!   [`RemoveCookiesStrategy`](fire::RemoveCookiesStrategy)
//! - **Reference store**: in-memory [`CookieMonster`](cookies::monster::CookieMonster)
//!   with JSON persistence on flush
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use firecookies::fire::{CookiePreserver, PreserverConfig, RemoveAllCookies};
//!
//! let config = PreserverConfig::from_file(Path::new("preserver.json"))?;
//! let preserver = CookiePreserver::from_config(
//!     store.clone(),
//!     Arc::new(RemoveAllCookies::new(store)),
//!     &config,
//! )?;
//! let report = preserver.remove_external_cookies().await;
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and clear cycle phases
//! - [`cookies`] - Cookie store contract, in-memory store, persistence
//! - [`fire`] - Allow list, snapshot, callback bridge and the clear cycle

pub mod base;
pub mod cookies;
pub mod fire;
