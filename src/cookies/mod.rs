//! Cookie store contract and the in-memory reference store.
//!
//! - **Contract**: [`CookieStore`](store::CookieStore), the opaque platform store a
//!   Fire Button clear operates on
//! - **Storage**: [`CookieMonster`](monster::CookieMonster), a `DashMap`-backed store
//!   holding raw `name=value` cookies per host
//! - **Persistence**: JSON file written on every flush ([`persistence`])
//!
//! # Example
//!
//! ```rust
//! use firecookies::cookies::monster::CookieMonster;
//! use firecookies::cookies::store::CookieStore;
//!
//! let jar = CookieMonster::new();
//! jar.set_raw_cookie("https://duckduckgo.com", "ae=d");
//! jar.set_raw_cookie("https://duckduckgo.com", "s=l; Path=/");
//! assert_eq!(jar.get("duckduckgo.com").as_deref(), Some("ae=d; s=l"));
//! ```

pub mod monster;
pub mod persistence;
pub mod rawcookie;
pub mod store;
