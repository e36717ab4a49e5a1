//! Cookie persistence - save and load cookies to/from disk.
//!
//! Provides JSON-based persistence for CookieMonster. This is what backs
//! [`CookieStore::flush`](crate::cookies::store::CookieStore::flush) when a
//! store is opened with a file.

use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use crate::cookies::monster::CookieMonster;
use crate::cookies::rawcookie::RawCookie;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Serializable representation of one domain's cookies.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentDomain {
    domain: String,
    cookies: Vec<RawCookie>,
}

/// Save cookies from a CookieMonster to a file.
///
/// The file is replaced atomically: readers see either the previous
/// contents or the new ones.
///
/// # Example
/// ```ignore
/// persistence::save_cookies(&monster, Path::new("/path/to/cookies.json"))?;
/// ```
pub fn save_cookies(monster: &CookieMonster, path: &Path) -> Result<(), StoreError> {
    let mut domains: Vec<PersistentDomain> = monster
        .domains()
        .into_iter()
        .map(|(domain, cookies)| PersistentDomain { domain, cookies })
        .collect();
    // Stable output regardless of map iteration order
    domains.sort_by(|a, b| a.domain.cmp(&b.domain));

    let json = serde_json::to_string_pretty(&domains)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).path_context(&tmp)?;
    fs::rename(&tmp, path).path_context(path)
}

/// Load cookies from a file into a new CookieMonster.
///
/// # Example
/// ```ignore
/// let monster = persistence::load_cookies(Path::new("/path/to/cookies.json"))?;
/// ```
pub fn load_cookies(path: &Path) -> Result<CookieMonster, StoreError> {
    let json = fs::read_to_string(path).path_context(path)?;
    let domains: Vec<PersistentDomain> = serde_json::from_str(&json)?;

    let monster = CookieMonster::new();
    for pd in domains {
        match CookieMonster::domain_key(&pd.domain) {
            Some(key) => monster.load_domain(key, pd.cookies),
            None => {
                tracing::warn!(domain = %pd.domain, "skipping persisted cookies for invalid domain")
            }
        }
    }

    Ok(monster)
}
