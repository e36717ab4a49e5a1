use crate::cookies::store::CookieStore;
use crate::fire::allowlist::AllowList;

/// Split a raw cookie header (`a=1; b=2`) into trimmed cookie strings.
/// Empty segments are dropped, order is kept.
pub fn split_cookie_header(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cookies captured for every allow-listed domain at the start of a clear
/// cycle, in allow list order.
///
/// A snapshot lives for one cycle only and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSnapshot {
    entries: Vec<(String, Vec<String>)>,
}

impl DomainSnapshot {
    /// Read every domain of `allow_list` from `store`. An absent header
    /// yields an empty cookie list for that domain.
    pub fn capture(store: &dyn CookieStore, allow_list: &AllowList) -> Self {
        let entries = allow_list
            .iter()
            .map(|domain| {
                let cookies = store
                    .get(domain)
                    .map(|raw| split_cookie_header(&raw))
                    .unwrap_or_default();
                (domain.to_string(), cookies)
            })
            .collect();
        Self { entries }
    }

    /// Cookies captured for `domain`, if it was part of the snapshot.
    pub fn cookies(&self, domain: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, cookies)| cookies.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.entries
            .iter()
            .map(|(domain, cookies)| (domain.as_str(), cookies.as_slice()))
    }

    /// Total number of cookies across all domains.
    pub fn cookie_count(&self) -> usize {
        self.entries.iter().map(|(_, cookies)| cookies.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cookie_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::monster::CookieMonster;

    #[test]
    fn test_split_trims_and_keeps_order() {
        assert_eq!(split_cookie_header("x=1; y=2 ;z=3"), ["x=1", "y=2", "z=3"]);
    }

    #[test]
    fn test_split_drops_empty_segments() {
        assert!(split_cookie_header("").is_empty());
        assert_eq!(split_cookie_header("a=1;; ;"), ["a=1"]);
    }

    #[test]
    fn test_capture_follows_allow_list_order() {
        let jar = CookieMonster::new();
        jar.set_raw_cookie("b.com", "z=3");
        jar.set_raw_cookie("a.com", "x=1");
        jar.set_raw_cookie("a.com", "y=2");
        jar.set_raw_cookie("other.com", "t=9");

        let list = AllowList::new(["a.com", "b.com", "missing.com"]).unwrap();
        let snapshot = DomainSnapshot::capture(&jar, &list);

        let captured: Vec<_> = snapshot.iter().collect();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0], ("a.com", &["x=1".to_string(), "y=2".to_string()][..]));
        assert_eq!(captured[1], ("b.com", &["z=3".to_string()][..]));
        assert_eq!(captured[2].1.len(), 0);
        assert_eq!(snapshot.cookie_count(), 3);
        assert!(snapshot.cookies("other.com").is_none());
    }
}
