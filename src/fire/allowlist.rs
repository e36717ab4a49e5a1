use crate::base::storeerror::StoreError;
use std::sync::Arc;

/// Domains whose cookies survive a Fire Button clear by default: the
/// search settings domain and the survey domain.
pub const DEFAULT_COOKIE_DOMAINS: [&str; 2] =
    ["https://duckduckgo.com", "https://surveys.duckduckgo.com"];

/// Immutable, ordered set of domain identifiers whose cookies are
/// snapshotted before a clear and restored after it.
///
/// Iteration order is the construction order with duplicates removed, and
/// it never changes for the lifetime of the list. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    domains: Arc<[String]>,
}

impl AllowList {
    /// Build an allow list. Identifiers are opaque; they are only trimmed.
    /// Blank identifiers are rejected, repeated ones keep their first position.
    pub fn new<I, S>(domains: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain.as_ref().trim();
            if domain.is_empty() {
                return Err(StoreError::InvalidDomain(domain.to_string()));
            }
            if !ordered.iter().any(|d| d == domain) {
                ordered.push(domain.to_string());
            }
        }
        Ok(Self {
            domains: ordered.into(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.domains.iter().map(String::as_str)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self {
            domains: DEFAULT_COOKIE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_members_in_order() {
        let list = AllowList::default();
        let domains: Vec<_> = list.iter().collect();
        assert_eq!(domains, DEFAULT_COOKIE_DOMAINS);
        assert!(list.contains("https://surveys.duckduckgo.com"));
        assert!(!list.contains("https://example.com"));
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let list = AllowList::new(["b.com", "a.com", " b.com "]).unwrap();
        let domains: Vec<_> = list.iter().collect();
        assert_eq!(domains, ["b.com", "a.com"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_blank_domain_rejected() {
        let err = AllowList::new(["a.com", "  "]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDomain(_)));
    }

    #[test]
    fn test_empty_list_allowed() {
        let list = AllowList::new(Vec::<String>::new()).unwrap();
        assert!(list.is_empty());
    }
}
