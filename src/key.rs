use alloc::string::{String, ToString as _};
use core::fmt::{self, Display, Formatter};

/// Composite key of a service record: service name plus an optional scope name.
///
/// An empty `scope_name` means the record isn't qualified by a scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceKey {
    pub name: String,
    pub scope_name: String,
}

impl ServiceKey {
    #[inline]
    #[must_use]
    pub fn new(name: &str, scope_name: Option<&str>, ignore_case: bool) -> Self {
        let name = name.trim();
        Self {
            name: if ignore_case { name.to_lowercase() } else { name.to_string() },
            scope_name: sanitize_scope_name(scope_name).unwrap_or_default().to_string(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        !self.scope_name.is_empty()
    }

    /// Smallest key with the given service name, used as the start of a range over all its scope names.
    #[inline]
    #[must_use]
    pub(crate) fn first_of(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scope_name: String::new(),
        }
    }
}

impl Display for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_scoped() {
            write!(f, "{}[{}]", self.name, self.scope_name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Trims the scope name and treats an empty one as absent.
#[inline]
#[must_use]
pub(crate) fn sanitize_scope_name(scope_name: Option<&str>) -> Option<&str> {
    scope_name.map(str::trim).filter(|scope_name| !scope_name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{sanitize_scope_name, ServiceKey};

    use alloc::string::ToString as _;

    #[test]
    fn test_scope_name_qualifies_key() {
        let unscoped = ServiceKey::new("Cache", None, false);
        let scoped = ServiceKey::new("Cache", Some("A"), false);

        assert!(!unscoped.is_scoped());
        assert!(scoped.is_scoped());
        assert_ne!(unscoped, scoped);
        assert_eq!(unscoped.to_string(), "Cache");
        assert_eq!(scoped.to_string(), "Cache[A]");
    }

    #[test]
    fn test_empty_scope_name_is_absent() {
        assert_eq!(ServiceKey::new("Cache", Some("  "), false), ServiceKey::new("Cache", None, false));
        assert_eq!(sanitize_scope_name(Some(" A ")), Some("A"));
        assert_eq!(sanitize_scope_name(Some("")), None);
    }

    #[test]
    fn test_no_collision_between_name_and_scope() {
        assert_ne!(ServiceKey::new("a:b", None, false), ServiceKey::new("a", Some("b"), false));
    }

    #[test]
    fn test_case_folding() {
        assert_ne!(ServiceKey::new("Cache", None, false), ServiceKey::new("cache", None, false));
        assert_eq!(ServiceKey::new("Cache", None, true), ServiceKey::new("cache", None, true));
        // Scope names keep their case
        assert_ne!(ServiceKey::new("Cache", Some("A"), true), ServiceKey::new("Cache", Some("a"), true));
    }

    #[test]
    fn test_first_of_orders_before_scoped() {
        let first = ServiceKey::first_of("Cache");
        assert!(first <= ServiceKey::new("Cache", None, false));
        assert!(first < ServiceKey::new("Cache", Some("A"), false));
        assert!(first > ServiceKey::new("Cach", Some("zzz"), false));
    }
}
