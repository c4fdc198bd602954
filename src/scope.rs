use alloc::string::ToString as _;
use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::errors::ServiceErrorKind;

/// Lifecycle policy of a registered service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceScope {
    /// Only one instance is created for the whole registry.
    #[default]
    Singleton,
    /// A new instance is created on each retrieval and never cached.
    Transient,
    /// One instance per scope name.
    Scoped,
}

impl ServiceScope {
    pub const ALL: [ServiceScope; 3] = [ServiceScope::Singleton, ServiceScope::Transient, ServiceScope::Scoped];

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ServiceScope::Singleton => "SINGLETON",
            ServiceScope::Transient => "TRANSIENT",
            ServiceScope::Scoped => "SCOPED",
        }
    }

    /// Parses a scope name, falling back to [`ServiceScope::Singleton`] for unrecognized values.
    #[inline]
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        !matches!(self, ServiceScope::Transient)
    }
}

impl Display for ServiceScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceScope {
    type Err = ServiceErrorKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|scope| scope.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ServiceErrorKind::UnknownScope { value: value.to_string() })
    }
}
