/// Config for a service registry
/// ## Fields
/// - `eager_instantiation`:
///   If `true`, singleton and scoped services are instantiated at registration time,
///   so a failing constructor is reported by `register` itself.
///   Otherwise they're instantiated on the first retrieval.
///
///   Transient services are never instantiated at registration time.
/// - `ignore_case`:
///   If `true`, service names are folded to lower case in record keys,
///   so `Cache` and `cache` are the same service. Scope names are always case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub eager_instantiation: bool,
    pub ignore_case: bool,
}

impl Config {
    pub const DEFAULT: Self = Self {
        eager_instantiation: true,
        ignore_case: false,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
