mod instantiate;
mod registry;

pub use instantiate::InstantiateErrorKind;
pub use registry::ServiceErrorKind;
