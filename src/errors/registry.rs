use alloc::string::String;

use super::instantiate::InstantiateErrorKind;
use crate::key::ServiceKey;

#[derive(thiserror::Error, Debug)]
pub enum ServiceErrorKind {
    #[error("Service name can't be derived or is empty")]
    InvalidIdentity,
    #[error("Invalid instance provided for service `{name}`")]
    InvalidInstance { name: String },
    #[error("Scope name not provided for scoped service `{name}`")]
    MissingScopeName { name: String },
    #[error("Service `{key}` is already registered")]
    DuplicateRegistration { key: ServiceKey },
    #[error("Service `{key}` not found")]
    NotFound { key: ServiceKey },
    #[error("Failed to instantiate service `{name}`")]
    Instantiation {
        name: String,
        #[source]
        source: Option<InstantiateErrorKind>,
    },
    #[error("Unknown service scope `{value}`")]
    UnknownScope { value: String },
    #[error("Service `{name}` is an instance of `{actual}`, expected `{expected}`")]
    IncorrectType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}
