#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod instantiator;
pub(crate) mod key;
pub(crate) mod record;
pub(crate) mod registration;
pub(crate) mod registry;
pub(crate) mod scope;

#[cfg(feature = "thread_safe")]
pub(crate) mod global;

pub mod utils;

pub use any::TypeInfo;
pub use config::Config;
pub use errors::{InstantiateErrorKind, ServiceErrorKind};
pub use instantiator::{Constructor, CreateCallback, ServiceType};
pub use key::ServiceKey;
pub use registration::Registration;
pub use registry::ServiceRegistry;
pub use scope::ServiceScope;

#[cfg(feature = "thread_safe")]
pub use global::global;
