use alloc::{boxed::Box, string::String};

use crate::{
    instantiator::{CreateCallback, ServiceType},
    scope::ServiceScope,
};

/// Options of a service registration.
///
/// Without an explicit scope the service is registered as [`ServiceScope::Singleton`].
/// A non-empty scope name always makes the registration [`ServiceScope::Scoped`].
pub struct Registration<T> {
    pub(crate) service_type: ServiceType<T>,
    pub(crate) scope: Option<ServiceScope>,
    pub(crate) scope_name: Option<String>,
    pub(crate) create_callback: Option<CreateCallback<T>>,
}

impl<T> Registration<T> {
    #[inline]
    #[must_use]
    pub const fn new(service_type: ServiceType<T>) -> Self {
        Self {
            service_type,
            scope: None,
            scope_name: None,
            create_callback: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn scope(mut self, scope: ServiceScope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[inline]
    #[must_use]
    pub fn scope_name(mut self, scope_name: impl Into<String>) -> Self {
        self.scope_name = Some(scope_name.into());
        self
    }

    /// Sets a function that is tried before the default constructor of the service type
    #[inline]
    #[must_use]
    pub fn create_callback<F>(mut self, create_callback: F) -> Self
    where
        F: Fn(&ServiceType<T>) -> Option<T> + Send + Sync + 'static,
    {
        self.create_callback = Some(Box::new(create_callback));
        self
    }
}

impl<T> From<ServiceType<T>> for Registration<T> {
    #[inline]
    fn from(service_type: ServiceType<T>) -> Self {
        Self::new(service_type)
    }
}
