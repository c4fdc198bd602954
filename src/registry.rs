use alloc::{collections::BTreeMap, string::ToString as _};
use core::any::type_name;
use tracing::{debug, error, info_span, warn};

use crate::{
    any::TypeInfo,
    config::Config,
    errors::ServiceErrorKind,
    instantiator::{boxed_instantiator, ServiceType},
    key::{sanitize_scope_name, ServiceKey},
    record::ServiceRecord,
    registration::Registration,
    scope::ServiceScope,
    utils::thread_safety::{erase, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// Catalog of services keyed by service name and scope name.
///
/// Every (service name, scope name) pair has at most one record.
/// Records of the same service with different scope names are independent:
/// they're created, cached and removed separately.
pub struct ServiceRegistry {
    records: BTreeMap<ServiceKey, ServiceRecord>,
    config: Config,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(Config::DEFAULT)
    }

    #[inline]
    #[must_use]
    pub const fn with_config(config: Config) -> Self {
        Self {
            records: BTreeMap::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Number of records, i.e. distinct (service name, scope name) pairs
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str, scope_name: Option<&str>) -> bool {
        self.records.contains_key(&self.key(name, scope_name))
    }

    /// Scope of the record registered for the service and scope names
    #[must_use]
    pub fn scope_of(&self, name: &str, scope_name: Option<&str>) -> Option<ServiceScope> {
        self.records.get(&self.key(name, scope_name)).map(ServiceRecord::scope)
    }
}

impl ServiceRegistry {
    /// Registers a service.
    ///
    /// A non-empty scope name makes the service [`ServiceScope::Scoped`] regardless of the requested scope.
    /// Singleton and scoped services are instantiated right away if [`Config::eager_instantiation`] is set.
    ///
    /// # Errors
    /// - Returns [`ServiceErrorKind::InvalidIdentity`] if the service name is empty
    /// - Returns [`ServiceErrorKind::MissingScopeName`] if the service is scoped and the scope name is empty
    /// - Returns [`ServiceErrorKind::DuplicateRegistration`] if the service is already registered with the same scope name
    /// - Returns [`ServiceErrorKind::Instantiation`] if eager instantiation fails.
    ///   The registry is left unchanged in this case.
    pub fn register<T>(&mut self, registration: impl Into<Registration<T>>) -> Result<&mut Self, ServiceErrorKind>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        let Registration {
            service_type,
            scope,
            scope_name,
            create_callback,
        } = registration.into();

        let span = info_span!("register", service = service_type.name(), scope_name = scope_name.as_deref());
        let _guard = span.enter();

        let name = service_type.name().to_string();
        if name.is_empty() {
            let err = ServiceErrorKind::InvalidIdentity;
            error!("{}", err);
            return Err(err);
        }

        let scope_name = sanitize_scope_name(scope_name.as_deref());
        let scope = match scope_name {
            Some(_) => ServiceScope::Scoped,
            None => scope.unwrap_or_default(),
        };
        if scope == ServiceScope::Scoped && scope_name.is_none() {
            let err = ServiceErrorKind::MissingScopeName { name };
            error!("{}", err);
            return Err(err);
        }

        let key = self.key(&name, scope_name);
        if self.records.contains_key(&key) {
            let err = ServiceErrorKind::DuplicateRegistration { key };
            error!("{}", err);
            return Err(err);
        }

        let type_info = service_type.type_info();
        let mut record = ServiceRecord::new(name, type_info, scope, boxed_instantiator(service_type, create_callback));
        if self.config.eager_instantiation && scope.is_cached() {
            record.resolve(scope_name)?;
            debug!("Instantiated eagerly");
        }

        self.records.insert(key, record);
        debug!(%scope, "Registered");

        Ok(self)
    }

    /// Registers an already created instance as a singleton, or as a scoped instance if the scope name isn't empty.
    ///
    /// # Errors
    /// - Returns [`ServiceErrorKind::InvalidIdentity`] if the service name is empty
    /// - Returns [`ServiceErrorKind::DuplicateRegistration`] if the service is already registered with the same scope name
    #[inline]
    pub fn register_object<T>(
        &mut self,
        service_type: ServiceType<T>,
        instance: T,
        scope_name: Option<&str>,
    ) -> Result<&mut Self, ServiceErrorKind>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.register_object_rc(service_type, RcThreadSafety::new(instance), scope_name)
    }

    /// Same as [`Self::register_object`], but for a shared instance
    #[allow(clippy::missing_errors_doc)]
    #[inline]
    pub fn register_object_rc<T>(
        &mut self,
        service_type: ServiceType<T>,
        instance: RcThreadSafety<T>,
        scope_name: Option<&str>,
    ) -> Result<&mut Self, ServiceErrorKind>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.register_any_object(service_type, erase(instance), scope_name)
    }

    /// Same as [`Self::register_object`], but for a type-erased instance.
    ///
    /// # Errors
    /// - Returns [`ServiceErrorKind::InvalidIdentity`] if the service name is empty
    /// - Returns [`ServiceErrorKind::InvalidInstance`] if the instance isn't a `T`
    /// - Returns [`ServiceErrorKind::DuplicateRegistration`] if the service is already registered with the same scope name
    pub fn register_any_object<T: 'static>(
        &mut self,
        service_type: ServiceType<T>,
        instance: RcAnyThreadSafety,
        scope_name: Option<&str>,
    ) -> Result<&mut Self, ServiceErrorKind> {
        let span = info_span!("register_object", service = service_type.name(), scope_name);
        let _guard = span.enter();

        let name = service_type.name();
        if name.is_empty() {
            let err = ServiceErrorKind::InvalidIdentity;
            error!("{}", err);
            return Err(err);
        }
        if !instance.is::<T>() {
            let err = ServiceErrorKind::InvalidInstance { name: name.to_string() };
            error!("{}", err);
            return Err(err);
        }

        let scope_name = sanitize_scope_name(scope_name);
        let key = self.key(name, scope_name);
        if self.records.contains_key(&key) {
            let err = ServiceErrorKind::DuplicateRegistration { key };
            error!("{}", err);
            return Err(err);
        }

        let record = ServiceRecord::with_object(name.to_string(), service_type.type_info(), scope_name, instance);
        let scope = record.scope();
        self.records.insert(key, record);
        debug!(%scope, "Registered");

        Ok(self)
    }
}

impl ServiceRegistry {
    /// Gets an instance of the service named after `T`.
    ///
    /// # Errors
    /// Same as [`Self::get_by_name_as`]
    #[inline]
    pub fn get<T>(&mut self) -> Result<RcThreadSafety<T>, ServiceErrorKind>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.get_by_name_as(&TypeInfo::of::<T>().short_name(), None)
    }

    /// Gets an instance of the scoped service named after `T`.
    ///
    /// # Errors
    /// Same as [`Self::get_by_name_as`]
    #[inline]
    pub fn get_scoped<T>(&mut self, scope_name: &str) -> Result<RcThreadSafety<T>, ServiceErrorKind>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.get_by_name_as(&TypeInfo::of::<T>().short_name(), Some(scope_name))
    }

    /// Gets an instance of the service by its name.
    ///
    /// - Transient services are created on each call.
    /// - Singleton services are returned from cache.
    /// - Scoped services are returned from cache of the scope name or created and cached for it.
    ///
    /// # Errors
    /// - Returns [`ServiceErrorKind::InvalidIdentity`] if the service name is empty
    /// - Returns [`ServiceErrorKind::MissingScopeName`] if the scope name is empty and the service is registered only with scope names
    /// - Returns [`ServiceErrorKind::NotFound`] if there is no record for the service and scope names
    /// - Returns [`ServiceErrorKind::Instantiation`] if a new instance is required and can't be created
    pub fn get_by_name(&mut self, name: &str, scope_name: Option<&str>) -> Result<RcAnyThreadSafety, ServiceErrorKind> {
        let span = info_span!("get", service = name, scope_name);
        let _guard = span.enter();

        let name = name.trim();
        if name.is_empty() {
            let err = ServiceErrorKind::InvalidIdentity;
            error!("{}", err);
            return Err(err);
        }

        let scope_name = sanitize_scope_name(scope_name);
        let key = self.key(name, scope_name);
        if let Some(record) = self.records.get_mut(&key) {
            return record.resolve(scope_name);
        }

        let err = if scope_name.is_none() && self.has_scoped_records(&key.name) {
            ServiceErrorKind::MissingScopeName { name: name.to_string() }
        } else {
            ServiceErrorKind::NotFound { key }
        };
        warn!("{}", err);
        Err(err)
    }

    /// Same as [`Self::get_by_name`], but downcasts the instance to `T`.
    ///
    /// # Errors
    /// - Returns [`ServiceErrorKind::IncorrectType`] if the instance isn't a `T`
    /// - Returns errors of [`Self::get_by_name`]
    pub fn get_by_name_as<T>(&mut self, name: &str, scope_name: Option<&str>) -> Result<RcThreadSafety<T>, ServiceErrorKind>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.get_by_name(name, scope_name)?.downcast::<T>().map_err(|_| {
            let actual = self
                .records
                .get(&self.key(name, sanitize_scope_name(scope_name)))
                .map_or("unknown", |record| record.type_info.name);
            let err = ServiceErrorKind::IncorrectType {
                name: name.trim().to_string(),
                expected: type_name::<T>(),
                actual,
            };
            error!("{}", err);
            err
        })
    }
}

impl ServiceRegistry {
    /// Unregisters the service named after `T`.
    /// See [`Self::unregister_by_name`].
    #[inline]
    pub fn unregister<T: 'static>(&mut self, scope_name: Option<&str>) -> &mut Self {
        self.unregister_by_name(&TypeInfo::of::<T>().short_name(), scope_name)
    }

    /// Unregisters the service of the service type.
    /// See [`Self::unregister_by_name`].
    #[inline]
    pub fn unregister_type<T>(&mut self, service_type: &ServiceType<T>, scope_name: Option<&str>) -> &mut Self {
        self.unregister_by_name(service_type.name(), scope_name)
    }

    /// Unregisters a service.
    ///
    /// If the scope name is empty, all records of the service are removed,
    /// otherwise only the record with the scope name is removed and records with other scope names are kept.
    /// Unknown services and scope names are ignored.
    pub fn unregister_by_name(&mut self, name: &str, scope_name: Option<&str>) -> &mut Self {
        let span = info_span!("unregister", service = name, scope_name);
        let _guard = span.enter();

        let name = name.trim();
        if name.is_empty() {
            debug!("Empty service name, nothing to unregister");
            return self;
        }

        let key = self.key(name, sanitize_scope_name(scope_name));
        if key.is_scoped() {
            if self.records.remove(&key).is_some() {
                debug!("Unregistered");
            } else {
                debug!("Not registered");
            }
            return self;
        }

        let count_before = self.records.len();
        self.records.retain(|record_key, _| record_key.name != key.name);
        debug!(removed = count_before - self.records.len(), "Unregistered");

        self
    }

    /// Unregisters all the services, dropping every cached instance owned by the registry
    pub fn unregister_all(&mut self) -> &mut Self {
        let removed = self.records.len();
        self.records.clear();
        debug!(removed, "Unregistered all");

        self
    }
}

impl ServiceRegistry {
    #[inline]
    fn key(&self, name: &str, scope_name: Option<&str>) -> ServiceKey {
        ServiceKey::new(name, scope_name, self.config.ignore_case)
    }

    fn has_scoped_records(&self, name: &str) -> bool {
        self.records
            .range(ServiceKey::first_of(name)..)
            .take_while(|(key, _)| key.name == name)
            .any(|(key, _)| key.is_scoped())
    }
}
