use alloc::{
    collections::BTreeMap,
    string::{String, ToString as _},
};
use tracing::{debug, error};

use crate::{
    any::TypeInfo,
    errors::ServiceErrorKind,
    instantiator::BoxedInstantiator,
    scope::ServiceScope,
    utils::thread_safety::RcAnyThreadSafety,
};

/// Cached instances of a record. The variant is the lifecycle scope of the record.
pub(crate) enum Instances {
    Transient,
    Singleton(Option<RcAnyThreadSafety>),
    Scoped(BTreeMap<String, RcAnyThreadSafety>),
}

impl Instances {
    #[inline]
    #[must_use]
    pub(crate) fn empty(scope: ServiceScope) -> Self {
        match scope {
            ServiceScope::Transient => Self::Transient,
            ServiceScope::Singleton => Self::Singleton(None),
            ServiceScope::Scoped => Self::Scoped(BTreeMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn scope(&self) -> ServiceScope {
        match self {
            Self::Transient => ServiceScope::Transient,
            Self::Singleton(_) => ServiceScope::Singleton,
            Self::Scoped(_) => ServiceScope::Scoped,
        }
    }
}

pub(crate) struct ServiceRecord {
    pub(crate) name: String,
    pub(crate) type_info: TypeInfo,
    /// `None` for records of objects registered directly
    pub(crate) instantiator: Option<BoxedInstantiator>,
    pub(crate) instances: Instances,
}

impl ServiceRecord {
    #[inline]
    #[must_use]
    pub(crate) fn new(name: String, type_info: TypeInfo, scope: ServiceScope, instantiator: BoxedInstantiator) -> Self {
        Self {
            name,
            type_info,
            instantiator: Some(instantiator),
            instances: Instances::empty(scope),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn with_object(name: String, type_info: TypeInfo, scope_name: Option<&str>, instance: RcAnyThreadSafety) -> Self {
        let instances = match scope_name {
            Some(scope_name) => Instances::Scoped(BTreeMap::from([(scope_name.to_string(), instance)])),
            None => Instances::Singleton(Some(instance)),
        };
        Self {
            name,
            type_info,
            instantiator: None,
            instances,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn scope(&self) -> ServiceScope {
        self.instances.scope()
    }

    /// Returns the cached instance for the scope name or creates a new one according to the scope of the record.
    ///
    /// # Errors
    /// - Returns [`ServiceErrorKind::MissingScopeName`] if the record is scoped and the scope name is absent
    /// - Returns [`ServiceErrorKind::Instantiation`] if a new instance is required and can't be created
    pub(crate) fn resolve(&mut self, scope_name: Option<&str>) -> Result<RcAnyThreadSafety, ServiceErrorKind> {
        let Self {
            name,
            instantiator,
            instances,
            ..
        } = self;

        match instances {
            Instances::Transient => create(name, instantiator.as_ref()),
            Instances::Singleton(Some(instance)) => {
                debug!("Found in cache");
                Ok(instance.clone())
            }
            Instances::Singleton(slot @ None) => {
                debug!("Not found in cache");
                let instance = create(name, instantiator.as_ref())?;
                *slot = Some(instance.clone());
                debug!("Cached");
                Ok(instance)
            }
            Instances::Scoped(map) => {
                let Some(scope_name) = scope_name else {
                    let err = ServiceErrorKind::MissingScopeName { name: name.clone() };
                    error!("{}", err);
                    return Err(err);
                };
                if let Some(instance) = map.get(scope_name) {
                    debug!("Found in cache");
                    return Ok(instance.clone());
                }
                debug!("Not found in cache");

                let instance = create(name, instantiator.as_ref())?;
                map.insert(scope_name.to_string(), instance.clone());
                debug!("Cached");
                Ok(instance)
            }
        }
    }

    #[must_use]
    #[cfg(test)]
    pub(crate) fn cached_count(&self) -> usize {
        match &self.instances {
            Instances::Transient => 0,
            Instances::Singleton(slot) => usize::from(slot.is_some()),
            Instances::Scoped(map) => map.len(),
        }
    }
}

fn create(name: &str, instantiator: Option<&BoxedInstantiator>) -> Result<RcAnyThreadSafety, ServiceErrorKind> {
    let Some(instantiator) = instantiator else {
        let err = ServiceErrorKind::Instantiation {
            name: name.to_string(),
            source: None,
        };
        error!("{}", err);
        return Err(err);
    };

    instantiator().inspect_err(|err| error!("{}", err))
}
