use alloc::{
    boxed::Box,
    string::{String, ToString as _},
};
use core::fmt::{self, Debug, Formatter};
use tracing::debug;

use crate::{
    any::TypeInfo,
    errors::{InstantiateErrorKind, ServiceErrorKind},
    utils::thread_safety::{erase, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// Zero-argument constructor of a service, used when there is no creation callback
/// or the callback didn't create an instance.
pub type Constructor<T> = fn() -> Result<T, InstantiateErrorKind>;

/// Caller-supplied function creating a service instance.
/// Returning `None` makes the registry fall back to the default constructor of the service type.
pub type CreateCallback<T> = Box<dyn Fn(&ServiceType<T>) -> Option<T> + Send + Sync>;

/// Constructible reference to a service: its type, its name and how to build it by default.
pub struct ServiceType<T> {
    type_info: TypeInfo,
    name: String,
    constructor: Option<Constructor<T>>,
}

impl<T: 'static> ServiceType<T> {
    /// Service type named after `T` (without module path) and constructed with [`Default`].
    #[inline]
    #[must_use]
    pub fn of() -> Self
    where
        T: Default,
    {
        Self::with_constructor(|| Ok(T::default()))
    }

    #[inline]
    #[must_use]
    pub fn with_constructor(constructor: Constructor<T>) -> Self {
        let type_info = TypeInfo::of::<T>();
        Self {
            name: type_info.short_name(),
            type_info,
            constructor: Some(constructor),
        }
    }

    /// Service type without a default constructor.
    /// It can only be instantiated by a creation callback or registered as an object.
    #[inline]
    #[must_use]
    pub fn without_constructor() -> Self {
        let type_info = TypeInfo::of::<T>();
        Self {
            name: type_info.short_name(),
            type_info,
            constructor: None,
        }
    }
}

impl<T> ServiceType<T> {
    /// Overrides the service name derived from the type
    #[inline]
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.trim()
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub const fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }
}

impl<T> Clone for ServiceType<T> {
    fn clone(&self) -> Self {
        Self {
            type_info: self.type_info,
            name: self.name.clone(),
            constructor: self.constructor,
        }
    }
}

impl<T> Debug for ServiceType<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceType")
            .field("name", &self.name)
            .field("type_name", &self.type_info.name)
            .field("has_constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Creates a new instance of the service.
///
/// The creation callback is tried first. If it's absent or returns `None`,
/// the default constructor of the service type is used.
///
/// # Errors
/// Returns [`ServiceErrorKind::Instantiation`] if the default constructor fails
/// or there is neither a callback result nor a default constructor.
pub(crate) fn instantiate<T>(service_type: &ServiceType<T>, create_callback: Option<&CreateCallback<T>>) -> Result<T, ServiceErrorKind> {
    if let Some(create_callback) = create_callback {
        if let Some(instance) = create_callback(service_type) {
            debug!("Created by callback");
            return Ok(instance);
        }
        debug!("Callback didn't create an instance");
    }

    let Some(constructor) = service_type.constructor else {
        return Err(ServiceErrorKind::Instantiation {
            name: service_type.name().to_string(),
            source: None,
        });
    };

    match constructor() {
        Ok(instance) => {
            debug!("Created by default constructor");
            Ok(instance)
        }
        Err(err) => Err(ServiceErrorKind::Instantiation {
            name: service_type.name().to_string(),
            source: Some(err),
        }),
    }
}

pub(crate) type BoxedInstantiator = Box<dyn Fn() -> Result<RcAnyThreadSafety, ServiceErrorKind> + Send + Sync>;

#[must_use]
pub(crate) fn boxed_instantiator<T>(service_type: ServiceType<T>, create_callback: Option<CreateCallback<T>>) -> BoxedInstantiator
where
    T: SendSafety + SyncSafety + 'static,
{
    Box::new(move || instantiate(&service_type, create_callback.as_ref()).map(|instance| erase(RcThreadSafety::new(instance))))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_instantiator, instantiate, CreateCallback, ServiceType};
    use crate::{
        errors::{InstantiateErrorKind, ServiceErrorKind},
        utils::thread_safety::RcThreadSafety,
    };

    use alloc::{
        boxed::Box,
        format,
        string::{String, ToString as _},
        sync::Arc,
    };
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing_test::traced_test;

    #[derive(Default, Debug, PartialEq)]
    struct Mailer(u8);

    #[test]
    fn test_service_type_name() {
        assert_eq!(ServiceType::<Mailer>::of().name(), "Mailer");
        assert_eq!(ServiceType::<Mailer>::of().named("  SmtpMailer ").name(), "SmtpMailer");
        assert!(ServiceType::<Mailer>::of().named("   ").name().is_empty());
        assert!(!ServiceType::<Mailer>::without_constructor().has_constructor());
    }

    #[test]
    #[traced_test]
    fn test_default_constructor_without_callback() {
        let instance = instantiate(&ServiceType::<Mailer>::of(), None).unwrap();
        assert_eq!(instance, Mailer(0));
    }

    #[test]
    #[traced_test]
    fn test_callback_receives_service_type() {
        let callback: CreateCallback<Mailer> = Box::new(|service_type| {
            assert_eq!(service_type.name(), "Mailer");
            Some(Mailer(7))
        });

        let instance = instantiate(&ServiceType::of(), Some(&callback)).unwrap();
        assert_eq!(instance, Mailer(7));
        assert!(logs_contain("Created by callback"));
    }

    #[test]
    #[traced_test]
    fn test_callback_none_falls_back_to_constructor() {
        let callback_call_count = Arc::new(AtomicU8::new(0));
        let callback: CreateCallback<Mailer> = Box::new({
            let callback_call_count = callback_call_count.clone();
            move |_| {
                callback_call_count.fetch_add(1, Ordering::SeqCst);
                None
            }
        });

        let instance = instantiate(&ServiceType::with_constructor(|| Ok(Mailer(3))), Some(&callback)).unwrap();

        assert_eq!(instance, Mailer(3));
        assert_eq!(callback_call_count.load(Ordering::SeqCst), 1);
        assert!(logs_contain("Created by default constructor"));
    }

    #[test]
    #[traced_test]
    fn test_failing_constructor() {
        let service_type = ServiceType::<Mailer>::with_constructor(|| Err(InstantiateErrorKind::Custom(anyhow::anyhow!("smtp is down"))));

        match instantiate(&service_type, None) {
            Err(ServiceErrorKind::Instantiation { name, source: Some(err) }) => {
                assert_eq!(name, "Mailer");
                assert_eq!(err.to_string(), "smtp is down");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn test_no_callback_result_and_no_constructor() {
        let callback: CreateCallback<Mailer> = Box::new(|_| None);

        match instantiate(&ServiceType::<Mailer>::without_constructor(), Some(&callback)) {
            Err(ServiceErrorKind::Instantiation { name, source: None }) => assert_eq!(name, "Mailer"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator_creates_new_instances() {
        let call_count = Arc::new(AtomicU8::new(0));
        let callback: CreateCallback<Mailer> = Box::new({
            let call_count = call_count.clone();
            move |_| Some(Mailer(call_count.fetch_add(1, Ordering::SeqCst)))
        });
        let instantiator = boxed_instantiator(ServiceType::<Mailer>::without_constructor(), Some(callback));

        let first = instantiator().unwrap().downcast::<Mailer>().unwrap();
        let second = instantiator().unwrap().downcast::<Mailer>().unwrap();

        assert_eq!(*first, Mailer(0));
        assert_eq!(*second, Mailer(1));
        assert!(!RcThreadSafety::ptr_eq(&first, &second));
    }
}
