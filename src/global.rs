use parking_lot::{const_mutex, Mutex, MutexGuard};

use crate::registry::ServiceRegistry;

static GLOBAL_REGISTRY: Mutex<ServiceRegistry> = const_mutex(ServiceRegistry::new());

/// Locks the process-wide registry.
///
/// The registry is an ordinary value, so prefer creating a [`ServiceRegistry`] and passing it explicitly.
/// This accessor is for code that needs a single registry shared by the whole process.
///
/// # Warning
/// The lock is held until the guard is dropped.
/// Calling [`global`] again while holding the guard, for example from a creation callback, deadlocks.
#[inline]
pub fn global() -> MutexGuard<'static, ServiceRegistry> {
    GLOBAL_REGISTRY.lock()
}
