use svc_registry::{global, Registration, ServiceErrorKind, ServiceType};

#[derive(Default)]
struct Clock;

#[derive(Default)]
struct Metrics;

#[test]
fn test_global_singleton_shared_between_locks() {
    let first = {
        let mut registry = global();
        registry.register(ServiceType::<Clock>::of()).unwrap();
        registry.get::<Clock>().unwrap()
    };

    let second = global().get::<Clock>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    global().unregister::<Clock>(None);
    assert!(matches!(global().get::<Clock>(), Err(ServiceErrorKind::NotFound { .. })));
}

#[test]
fn test_global_used_from_threads() {
    global()
        .register(Registration::new(ServiceType::<Metrics>::of()).scope_name("worker"))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| global().get_scoped::<Metrics>("worker").unwrap()))
        .collect();
    let instances: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    for instance in &instances {
        assert!(std::sync::Arc::ptr_eq(instance, &instances[0]));
    }

    global().unregister::<Metrics>(Some("worker"));
}
