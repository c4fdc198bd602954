#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use svc_registry::{Registration, ServiceRegistry, ServiceScope, ServiceType};

#[derive(Default)]
struct A;

#[derive(Default)]
struct B(Vec<u8>);

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("get_singleton", |b| {
        let mut registry = ServiceRegistry::new();
        registry.register(ServiceType::<A>::of()).unwrap();

        b.iter(|| registry.get::<A>().unwrap());
    })
    .bench_function("get_transient", |b| {
        let mut registry = ServiceRegistry::new();
        registry
            .register(Registration::new(ServiceType::<B>::of()).scope(ServiceScope::Transient))
            .unwrap();

        b.iter(|| registry.get::<B>().unwrap());
    })
    .bench_function("get_scoped_many", |b| {
        let scope_names: Vec<String> = (0..64).map(|index| format!("scope-{index}")).collect();

        let mut registry = ServiceRegistry::new();
        for scope_name in &scope_names {
            registry
                .register(Registration::new(ServiceType::<A>::of()).scope_name(scope_name.as_str()))
                .unwrap();
        }

        b.iter(|| {
            for scope_name in &scope_names {
                registry.get_scoped::<A>(scope_name).unwrap();
            }
        });
    })
    .bench_function("register_unregister", |b| {
        let mut registry = ServiceRegistry::new();

        b.iter(|| {
            registry.register(ServiceType::<A>::of()).unwrap().unregister::<A>(None);
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
