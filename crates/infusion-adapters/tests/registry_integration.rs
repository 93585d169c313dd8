use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use infusion_adapters::Registry;
use infusion_core::{dependencies, Actuator, InstantiationError, ResolveError, TargetType};
use rayon::prelude::*;
use serde_json::json;

fn services() -> Arc<Registry> {
    let registry = Registry::new();
    registry.namespace("primary").register("zwei", 2).register("three", 3);
    registry.register("eins", 1);
    Arc::new(registry)
}

#[test]
fn registry_feeds_namespaced_and_aliased_dependencies() {
    let import = Actuator::shared(services());
    let injector = import.public(dependencies!["eins", "primary.zwei"; { "drei" => "primary.three" }]).unwrap();
    let instance = injector.apply(&TargetType::class("Service").build()).unwrap().new_instance().unwrap();

    assert_eq!(instance.read("eins"), Ok(&json!(1)));
    assert_eq!(instance.read("zwei"), Ok(&json!(2)));
    assert_eq!(instance.read("drei"), Ok(&json!(3)));
}

#[test]
fn memoized_entries_are_shared_across_instances() {
    let registry = services();
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    registry.register_memoized("pool", move || json!({"pool": counter.fetch_add(1, Ordering::SeqCst)}));

    let service = Actuator::shared(registry.clone()).inject(["pool"])
                                                    .unwrap()
                                                    .apply(&TargetType::class("Service").build())
                                                    .unwrap();

    let pools: Vec<_> = (0..64).into_par_iter().map(|_| service.new_instance().unwrap().dependency("pool").cloned()).collect();

    assert!(pools.iter().all(|p| p == &Some(json!({"pool": 0}))));
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn registrations_after_apply_are_visible() {
    let registry = services();
    let service = Actuator::shared(registry.clone()).inject(["late"])
                                                    .unwrap()
                                                    .apply(&TargetType::class("Service").build())
                                                    .unwrap();

    assert_eq!(service.new_instance().unwrap_err(),
               InstantiationError::Resolve(ResolveError::NotFound { identifier: "\"late\"".into() }));

    registry.register("late", "now");
    assert_eq!(service.new_instance().unwrap().dependency("late"), Some(&json!("now")));
}

#[test]
fn factory_failures_abort_construction() {
    let registry = services();
    registry.register_fallible("db", || Err("offline".into()));
    let service = Actuator::shared(registry).inject(["db"]).unwrap().apply(&TargetType::class("Service").build()).unwrap();

    let err = service.new_instance().unwrap_err();
    assert_eq!(err.to_string(), "Unable to resolve \"db\": offline");
}
