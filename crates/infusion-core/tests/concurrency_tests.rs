use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use infusion_core::{Actuator, Arguments, Container, Identifier, ParameterShape, ResolveError, TargetType};
use rayon::prelude::*;
use serde_json::{json, Value};

/// Container que cuenta cuántas resoluciones recibe.
struct Counting {
    hits: AtomicUsize,
}

impl Container for Counting {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(json!(format!("resolved:{}", identifier.as_str())))
    }

    fn contains(&self, _identifier: &Identifier) -> bool { true }
}

#[test]
fn parallel_instantiation_shares_no_mutable_state() {
    let container = Arc::new(Counting { hits: AtomicUsize::new(0) });
    let import = Actuator::shared(container.clone());
    let base = TargetType::class("Worker").initializer(ParameterShape::new().required("n"), |instance, inv| {
                                               inv.store_bindings(instance);
                                               Ok(())
                                           })
                                           .build();
    let worker = import.inject(["svc.logger", "svc.clock"]).unwrap().apply(&base).unwrap();

    let instances: Vec<_> = (0..256).into_par_iter()
                                    .map(|n| {
                                        let args = Arguments::new().positional(n);
                                        let args = if n % 2 == 0 { args.named("clock", n) } else { args };
                                        worker.instantiate(args).unwrap()
                                    })
                                    .collect();

    for (n, instance) in instances.iter().enumerate() {
        assert_eq!(instance.field("n"), Some(&json!(n)));
        assert_eq!(instance.dependency("logger"), Some(&json!("resolved:svc.logger")));
        let clock = if n % 2 == 0 { json!(n) } else { json!("resolved:svc.clock") };
        assert_eq!(instance.dependency("clock"), Some(&clock));
    }
    // 256 loggers + 128 relojes no suministrados
    assert_eq!(container.hits.load(Ordering::SeqCst), 384);
}

#[test]
fn one_injector_applied_from_many_threads() {
    let injector = Actuator::new(json!({"a": 1, "b": 2})).public(["a", "b"]).unwrap();

    let types: Vec<TargetType> = (0..32).into_par_iter()
                                        .map(|i| injector.apply(&TargetType::class(format!("T{i}")).build()).unwrap())
                                        .collect();

    for target in &types {
        let instance = target.new_instance().unwrap();
        assert_eq!(instance.read("a"), Ok(&json!(1)));
        assert_eq!(instance.read("b"), Ok(&json!(2)));
    }
}
