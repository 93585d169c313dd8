//! Uso de extremo a extremo a través de la fachada `infusion`.

use std::sync::Arc;

use infusion::config::{InfusionConfig, DEFAULT_SCOPE_VAR, NAME_PATTERN_VAR};
use infusion::errors::InfusionError;
use infusion::{dependencies, AccessError, Arguments, ParameterShape, Registry, TargetType};
use serde_json::json;

fn container() -> serde_json::Value { json!({"a": 1, "b": 2, "c": 3, "n.m.c": "deep"}) }

#[test]
fn public_protected_and_private_imports_side_by_side() {
    let import = infusion::with(container());
    let base = TargetType::class("Client").build();
    let open = import.public(["a"]).unwrap().apply(&base).unwrap();
    let family = import.protected(["b"]).unwrap().apply(&open).unwrap();
    let hidden = import.inject(["c"]).unwrap().apply(&family).unwrap();

    let instance = hidden.new_instance().unwrap();
    assert_eq!(instance.read("a"), Ok(&json!(1)));
    assert!(matches!(instance.read("b"), Err(AccessError::Protected { .. })));
    assert!(matches!(instance.read("c"), Err(AccessError::Private { .. })));
    assert_eq!(instance.read_from(&hidden.new_instance().unwrap(), "b"), Ok(&json!(2)));
    assert_eq!(instance.infused_keys(), ["c"]);
    assert_eq!(instance.snapshot()["dependencies"], json!({"c": 3, "b": 2, "a": 1}));
}

#[test]
fn namespaced_identifier_keeps_its_last_segment() {
    let import = infusion::with(container());
    let instance = import.public(["n.m.c"]).unwrap().apply(&TargetType::class("Client").build()).unwrap().new_instance().unwrap();
    assert_eq!(instance.read("c"), Ok(&json!("deep")));
}

#[test]
fn invalid_and_duplicate_configurations_fail_at_declaration() {
    let import = infusion::with(container());
    assert_eq!(import.inject(["123"]).unwrap_err().to_string(), "Cannot use \"123\" as an identifier.");
    assert_eq!(import.inject(dependencies!["a"; { "a" => "b" }]).unwrap_err().to_string(),
               "Remove \"b\" since it's a duplicate of :a.");
}

#[test]
fn configuration_drives_default_scope_and_pattern() {
    let config = InfusionConfig::from_lookup(|name| match name {
                     n if n == DEFAULT_SCOPE_VAR => Some("public".into()),
                     n if n == NAME_PATTERN_VAR => Some(r"[a-z_.]+$".into()),
                     _ => None,
                 }).unwrap();
    let import = config.configure(infusion::with(json!({"n.a": 1})));

    let instance = import.inject(["n.a"]).unwrap().apply(&TargetType::class("Client").build()).unwrap().new_instance().unwrap();
    assert_eq!(instance.read("n.a"), Ok(&json!(1)));
}

#[test]
fn errors_convert_into_the_facade_error() {
    fn build() -> Result<(), InfusionError> {
        let import = infusion::with(json!({}));
        let target = import.inject(["missing"])?.apply(&TargetType::class("Client").build())?;
        target.new_instance()?;
        Ok(())
    }
    let err = build().unwrap_err();
    assert!(matches!(err, InfusionError::Instantiation(_)));
    assert_eq!(err.to_string(), "Nothing registered with the key \"missing\".");
}

#[test]
fn registry_backed_injection_with_positional_initializer() {
    let registry = Arc::new(Registry::new());
    registry.register("a", 1).register("b", 2);

    let point = TargetType::class("Point").initializer(ParameterShape::new().required("x"), |instance, inv| {
                                              inv.store_bindings(instance);
                                              inv.forward(instance)
                                          })
                                          .build();
    let point = infusion::with_shared(registry).inject(["a"]).unwrap().apply(&point).unwrap();

    let instance = point.instantiate(Arguments::new().positional(5)).unwrap();
    assert_eq!(instance.field("x"), Some(&json!(5)));
    assert_eq!(instance.dependency("a"), Some(&json!(1)));
    assert!(instance.dependency("b").is_none());
}
