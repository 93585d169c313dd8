//! infusion-core: motor de inyección de dependencias por aumento de tipos.
//!
//! Flujo: lista de configuración -> `DependencyMap` -> `Injector` (captura
//! container + tabla + scope) -> se aplica a un `TargetType` -> cada
//! instanciación resuelve y asigna las dependencias.
#[macro_use]
pub mod macros;

pub mod actuator;
pub mod arguments;
pub mod chain;
pub mod constants;
pub mod container;
pub mod dependency;
pub mod errors;
pub mod injection;
pub mod shape;
pub mod target;

pub use actuator::Actuator;
pub use arguments::{Arguments, Block, Named};
pub use chain::{Handwritten, InitStep, Initializer, Invocation};
pub use container::Container;
pub use dependency::{DependencyKey, DependencyMap, Entry, Identifier};
pub use errors::{AccessError, ArgumentError, DependencyError, InfuseError, InstantiationError, ResolveError};
pub use injection::Injector;
pub use shape::{Bindings, Forwarding, ParameterShape};
pub use target::{Instance, Scope, TargetType, TypeBuilder, TypeKind};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scenario_positional_initializer_without_collision() {
        // container {a:1, b:2}, keys [a], init(x) con x=5
        let import = Actuator::new(json!({"a": 1, "b": 2}));
        let base = TargetType::class("Point").initializer(ParameterShape::new().required("x"), |instance, inv| {
                                                  inv.store_bindings(instance);
                                                  inv.forward(instance)
                                              })
                                              .build();
        let infused = import.inject(["a"]).unwrap().apply(&base).unwrap();

        let instance = infused.instantiate(Arguments::new().positional(5)).unwrap();
        assert_eq!(instance.dependency("a"), Some(&json!(1)));
        assert_eq!(instance.field("x"), Some(&json!(5)));
        assert!(instance.dependency("b").is_none());
        assert_eq!(instance.infused_keys(), ["a"]);
    }

    #[test]
    fn apply_does_not_mutate_the_original_type() {
        let base = TargetType::class("Plain").build();
        let infused = Actuator::new(json!({"a": 1})).public(["a"]).unwrap().apply(&base).unwrap();

        assert!(base.new_instance().unwrap().dependencies().is_empty());
        assert_eq!(infused.new_instance().unwrap().read("a"), Ok(&json!(1)));
        assert!(infused.is_a(&base));
        assert!(!base.is_a(&infused));
    }
}
