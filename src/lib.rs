//! Infusion
//!
//! Inyección automática de dependencias por aumento de tipos:
//! - `with(container)` devuelve el `Actuator` con el que se declaran las
//!   dependencias (`inject`, `public`, `protected`).
//! - El `Injector` resultante se aplica a un `TargetType` y cada
//!   instanciación recibe sus dependencias resueltas del container.
//! - `config` lee los valores por defecto del entorno (`.env`).
//!
//! El núcleo vive en `infusion-core`; los containers con estado propio en
//! `infusion-adapters`.

use std::sync::Arc;

pub mod config;
pub mod errors;

pub use infusion_adapters::{Namespace, Registry};
pub use infusion_core::{actuator, arguments, chain, constants, container, dependency, injection, shape, target};
pub use infusion_core::{dependencies, AccessError, Actuator, ArgumentError, Arguments, Block, Container, DependencyError,
                        DependencyKey, DependencyMap, Entry, Identifier, InfuseError, Injector, Instance,
                        InstantiationError, ParameterShape, ResolveError, Scope, TargetType, TypeBuilder, TypeKind};

/// Punto de entrada: asocia `container` a un `Actuator`.
///
/// No lee el entorno; para aplicar la configuración usar
/// `config::InfusionConfig::configure`.
pub fn with<C: Container + 'static>(container: C) -> Actuator { Actuator::new(container) }

/// Igual que `with` para un container compartido.
pub fn with_shared(container: Arc<dyn Container>) -> Actuator { Actuator::shared(container) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_builds_an_actuator_over_any_container() {
        let injector = with(json!({"a": 1})).public(["a"]).unwrap();
        let instance = injector.apply(&TargetType::class("Plain").build()).unwrap().new_instance().unwrap();
        assert_eq!(instance.read("a"), Ok(&json!(1)));
    }

    #[test]
    fn with_shared_accepts_registries() {
        let registry = Arc::new(Registry::new());
        registry.register("a", "shared");
        let instance = with_shared(registry).inject(["a"])
                                            .unwrap()
                                            .apply(&TargetType::class("Plain").build())
                                            .unwrap()
                                            .new_instance()
                                            .unwrap();
        assert_eq!(instance.dependency("a"), Some(&json!("shared")));
    }
}
