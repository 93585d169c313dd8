//! Merge de una capa de inyección con la cadena existente.
//!
//! Dos piezas:
//! - `assign_state`: vuelca las dependencias de la capa en la instancia.
//!   Una key explícita en la llamada siempre se asigna; una key ausente no
//!   pisa un valor que ya puso otra capa.
//! - `forward_arguments`: recorta los argumentos que recibe el siguiente
//!   inicializador según su forma de parámetros.

use std::sync::Arc;

use serde_json::Value;

use crate::arguments::{Arguments, Named};
use crate::dependency::DependencyKey;
use crate::errors::{ArgumentError, ResolveError};
use crate::shape::{Forwarding, ParameterShape};
use crate::target::Instance;

pub fn assign_state<F>(instance: &mut Instance, keys: &Arc<[DependencyKey]>, named: &Named, fallback: F) -> Result<(), ResolveError>
    where F: Fn(&DependencyKey) -> Result<Value, ResolveError>
{
    instance.record_layer(Arc::clone(keys));

    for key in keys.iter() {
        let value = match named.get(key.as_str()) {
            Some(supplied) => supplied.clone(),
            None if instance.has_dependency(key.as_str()) => continue,
            None => fallback(key)?,
        };
        instance.set_dependency(key.clone(), value);
    }
    Ok(())
}

/// Argumentos para el siguiente inicializador.
///
/// `resolved` es la primera forma no trivial de la cadena y `accepts_any`
/// indica si esa forma acepta nombrados arbitrarios.
///
/// Con reenvío sólo nombrado la capa no acepta posicionales: llegar con
/// alguno es un error de aridad, igual que sin la capa.
pub fn forward_arguments(resolved: &ParameterShape, keys: &[DependencyKey], args: Arguments, accepts_any: bool)
                         -> Result<Arguments, ArgumentError> {
    match resolved.forwarding_strategy() {
        Forwarding::Splat => Ok(args),
        Forwarding::Positional => {
            let named = resolved.keywords_for(keys, &args.named, accepts_any);
            Ok(Arguments { positionals: args.positionals, named, block: args.block })
        }
        Forwarding::Named if !args.positionals.is_empty() => {
            Err(ArgumentError::Arity { given: args.positionals.len(), expected: "0".to_string() })
        }
        Forwarding::Named => {
            let named = resolved.keywords_for(keys, &args.named, accepts_any);
            Ok(Arguments { positionals: Vec::new(), named, block: args.block })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(names: &[&str]) -> Arc<[DependencyKey]> { names.iter().map(|n| DependencyKey::from(*n)).collect() }

    fn args() -> Arguments { Arguments::new().positional("x").named("a", 1).named("other", 2).named("k", 3) }

    #[test]
    fn splat_forwards_everything() {
        let out = forward_arguments(&ParameterShape::new().rest("any"), &keys(&["a"]), args(), false).unwrap();
        assert_eq!(out.positionals, vec![json!("x")]);
        assert_eq!(out.named.len(), 3);
    }

    #[test]
    fn positional_keeps_positionals_and_filters_named() {
        let shape = ParameterShape::new().required("x").keyword("k");
        let out = forward_arguments(&shape, &keys(&["a"]), args(), false).unwrap();
        assert_eq!(out.positionals, vec![json!("x")]);
        assert_eq!(out.named.keys().collect::<Vec<_>>(), ["k"]);
    }

    #[test]
    fn named_keeps_foreign_keywords_when_shape_has_keyrest() {
        let shape = ParameterShape::new().keyword("k").keyrest("rest");
        let args = Arguments::new().named("a", 1).named("other", 2).named("k", 3);
        let out = forward_arguments(&shape, &keys(&["a"]), args, true).unwrap();
        assert!(out.positionals.is_empty());
        assert_eq!(out.named.keys().collect::<Vec<_>>(), ["other", "k"]);
    }

    #[test]
    fn named_rejects_positionals() {
        let shape = ParameterShape::new().keyword("k");
        let err = forward_arguments(&shape, &keys(&["a"]), args(), false).unwrap_err();
        assert_eq!(err, ArgumentError::Arity { given: 1, expected: "0".into() });
    }
}
