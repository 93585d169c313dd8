//! Enlace de `Arguments` contra un `ParameterShape`.
//!
//! Reglas de asignación:
//! - Los requeridos consumen primero; los opcionales toman lo que sobra en
//!   orden y el rest recoge el resto.
//! - Si la forma no acepta nombrados y llegan nombrados, se pliegan en un
//!   objeto como último posicional.
//! - Sin catch-all nombrado, un nombrado desconocido es un error.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::parameter::{ParameterKind, ParameterShape};
use crate::arguments::{Arguments, Block, Named};
use crate::errors::ArgumentError;

/// Valores enlazados por nombre de parámetro. Los splats anónimos (`*`,
/// `**`) se guardan aparte para poder reenviarlos.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: IndexMap<String, Value>,
    splat: Vec<Value>,
    double_splat: Named,
    block: Option<Block>,
}

impl Bindings {
    pub fn get(&self, name: &str) -> Option<&Value> { self.values.get(name) }

    pub fn block(&self) -> Option<&Block> { self.block.as_ref() }

    pub fn splat(&self) -> &[Value] { &self.splat }

    pub fn double_splat(&self) -> &Named { &self.double_splat }

    /// Equivalente a reenviar `(*, **, &)`.
    pub fn anonymous_arguments(&self) -> Arguments {
        Arguments { positionals: self.splat.clone(),
                    named: self.double_splat.clone(),
                    block: self.block.clone() }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> { self.values.iter() }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl ParameterShape {
    pub fn bind(&self, args: &Arguments) -> Result<Bindings, ArgumentError> {
        let mut positionals = args.positionals.clone();
        let mut named = args.named.clone();

        if !self.accepts_keywords() && !named.is_empty() {
            let folded: Map<String, Value> = named.drain(..).collect();
            positionals.push(Value::Object(folded));
        }

        let required = self.parameters().iter().filter(|p| p.kind == ParameterKind::Required).count();
        let optional = self.parameters()
                           .iter()
                           .filter(|p| matches!(p.kind, ParameterKind::Optional(_)))
                           .count();
        let has_rest = self.parameters().iter().any(|p| p.kind == ParameterKind::Rest);

        let given = positionals.len();
        if given < required || (!has_rest && given > required + optional) {
            let expected = if has_rest {
                format!("{required}+")
            } else if optional > 0 {
                format!("{required}..{}", required + optional)
            } else {
                required.to_string()
            };
            return Err(ArgumentError::Arity { given, expected });
        }

        let mut bindings = Bindings { block: args.block.clone(), ..Bindings::default() };
        let mut spare = given - required;
        let mut cursor = positionals.into_iter();
        let mut missing = Vec::new();
        let mut keyrest: Option<Option<String>> = None;

        for parameter in self.parameters() {
            let name = parameter.name.clone();
            let value = match &parameter.kind {
                ParameterKind::Required => cursor.next(),
                ParameterKind::Optional(default) => {
                    if spare > 0 {
                        spare -= 1;
                        cursor.next()
                    } else {
                        Some(default.clone())
                    }
                }
                ParameterKind::Rest => {
                    let taken: Vec<Value> = cursor.by_ref().take(spare).collect();
                    spare = 0;
                    if name.is_none() {
                        bindings.splat = taken;
                        continue;
                    }
                    Some(Value::Array(taken))
                }
                ParameterKind::KeyRequired => {
                    let key = name.as_deref().unwrap_or_default();
                    let found = named.shift_remove(key);
                    if found.is_none() {
                        missing.push(key.to_string());
                    }
                    found
                }
                ParameterKind::KeyOptional(default) => {
                    let key = name.as_deref().unwrap_or_default();
                    Some(named.shift_remove(key).unwrap_or_else(|| default.clone()))
                }
                ParameterKind::KeyRest => {
                    // Se resuelve al final, cuando ya se han consumido los fijos.
                    keyrest = Some(name);
                    continue;
                }
                ParameterKind::Block => None,
            };
            if let (Some(name), Some(value)) = (name, value) {
                bindings.values.insert(name, value);
            }
        }

        if !missing.is_empty() {
            return Err(ArgumentError::MissingKeywords(missing));
        }

        match keyrest {
            Some(Some(name)) => {
                let rest: Map<String, Value> = named.into_iter().collect();
                bindings.values.insert(name, Value::Object(rest));
            }
            Some(None) => bindings.double_splat = named,
            None if !named.is_empty() => {
                return Err(ArgumentError::UnknownKeywords(named.into_keys().collect()));
            }
            None => {}
        }

        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_shape() -> ParameterShape {
        ParameterShape::new().required("one")
                             .optional("two", "two")
                             .rest("three")
                             .keyword("four")
                             .keyword_or("five", 5)
                             .keyrest("six")
                             .block("seven")
    }

    #[test]
    fn binds_every_parameter_kind() {
        let args = Arguments::new().positional("one")
                                   .positional("c")
                                   .positional("d")
                                   .named("four", 4)
                                   .named("six", 6)
                                   .block(|_| json!("test"));
        let b = full_shape().bind(&args).unwrap();
        assert_eq!(b.get("one"), Some(&json!("one")));
        assert_eq!(b.get("two"), Some(&json!("c")));
        assert_eq!(b.get("three"), Some(&json!(["d"])));
        assert_eq!(b.get("four"), Some(&json!(4)));
        assert_eq!(b.get("five"), Some(&json!(5)));
        assert_eq!(b.get("six"), Some(&json!({"six": 6})));
        assert_eq!(b.block().map(|f| f.call(&[])), Some(json!("test")));
    }

    #[test]
    fn optional_falls_back_to_default() {
        let args = Arguments::new().positional(1).named("four", 4);
        let b = full_shape().bind(&args).unwrap();
        assert_eq!(b.get("two"), Some(&json!("two")));
        assert_eq!(b.get("three"), Some(&json!([])));
    }

    #[test]
    fn named_fold_into_rest_without_keyword_parameters() {
        let shape = ParameterShape::new().rest("any");
        let args = Arguments::new().positional("one").positional("two").named("eins", 1);
        let b = shape.bind(&args).unwrap();
        assert_eq!(b.get("any"), Some(&json!(["one", "two", {"eins": 1}])));
    }

    #[test]
    fn arity_errors() {
        let shape = ParameterShape::new().required("x");
        assert_eq!(shape.bind(&Arguments::new()).unwrap_err(),
                   ArgumentError::Arity { given: 0, expected: "1".into() });
        let err = shape.bind(&Arguments::new().positional(1).positional(2)).unwrap_err();
        assert!(matches!(err, ArgumentError::Arity { given: 2, .. }));
    }

    #[test]
    fn keyword_errors() {
        let shape = ParameterShape::new().keyword("four");
        assert_eq!(shape.bind(&Arguments::new()).unwrap_err(), ArgumentError::MissingKeywords(vec!["four".into()]));
        let err = shape.bind(&Arguments::new().named("four", 4).named("x", 1)).unwrap_err();
        assert_eq!(err, ArgumentError::UnknownKeywords(vec!["x".into()]));
    }

    #[test]
    fn anonymous_parameters_are_kept_for_forwarding() {
        let b = ParameterShape::forwarding().bind(&Arguments::new().positional(1).named("a", 1)).unwrap();
        assert!(b.is_empty());
        let forwarded = b.anonymous_arguments();
        assert_eq!(forwarded.positionals, vec![json!(1)]);
        assert_eq!(forwarded.named.get("a"), Some(&json!(1)));
    }
}
