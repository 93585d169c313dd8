//! Descriptor explícito de la forma de parámetros de un inicializador.
//!
//! Cada inicializador declara su `ParameterShape` una vez, al registrarse en
//! el tipo, y el algoritmo de merge decide la estrategia de reenvío a partir
//! de ella.

use serde_json::Value;

use crate::arguments::Named;
use crate::dependency::DependencyKey;

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    Required,
    Optional(Value),
    Rest,
    KeyRequired,
    KeyOptional(Value),
    KeyRest,
    Block,
}

/// Un parámetro declarado. `name == None` indica un reenvío anónimo.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub kind: ParameterKind,
    pub name: Option<String>,
}

impl Parameter {
    fn named(kind: ParameterKind, name: impl Into<String>) -> Self { Self { kind, name: Some(name.into()) } }

    fn anonymous(kind: ParameterKind) -> Self { Self { kind, name: None } }

    pub fn is_keyword(&self) -> bool {
        matches!(self.kind, ParameterKind::KeyRequired | ParameterKind::KeyOptional(_) | ParameterKind::KeyRest)
    }

    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ParameterKind::Required | ParameterKind::Optional(_) | ParameterKind::Rest)
    }
}

/// Estrategia de reenvío hacia el siguiente inicializador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarding {
    /// Sólo un rest posicional con nombre: se reenvía todo tal cual.
    Splat,
    /// Hay parámetros posicionales: posicionales intactos, nombrados filtrados.
    Positional,
    /// Sólo nombrados: se descartan posicionales, nombrados filtrados.
    Named,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterShape {
    parameters: Vec<Parameter>,
}

impl ParameterShape {
    /// Forma vacía (`initialize()` o la raíz implícita).
    pub fn new() -> Self { Self::default() }

    /// Reenvío anónimo completo (`*, **, &`).
    pub fn forwarding() -> Self { Self::new().anonymous_rest().anonymous_keyrest().anonymous_block() }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::Required, name));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::Optional(default.into()), name));
        self
    }

    pub fn rest(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::Rest, name));
        self
    }

    pub fn anonymous_rest(mut self) -> Self {
        self.parameters.push(Parameter::anonymous(ParameterKind::Rest));
        self
    }

    pub fn keyword(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::KeyRequired, name));
        self
    }

    pub fn keyword_or(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::KeyOptional(default.into()), name));
        self
    }

    pub fn keyrest(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::KeyRest, name));
        self
    }

    pub fn anonymous_keyrest(mut self) -> Self {
        self.parameters.push(Parameter::anonymous(ParameterKind::KeyRest));
        self
    }

    pub fn block(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::named(ParameterKind::Block, name));
        self
    }

    pub fn anonymous_block(mut self) -> Self {
        self.parameters.push(Parameter::anonymous(ParameterKind::Block));
        self
    }

    pub fn parameters(&self) -> &[Parameter] { &self.parameters }

    pub fn is_empty(&self) -> bool { self.parameters.is_empty() }

    /// Sólo reenvíos anónimos (`*`, `**`, `&`) con al menos un splat. Estas
    /// formas no aportan información y se saltan al resolver la cadena.
    pub fn is_pass_through(&self) -> bool {
        let has_splat = self.parameters
                            .iter()
                            .any(|p| matches!(p.kind, ParameterKind::Rest | ParameterKind::KeyRest));
        has_splat
        && self.parameters.iter().all(|p| {
                                    p.name.is_none()
                                    && matches!(p.kind, ParameterKind::Rest | ParameterKind::KeyRest | ParameterKind::Block)
                                })
    }

    /// Únicamente un rest posicional (y opcionalmente el bloque).
    pub fn is_only_rest(&self) -> bool {
        self.parameters.iter().any(|p| p.kind == ParameterKind::Rest)
        && self.parameters.iter().all(|p| matches!(p.kind, ParameterKind::Rest | ParameterKind::Block))
    }

    pub fn has_positionals(&self) -> bool { self.parameters.iter().any(Parameter::is_positional) }

    pub fn accepts_keywords(&self) -> bool { self.parameters.iter().any(Parameter::is_keyword) }

    pub fn has_keyrest(&self) -> bool { self.parameters.iter().any(|p| p.kind == ParameterKind::KeyRest) }

    /// `true` si `name` es un parámetro nombrado fijo (requerido u opcional).
    pub fn declares_keyword(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| {
                                   matches!(p.kind, ParameterKind::KeyRequired | ParameterKind::KeyOptional(_))
                                   && p.name.as_deref() == Some(name)
                               })
    }

    pub fn forwarding_strategy(&self) -> Forwarding {
        if self.is_only_rest() {
            Forwarding::Splat
        } else if self.has_positionals() {
            Forwarding::Positional
        } else {
            Forwarding::Named
        }
    }

    /// Filtra los nombrados que se reenvían a un inicializador con esta forma.
    ///
    /// Se conservan los nombrados declarados por la forma. El resto sólo pasa
    /// si `accepts_any` (el siguiente paso tiene un catch-all nombrado) y no
    /// es una de las `keys` que inyecta la capa actual.
    pub fn keywords_for(&self, keys: &[DependencyKey], named: &Named, accepts_any: bool) -> Named {
        named.iter()
             .filter(|(name, _)| {
                 self.declares_keyword(name) || (accepts_any && !keys.iter().any(|k| k.as_str() == name.as_str()))
             })
             .map(|(name, value)| (name.clone(), value.clone()))
             .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(names: &[&str]) -> Vec<DependencyKey> { names.iter().map(|n| DependencyKey::from(*n)).collect() }

    #[test]
    fn anonymous_splats_are_pass_through() {
        assert!(ParameterShape::new().anonymous_rest().is_pass_through());
        assert!(ParameterShape::new().anonymous_keyrest().is_pass_through());
        assert!(ParameterShape::forwarding().is_pass_through());
        assert!(!ParameterShape::new().rest("any").is_pass_through());
        assert!(!ParameterShape::new().is_pass_through());
        assert!(!ParameterShape::new().anonymous_block().is_pass_through());
    }

    #[test]
    fn forwarding_strategy_by_shape() {
        assert_eq!(ParameterShape::new().rest("any").forwarding_strategy(), Forwarding::Splat);
        assert_eq!(ParameterShape::new().required("x").forwarding_strategy(), Forwarding::Positional);
        assert_eq!(ParameterShape::new().rest("r").keyword("k").forwarding_strategy(), Forwarding::Positional);
        assert_eq!(ParameterShape::new().keyword_or("eins", "unknown").keyrest("rest").forwarding_strategy(),
                   Forwarding::Named);
        assert_eq!(ParameterShape::new().forwarding_strategy(), Forwarding::Named);
    }

    #[test]
    fn keywords_for_keeps_declared_and_drops_own_keys() {
        let shape = ParameterShape::new().keyword_or("eins", "unknown").keyrest("rest");
        let mut named = Named::new();
        named.insert("eins".into(), json!("one"));
        named.insert("zwei".into(), json!(2));
        named.insert("c".into(), json!(3));

        let out = shape.keywords_for(&keys(&["eins", "zwei"]), &named, true);
        assert_eq!(out.keys().collect::<Vec<_>>(), ["eins", "c"]);
    }

    #[test]
    fn keywords_for_without_catch_all_is_exactly_declared() {
        let shape = ParameterShape::new().required("x").keyword("four");
        let mut named = Named::new();
        named.insert("four".into(), json!(4));
        named.insert("other".into(), json!(0));
        named.insert("a".into(), json!(1));

        let out = shape.keywords_for(&keys(&["a"]), &named, false);
        assert_eq!(out.keys().collect::<Vec<_>>(), ["four"]);
    }
}
