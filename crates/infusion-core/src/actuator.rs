//! `Actuator`: asocia un container a la construcción de `Injector`s.
//!
//! Las tres entradas sólo difieren en el scope de los readers generados.
//!
//! ```ignore
//! let import = Actuator::new(json!({"a": 1, "b": 2}));
//! let plain = import.inject(["a"])?;      // scope por defecto (private)
//! let open = import.public(["a", "b"])?;
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::container::Container;
use crate::dependency::Entry;
use crate::errors::DependencyError;
use crate::injection::Injector;
use crate::target::Scope;

#[derive(Clone)]
pub struct Actuator {
    container: Arc<dyn Container>,
    default_scope: Scope,
    name_pattern: Option<Regex>,
}

impl Actuator {
    pub fn new<C: Container + 'static>(container: C) -> Self { Self::shared(Arc::new(container)) }

    pub fn shared(container: Arc<dyn Container>) -> Self {
        Self { container, default_scope: Scope::Private, name_pattern: None }
    }

    /// Scope usado por `inject`.
    pub fn with_default_scope(mut self, scope: Scope) -> Self {
        self.default_scope = scope;
        self
    }

    /// Patrón de nombre para derivar keys en lugar del de por defecto.
    pub fn with_name_pattern(mut self, pattern: Regex) -> Self {
        self.name_pattern = Some(pattern);
        self
    }

    pub fn container(&self) -> &Arc<dyn Container> { &self.container }

    pub fn default_scope(&self) -> Scope { self.default_scope }

    pub fn inject<I, E>(&self, configuration: I) -> Result<Injector, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        self.build(configuration, self.default_scope)
    }

    pub fn public<I, E>(&self, configuration: I) -> Result<Injector, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        self.build(configuration, Scope::Public)
    }

    pub fn protected<I, E>(&self, configuration: I) -> Result<Injector, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        self.build(configuration, Scope::Protected)
    }

    /// Scope por nombre; un nombre desconocido degrada a `private`.
    pub fn scoped<I, E>(&self, configuration: I, scope: &str) -> Result<Injector, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        self.build(configuration, Scope::parse(scope))
    }

    fn build<I, E>(&self, configuration: I, scope: Scope) -> Result<Injector, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        let container = Arc::clone(&self.container);
        match &self.name_pattern {
            Some(pattern) => Injector::with_pattern(container, configuration, scope, pattern),
            None => Injector::new(container, configuration, scope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_points_only_differ_in_scope() {
        let import = Actuator::new(json!({"a": 1}));
        assert_eq!(import.inject(["a"]).unwrap().scope(), Scope::Private);
        assert_eq!(import.public(["a"]).unwrap().scope(), Scope::Public);
        assert_eq!(import.protected(["a"]).unwrap().scope(), Scope::Protected);
        assert_eq!(import.scoped(["a"], "bogus").unwrap().scope(), Scope::Private);
    }

    #[test]
    fn default_scope_is_configurable() {
        let import = Actuator::new(json!({"a": 1})).with_default_scope(Scope::Public);
        assert_eq!(import.inject(["a"]).unwrap().scope(), Scope::Public);
    }

    #[test]
    fn configuration_errors_surface_immediately() {
        let import = Actuator::new(json!({}));
        assert!(matches!(import.inject(["a", "a"]), Err(DependencyError::DuplicateDependency { .. })));
    }
}
