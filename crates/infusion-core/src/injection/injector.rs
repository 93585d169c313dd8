//! `Injector`: aumento reutilizable que, aplicado a un tipo, le suministra
//! dependencias del container en cada construcción.
//!
//! Al aplicarse genera dos unidades independientes por tipo destino:
//! - un `Prefill` que rellena los nombrados ausentes antes de asignar;
//! - una `InfusionLayer` enlazada delante de la cadena de inicialización.
//!
//! Ambas capturan datos inmutables (container, tabla congelada), por lo que
//! aplicar el mismo `Injector` a varios tipos no comparte estado mutable.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use super::layer::InfusionLayer;
use super::prefill::Prefill;
use crate::chain::{InitStep, Initializer};
use crate::container::Container;
use crate::dependency::{DependencyKey, DependencyMap, Entry, Identifier};
use crate::errors::{DependencyError, InfuseError};
use crate::target::{Scope, TargetType, TypeBuilder};

#[derive(Clone)]
pub struct Injector {
    container: Arc<dyn Container>,
    dependencies: Arc<DependencyMap>,
    keys: Arc<[DependencyKey]>,
    table: Arc<IndexMap<DependencyKey, Identifier>>,
    scope: Scope,
}

impl Injector {
    pub fn new<I, E>(container: Arc<dyn Container>, configuration: I, scope: Scope) -> Result<Self, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        Ok(Self::from_map(container, DependencyMap::build(configuration)?, scope))
    }

    /// Igual que `new` con un patrón de nombre propio.
    pub fn with_pattern<I, E>(container: Arc<dyn Container>, configuration: I, scope: Scope, name_pattern: &Regex)
                              -> Result<Self, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        Ok(Self::from_map(container, DependencyMap::build_with_pattern(configuration, name_pattern)?, scope))
    }

    pub fn from_map(container: Arc<dyn Container>, dependencies: DependencyMap, scope: Scope) -> Self {
        debug!("built injector for {:?} ({scope})",
               dependencies.keys().iter().map(DependencyKey::as_str).collect::<Vec<_>>());
        let keys: Arc<[DependencyKey]> = dependencies.keys().into();
        let table = Arc::new(dependencies.table().clone());
        Self { container, dependencies: Arc::new(dependencies), keys, table, scope }
    }

    pub fn dependencies(&self) -> &DependencyMap { &self.dependencies }

    pub fn keys(&self) -> &[DependencyKey] { &self.keys }

    pub fn scope(&self) -> Scope { self.scope }

    pub fn container(&self) -> &Arc<dyn Container> { &self.container }

    /// Aplica el aumento y devuelve un tipo nuevo que envuelve a `target`.
    ///
    /// Falla con `UnsupportedTarget` si `target` no es instanciable.
    pub fn apply(&self, target: &TargetType) -> Result<TargetType, InfuseError> {
        Ok(TypeBuilder::extend(target).infuse(self)?.build())
    }

    /// Unidades generadas para una aplicación sobre la cadena `head`.
    pub(crate) fn layer_for(&self, head: Option<&InitStep>) -> (Arc<dyn Initializer>, Arc<Prefill>) {
        let prefill = Arc::new(Prefill::new(Arc::clone(&self.container), Arc::clone(&self.table)));
        let layer: Arc<dyn Initializer> = Arc::new(InfusionLayer::new(Arc::clone(&self.keys), head, Arc::clone(&prefill)));
        (layer, prefill)
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
         .field("dependencies", &self.dependencies)
         .field("scope", &self.scope)
         .finish_non_exhaustive()
    }
}
