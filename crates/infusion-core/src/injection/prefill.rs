//! Pre-relleno en tiempo de asignación.
//!
//! Antes de construir la instancia, cada key declarada que no haya llegado
//! como argumento nombrado se resuelve contra el container. Lo que aporta el
//! llamador siempre gana.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::trace;
use serde_json::Value;

use crate::arguments::Named;
use crate::container::Container;
use crate::dependency::{DependencyKey, Identifier};
use crate::errors::ResolveError;

pub struct Prefill {
    container: Arc<dyn Container>,
    table: Arc<IndexMap<DependencyKey, Identifier>>,
}

impl Prefill {
    pub(crate) fn new(container: Arc<dyn Container>, table: Arc<IndexMap<DependencyKey, Identifier>>) -> Self {
        Self { container, table }
    }

    /// Completa `named` con las keys que falten.
    pub fn fill(&self, named: &mut Named) -> Result<(), ResolveError> {
        for (key, identifier) in self.table.iter() {
            if named.contains_key(key.as_str()) {
                continue;
            }
            let value = self.resolve(key, identifier)?;
            named.insert(key.to_string(), value);
        }
        Ok(())
    }

    /// Resuelve una key concreta contra el container.
    pub fn resolve_key(&self, key: &DependencyKey) -> Result<Value, ResolveError> {
        match self.table.get(key) {
            Some(identifier) => self.resolve(key, identifier),
            None => Err(ResolveError::NotFound { identifier: format!(":{key}") }),
        }
    }

    fn resolve(&self, key: &DependencyKey, identifier: &Identifier) -> Result<Value, ResolveError> {
        trace!("resolving {} for :{key}", identifier.inspect());
        self.container.resolve(identifier)
    }
}

impl fmt::Debug for Prefill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefill").field("table", &self.table).finish_non_exhaustive()
    }
}
