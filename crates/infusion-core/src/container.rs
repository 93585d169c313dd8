//! Contrato del container consumido por el núcleo.
//!
//! Cualquier tabla `clave -> valor` sirve como container. La resolución debe
//! ser segura para lecturas concurrentes: un mismo tipo aumentado puede
//! instanciarse desde varios hilos a la vez.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::dependency::Identifier;
use crate::errors::ResolveError;

pub trait Container: Send + Sync {
    /// Resuelve `identifier`. Los errores se propagan sin tocar al llamador
    /// de la construcción.
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError>;

    fn contains(&self, identifier: &Identifier) -> bool { self.resolve(identifier).is_ok() }
}

pub fn not_found(identifier: &Identifier) -> ResolveError {
    ResolveError::NotFound { identifier: identifier.inspect() }
}

impl<S: BuildHasher + Send + Sync> Container for HashMap<String, Value, S> {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> {
        self.get(identifier.as_str()).cloned().ok_or_else(|| not_found(identifier))
    }
}

impl Container for IndexMap<String, Value> {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> {
        self.get(identifier.as_str()).cloned().ok_or_else(|| not_found(identifier))
    }
}

impl Container for Map<String, Value> {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> {
        self.get(identifier.as_str()).cloned().ok_or_else(|| not_found(identifier))
    }
}

/// Un `Value` sólo resuelve si es un objeto JSON.
impl Container for Value {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> {
        match self {
            Value::Object(map) => map.resolve(identifier),
            _ => Err(not_found(identifier)),
        }
    }
}

impl<C: Container + ?Sized> Container for Arc<C> {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> { (**self).resolve(identifier) }
}

impl<C: Container + ?Sized> Container for Box<C> {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> { (**self).resolve(identifier) }
}
