//! `Registry`: container concurrente de valores, factorías y factorías
//! memoizadas.
//!
//! Las entradas se guardan en un `DashMap`, por lo que se puede registrar y
//! resolver desde varios hilos sin bloqueo global. Las factorías se evalúan
//! fuera del lock del mapa: una factoría puede resolver otras entradas del
//! mismo registro.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use infusion_core::constants::NAMESPACE_SEPARATOR;
use infusion_core::container::not_found;
use infusion_core::{Container, Identifier, ResolveError};
use log::{debug, trace};
use once_cell::sync::OnceCell;
use serde_json::Value;

type Factory = Arc<dyn Fn() -> Result<Value, String> + Send + Sync>;

#[derive(Clone)]
enum Registration {
    Value(Value),
    Factory(Factory),
    Memoized { factory: Factory, cell: Arc<OnceCell<Value>> },
}

impl Registration {
    fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Factory(_) => "factory",
            Self::Memoized { .. } => "memoized",
        }
    }
}

#[derive(Default)]
pub struct Registry {
    entries: DashMap<String, Registration>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }

    /// Registra un valor fijo. Reemplaza cualquier entrada previa.
    pub fn register(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.insert(key.into(), Registration::Value(value.into()))
    }

    /// Registra una factoría evaluada en cada resolución.
    pub fn register_with<F>(&self, key: impl Into<String>, factory: F) -> &Self
        where F: Fn() -> Value + Send + Sync + 'static
    {
        self.insert(key.into(), Registration::Factory(Arc::new(move || Ok(factory()))))
    }

    /// Factoría que puede fallar; el error llega como `ResolveError::Failed`.
    pub fn register_fallible<F>(&self, key: impl Into<String>, factory: F) -> &Self
        where F: Fn() -> Result<Value, String> + Send + Sync + 'static
    {
        self.insert(key.into(), Registration::Factory(Arc::new(factory)))
    }

    /// Factoría evaluada como mucho una vez con éxito; las resoluciones
    /// siguientes devuelven el mismo valor.
    pub fn register_memoized<F>(&self, key: impl Into<String>, factory: F) -> &Self
        where F: Fn() -> Value + Send + Sync + 'static
    {
        self.insert(key.into(),
                    Registration::Memoized { factory: Arc::new(move || Ok(factory())), cell: Arc::new(OnceCell::new()) })
    }

    /// Vista que registra bajo `prefix.`.
    pub fn namespace(&self, prefix: impl Into<String>) -> Namespace<'_> {
        Namespace { registry: self, prefix: prefix.into() }
    }

    pub fn unregister(&self, key: &str) -> bool { self.entries.remove(key).is_some() }

    pub fn contains_key(&self, key: &str) -> bool { self.entries.contains_key(key) }

    /// Keys registradas, ordenadas.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn insert(&self, key: String, registration: Registration) -> &Self {
        debug!("registry: {key} registered as {}", registration.kind());
        self.entries.insert(key, registration);
        self
    }

    fn evaluate(identifier: &Identifier, registration: Registration) -> Result<Value, ResolveError> {
        let failed = |reason: String| ResolveError::Failed { identifier: identifier.inspect(), reason };
        match registration {
            Registration::Value(value) => Ok(value),
            Registration::Factory(factory) => factory().map_err(failed),
            Registration::Memoized { factory, cell } => cell.get_or_try_init(|| factory()).cloned().map_err(failed),
        }
    }
}

impl Container for Registry {
    fn resolve(&self, identifier: &Identifier) -> Result<Value, ResolveError> {
        // se clona la entrada para soltar el lock antes de evaluar
        let registration = self.entries
                               .get(identifier.as_str())
                               .map(|entry| entry.value().clone())
                               .ok_or_else(|| not_found(identifier))?;
        trace!("registry: resolving {identifier} ({})", registration.kind());
        Self::evaluate(identifier, registration)
    }

    fn contains(&self, identifier: &Identifier) -> bool { self.contains_key(identifier.as_str()) }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_struct("Registry").field("keys", &self.keys()).finish() }
}

/// Registro con prefijo de namespace. Se pueden anidar.
pub struct Namespace<'a> {
    registry: &'a Registry,
    prefix: String,
}

impl<'a> Namespace<'a> {
    pub fn prefix(&self) -> &str { &self.prefix }

    pub fn register(&self, key: &str, value: impl Into<Value>) -> &Self {
        self.registry.register(self.qualify(key), value);
        self
    }

    pub fn register_with<F>(&self, key: &str, factory: F) -> &Self
        where F: Fn() -> Value + Send + Sync + 'static
    {
        self.registry.register_with(self.qualify(key), factory);
        self
    }

    pub fn register_memoized<F>(&self, key: &str, factory: F) -> &Self
        where F: Fn() -> Value + Send + Sync + 'static
    {
        self.registry.register_memoized(self.qualify(key), factory);
        self
    }

    pub fn namespace(&self, child: &str) -> Namespace<'a> { Namespace { registry: self.registry, prefix: self.qualify(child) } }

    fn qualify(&self, key: &str) -> String { format!("{}{NAMESPACE_SEPARATOR}{key}", self.prefix) }
}
