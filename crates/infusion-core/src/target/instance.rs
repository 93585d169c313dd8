//! Instancias construidas a partir de un `TargetType`.
//!
//! Los valores inyectados viven en una estructura lateral (`dependencies`)
//! separada de los campos propios que asignan los inicializadores escritos a
//! mano.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::scope::Scope;
use super::types::TargetType;
use crate::constants::INFUSED_KEYS;
use crate::dependency::DependencyKey;
use crate::errors::AccessError;

#[derive(Debug, Clone)]
pub struct Instance {
    target: TargetType,
    fields: IndexMap<String, Value>,
    dependencies: IndexMap<DependencyKey, Value>,
    infused_keys: Option<Arc<[DependencyKey]>>,
    layers: Vec<Arc<[DependencyKey]>>,
}

impl Instance {
    pub(crate) fn new(target: TargetType) -> Self {
        Self { target,
               fields: IndexMap::new(),
               dependencies: IndexMap::new(),
               infused_keys: None,
               layers: Vec::new() }
    }

    pub fn target(&self) -> &TargetType { &self.target }

    pub fn field(&self, name: &str) -> Option<&Value> { self.fields.get(name) }

    pub fn fields(&self) -> &IndexMap<String, Value> { &self.fields }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Acceso interno a una dependencia, sin importar el scope del reader.
    pub fn dependency(&self, key: &str) -> Option<&Value> { self.dependencies.get(key) }

    pub fn dependencies(&self) -> &IndexMap<DependencyKey, Value> { &self.dependencies }

    pub fn has_dependency(&self, key: &str) -> bool { self.dependencies.contains_key(key) }

    /// Keys de la capa que registró primero (la más cercana a la
    /// instanciación). Vacío si ninguna capa inyectó.
    pub fn infused_keys(&self) -> &[DependencyKey] { self.infused_keys.as_deref().unwrap_or(&[]) }

    /// Keys de cada capa en orden de ejecución.
    pub fn layer_keys(&self) -> &[Arc<[DependencyKey]>] { &self.layers }

    /// Lectura desde fuera: sólo readers públicos.
    pub fn read(&self, key: &str) -> Result<&Value, AccessError> {
        let reader = self.lookup_reader(key)?;
        match reader.scope {
            Scope::Public => self.value_of(key),
            Scope::Protected => Err(AccessError::Protected { name: key.to_string(), type_name: self.type_name() }),
            Scope::Private => Err(AccessError::Private { name: key.to_string(), type_name: self.type_name() }),
        }
    }

    /// Lectura desde otra instancia: los readers protegidos responden cuando
    /// el tipo de `caller` desciende del tipo que definió el reader.
    pub fn read_from(&self, caller: &Instance, key: &str) -> Result<&Value, AccessError> {
        let reader = self.lookup_reader(key)?;
        match reader.scope {
            Scope::Public => self.value_of(key),
            Scope::Protected if caller.target.defines(reader) => self.value_of(key),
            Scope::Protected => Err(AccessError::Protected { name: key.to_string(), type_name: self.type_name() }),
            Scope::Private => Err(AccessError::Private { name: key.to_string(), type_name: self.type_name() }),
        }
    }

    /// Estado serializado para introspección.
    pub fn snapshot(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), Value::String(self.target.name().to_string()));
        out.insert(INFUSED_KEYS.into(),
                   Value::Array(self.infused_keys().iter().map(|k| Value::String(k.to_string())).collect()));
        out.insert("dependencies".into(),
                   Value::Object(self.dependencies.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()));
        out.insert("fields".into(), Value::Object(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect()));
        Value::Object(out)
    }

    pub(crate) fn set_dependency(&mut self, key: DependencyKey, value: Value) { self.dependencies.insert(key, value); }

    /// Registra las keys de una capa. Sólo la primera queda como canónica.
    pub(crate) fn record_layer(&mut self, keys: Arc<[DependencyKey]>) {
        if self.infused_keys.is_none() {
            self.infused_keys = Some(Arc::clone(&keys));
        }
        self.layers.push(keys);
    }

    fn lookup_reader(&self, key: &str) -> Result<&super::types::Reader, AccessError> {
        self.target
            .reader(key)
            .ok_or_else(|| AccessError::Undefined { name: key.to_string(), type_name: self.type_name() })
    }

    fn value_of(&self, key: &str) -> Result<&Value, AccessError> {
        self.dependencies
            .get(key)
            .ok_or_else(|| AccessError::Undefined { name: key.to_string(), type_name: self.type_name() })
    }

    fn type_name(&self) -> String { self.target.name().to_string() }
}
