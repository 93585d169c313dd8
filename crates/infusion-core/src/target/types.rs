//! Tipos destino: descriptor inmutable de un tipo construible.
//!
//! Un `TargetType` guarda la cabeza de su cadena de inicialización, los
//! pasos de pre-relleno que corren antes de asignar la instancia y la tabla
//! de readers. Nunca se muta: aplicar un `Injector` produce un tipo nuevo que
//! envuelve al anterior.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;

use super::instance::Instance;
use super::scope::Scope;
use crate::arguments::Arguments;
use crate::chain::{self, Handwritten, InitStep, Initializer, Invocation};
use crate::dependency::DependencyKey;
use crate::errors::{InfuseError, InstantiationError};
use crate::injection::{Injector, Prefill};
use crate::shape::ParameterShape;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

fn next_type_id() -> u64 { NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed) }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Tipo instanciable.
    Class,
    /// Sólo aporta inicializadores para incluir en clases.
    Mixin,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("Class"),
            Self::Mixin => f.write_str("Mixin"),
        }
    }
}

/// Reader generado para una key. `owner` es el tipo que lo definió.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reader {
    pub scope: Scope,
    owner: u64,
}

struct TypeInner {
    id: u64,
    name: String,
    kind: TypeKind,
    lineage: Vec<u64>,
    own: Vec<Arc<dyn Initializer>>,
    head: Option<Arc<InitStep>>,
    prefills: Vec<Arc<Prefill>>,
    readers: IndexMap<DependencyKey, Reader>,
}

#[derive(Clone)]
pub struct TargetType {
    inner: Arc<TypeInner>,
}

impl TargetType {
    pub fn class(name: impl Into<String>) -> TypeBuilder { TypeBuilder::new(name, TypeKind::Class) }

    pub fn mixin(name: impl Into<String>) -> TypeBuilder { TypeBuilder::new(name, TypeKind::Mixin) }

    /// Atajo para `class(name).inherit(parent)`.
    pub fn subclass(name: impl Into<String>, parent: &TargetType) -> TypeBuilder { Self::class(name).inherit(parent) }

    pub fn name(&self) -> &str { &self.inner.name }

    pub fn kind(&self) -> TypeKind { self.inner.kind }

    pub fn is_instantiable(&self) -> bool { self.inner.kind == TypeKind::Class }

    /// `true` si `self` es `other` o desciende de él.
    pub fn is_a(&self, other: &TargetType) -> bool { self.inner.lineage.contains(&other.inner.id) }

    pub fn head(&self) -> Option<&InitStep> { self.inner.head.as_deref() }

    /// Etiquetas de la cadena de inicialización, de la cabeza a la raíz.
    pub fn chain_labels(&self) -> Vec<String> { self.head().map(InitStep::labels).unwrap_or_default() }

    pub fn reader(&self, key: &str) -> Option<&Reader> { self.inner.readers.get(key) }

    pub fn readers(&self) -> impl Iterator<Item = (&DependencyKey, &Reader)> { self.inner.readers.iter() }

    pub(crate) fn defines(&self, reader: &Reader) -> bool { self.inner.lineage.contains(&reader.owner) }

    /// Construye una instancia: primero los pre-rellenos (del más reciente
    /// al más antiguo), luego la cadena de inicialización.
    pub fn instantiate(&self, args: Arguments) -> Result<Instance, InstantiationError> {
        if !self.is_instantiable() {
            return Err(InstantiationError::NotInstantiable { name: self.name().to_string() });
        }
        let mut args = args;
        for prefill in self.inner.prefills.iter().rev() {
            prefill.fill(&mut args.named)?;
        }
        let mut instance = Instance::new(self.clone());
        chain::invoke(self.head(), &mut instance, args)?;
        Ok(instance)
    }

    pub fn new_instance(&self) -> Result<Instance, InstantiationError> { self.instantiate(Arguments::new()) }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
         .field("name", &self.inner.name)
         .field("kind", &self.inner.kind)
         .field("chain", &self.chain_labels())
         .finish()
    }
}

/// Builder de `TargetType`. Las capas se apilan en orden de declaración: la
/// última declarada es la primera en ejecutarse.
pub struct TypeBuilder {
    id: u64,
    name: String,
    kind: TypeKind,
    lineage: Vec<u64>,
    own: Vec<Arc<dyn Initializer>>,
    head: Option<Arc<InitStep>>,
    prefills: Vec<Arc<Prefill>>,
    readers: IndexMap<DependencyKey, Reader>,
}

impl TypeBuilder {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let id = next_type_id();
        Self { id,
               name: name.into(),
               kind,
               lineage: vec![id],
               own: Vec::new(),
               head: None,
               prefills: Vec::new(),
               readers: IndexMap::new() }
    }

    /// Continúa a partir de un tipo existente (mismo nombre, nueva identidad
    /// que desciende de él).
    pub fn extend(target: &TargetType) -> Self {
        let id = next_type_id();
        let inner = &target.inner;
        let mut lineage = vec![id];
        lineage.extend(inner.lineage.iter().copied());
        Self { id,
               name: inner.name.clone(),
               kind: inner.kind,
               lineage,
               own: inner.own.clone(),
               head: inner.head.clone(),
               prefills: inner.prefills.clone(),
               readers: inner.readers.clone() }
    }

    /// Hereda cadena, pre-rellenos y readers de `parent`.
    ///
    /// Los pasos ya declarados en el builder se vuelven a enlazar, en el mismo
    /// orden, encima de la cadena del padre.
    pub fn inherit(mut self, parent: &TargetType) -> Self {
        let inner = &parent.inner;
        let included: Vec<u64> = self.lineage.drain(1..).collect();
        self.lineage.extend(inner.lineage.iter().copied());
        self.lineage.extend(included);

        let declared = std::mem::take(&mut self.own);
        self.head = inner.head.clone();
        for initializer in declared {
            let rebased = initializer.rebase(self.head.as_deref()).unwrap_or(initializer);
            self.push(rebased);
        }

        let mut prefills = inner.prefills.clone();
        prefills.append(&mut self.prefills);
        self.prefills = prefills;

        let mut readers = inner.readers.clone();
        readers.extend(std::mem::take(&mut self.readers));
        self.readers = readers;
        self
    }

    /// Incluye los inicializadores propios de un mixin.
    pub fn include(mut self, mixin: &TargetType) -> Self {
        for initializer in &mixin.inner.own {
            self.push(Arc::clone(initializer));
        }
        self.lineage.push(mixin.inner.id);
        self
    }

    /// Declara un inicializador escrito a mano.
    pub fn initializer<F>(self, shape: ParameterShape, body: F) -> Self
        where F: Fn(&mut Instance, &Invocation<'_>) -> Result<(), InstantiationError> + Send + Sync + 'static
    {
        let label = self.name.clone();
        self.layer(Arc::new(Handwritten::new(label, shape, body)))
    }

    /// Apila un `Initializer` arbitrario.
    pub fn layer(mut self, initializer: Arc<dyn Initializer>) -> Self {
        self.push(initializer);
        self
    }

    /// Aplica un `Injector` sobre el estado actual del builder.
    pub fn infuse(mut self, injector: &Injector) -> Result<Self, InfuseError> {
        if self.kind != TypeKind::Class {
            return Err(InfuseError::UnsupportedTarget { name: self.name.clone(), kind: self.kind.to_string() });
        }
        let (layer, prefill) = injector.layer_for(self.head.as_deref());
        debug!("infusing {:?} into {} at {} scope",
               injector.dependencies().keys().iter().map(DependencyKey::as_str).collect::<Vec<_>>(),
               self.name,
               injector.scope());
        self.push(layer);
        self.prefills.push(prefill);
        for key in injector.dependencies().keys() {
            self.readers.insert(key.clone(), Reader { scope: injector.scope(), owner: self.id });
        }
        Ok(self)
    }

    pub fn build(self) -> TargetType {
        TargetType { inner: Arc::new(TypeInner { id: self.id,
                                                 name: self.name,
                                                 kind: self.kind,
                                                 lineage: self.lineage,
                                                 own: self.own,
                                                 head: self.head,
                                                 prefills: self.prefills,
                                                 readers: self.readers }) }
    }

    fn push(&mut self, initializer: Arc<dyn Initializer>) {
        self.own.push(Arc::clone(&initializer));
        self.head = Some(InitStep::link(initializer, self.head.take()));
    }
}
