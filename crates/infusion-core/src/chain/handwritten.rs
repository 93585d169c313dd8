//! Inicializadores escritos a mano.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::step::{self, InitStep, Initializer};
use crate::arguments::Arguments;
use crate::errors::InstantiationError;
use crate::shape::{Bindings, ParameterShape};
use crate::target::Instance;

/// Cuerpo de un inicializador escrito a mano.
pub type InitBody = dyn Fn(&mut Instance, &Invocation<'_>) -> Result<(), InstantiationError> + Send + Sync;

/// Vista de una llamada concreta: parámetros enlazados, argumentos originales
/// y acceso al siguiente paso.
pub struct Invocation<'a> {
    bindings: Bindings,
    arguments: &'a Arguments,
    next: Option<&'a InitStep>,
}

impl<'a> Invocation<'a> {
    pub fn get(&self, name: &str) -> Option<&Value> { self.bindings.get(name) }

    pub fn bindings(&self) -> &Bindings { &self.bindings }

    pub fn arguments(&self) -> &Arguments { self.arguments }

    /// Copia cada parámetro enlazado como campo propio de la instancia.
    pub fn store_bindings(&self, instance: &mut Instance) {
        for (name, value) in self.bindings.iter() {
            instance.set_field(name.clone(), value.clone());
        }
    }

    /// Llama al siguiente paso con los mismos argumentos recibidos.
    pub fn forward(&self, instance: &mut Instance) -> Result<(), InstantiationError> {
        step::invoke(self.next, instance, self.arguments.clone())
    }

    /// Llama al siguiente paso con argumentos nuevos.
    pub fn call_next(&self, instance: &mut Instance, args: Arguments) -> Result<(), InstantiationError> {
        step::invoke(self.next, instance, args)
    }
}

pub struct Handwritten {
    label: String,
    shape: ParameterShape,
    body: Arc<InitBody>,
}

impl Handwritten {
    pub fn new<F>(label: impl Into<String>, shape: ParameterShape, body: F) -> Self
        where F: Fn(&mut Instance, &Invocation<'_>) -> Result<(), InstantiationError> + Send + Sync + 'static
    {
        Self { label: label.into(), shape, body: Arc::new(body) }
    }
}

impl fmt::Debug for Handwritten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handwritten").field("label", &self.label).field("shape", &self.shape).finish()
    }
}

impl Initializer for Handwritten {
    fn label(&self) -> &str { &self.label }

    fn shape(&self) -> &ParameterShape { &self.shape }

    fn initialize(&self, instance: &mut Instance, args: Arguments, next: Option<&InitStep>) -> Result<(), InstantiationError> {
        let bindings = self.shape.bind(&args)?;
        let invocation = Invocation { bindings, arguments: &args, next };
        (self.body)(instance, &invocation)
    }
}
