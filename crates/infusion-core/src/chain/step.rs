//! Cadena explícita de inicialización.
//!
//! Cada `InitStep` envuelve un `Initializer` y guarda una referencia al
//! siguiente paso. Llamar a "super" es simplemente invocar `next`; cuando no
//! hay siguiente se ejecuta la raíz implícita, que no hace nada y declara una
//! forma vacía.

use std::fmt;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::errors::InstantiationError;
use crate::shape::ParameterShape;
use crate::target::Instance;

/// Contrato de un paso de inicialización.
pub trait Initializer: Send + Sync + fmt::Debug {
    /// Nombre legible del paso (para introspección de la cadena).
    fn label(&self) -> &str;

    /// Forma de parámetros declarada.
    fn shape(&self) -> &ParameterShape;

    /// Inicializa `instance` con `args`. `next` es el siguiente paso de la
    /// cadena, si existe.
    fn initialize(&self, instance: &mut Instance, args: Arguments, next: Option<&InitStep>) -> Result<(), InstantiationError>;

    /// Copia del paso para enlazarlo sobre otra cadena. `None` si el paso no
    /// depende de la cadena sobre la que se declaró.
    fn rebase(&self, _head: Option<&InitStep>) -> Option<Arc<dyn Initializer>> { None }
}

#[derive(Debug)]
pub struct InitStep {
    initializer: Arc<dyn Initializer>,
    next: Option<Arc<InitStep>>,
}

impl InitStep {
    /// Enlaza `initializer` delante de `next`.
    pub fn link(initializer: Arc<dyn Initializer>, next: Option<Arc<InitStep>>) -> Arc<Self> {
        Arc::new(Self { initializer, next })
    }

    pub fn label(&self) -> &str { self.initializer.label() }

    pub fn shape(&self) -> &ParameterShape { self.initializer.shape() }

    pub fn next(&self) -> Option<&InitStep> { self.next.as_deref() }

    pub fn initializer(&self) -> &Arc<dyn Initializer> { &self.initializer }

    pub fn invoke(&self, instance: &mut Instance, args: Arguments) -> Result<(), InstantiationError> {
        self.initializer.initialize(instance, args, self.next())
    }

    /// Etiquetas desde este paso hasta el final de la cadena.
    pub fn labels(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut cursor = Some(self);
        while let Some(step) = cursor {
            out.push(step.label().to_string());
            cursor = step.next();
        }
        out
    }
}

/// Invoca `step` o, si no hay, la raíz implícita (no-op).
pub fn invoke(step: Option<&InitStep>, instance: &mut Instance, args: Arguments) -> Result<(), InstantiationError> {
    match step {
        Some(step) => step.invoke(instance, args),
        None => Ok(()),
    }
}

/// Primera forma no trivial desde `head` hacia arriba.
///
/// Las formas de puro reenvío anónimo se saltan; si toda la cadena es de
/// reenvío se usa la forma vacía de la raíz.
pub fn resolve_shape(head: Option<&InitStep>) -> ParameterShape {
    let mut cursor = head;
    while let Some(step) = cursor {
        if !step.shape().is_pass_through() {
            return step.shape().clone();
        }
        cursor = step.next();
    }
    ParameterShape::new()
}
