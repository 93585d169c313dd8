//! Capa de inicialización que genera un `Injector` al aplicarse.

use std::fmt;
use std::sync::Arc;

use super::merge::{assign_state, forward_arguments};
use super::prefill::Prefill;
use crate::arguments::Arguments;
use crate::chain::{self, InitStep, Initializer};
use crate::dependency::DependencyKey;
use crate::errors::InstantiationError;
use crate::shape::ParameterShape;
use crate::target::Instance;

pub const LAYER_LABEL: &str = "infusion";

/// Paso de la cadena que asigna las dependencias y reenvía el resto.
///
/// Declara `(*positionals, **keywords, &block)` con nombre: no es un reenvío
/// trivial, así que una capa aplicada después la toma como forma resuelta y
/// le pasa los nombrados ajenos a sus propias keys.
pub struct InfusionLayer {
    shape: ParameterShape,
    keys: Arc<[DependencyKey]>,
    resolved: ParameterShape,
    accepts_any: bool,
    prefill: Arc<Prefill>,
}

impl InfusionLayer {
    pub(crate) fn new(keys: Arc<[DependencyKey]>, head: Option<&InitStep>, prefill: Arc<Prefill>) -> Self {
        let resolved = chain::resolve_shape(head);
        Self { shape: ParameterShape::new().rest("positionals").keyrest("keywords").block("block"),
               keys,
               accepts_any: resolved.has_keyrest(),
               resolved,
               prefill }
    }

    pub fn keys(&self) -> &[DependencyKey] { &self.keys }

    /// Forma contra la que se decide el reenvío.
    pub fn resolved_shape(&self) -> &ParameterShape { &self.resolved }
}

impl fmt::Debug for InfusionLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfusionLayer")
         .field("keys", &self.keys)
         .field("resolved", &self.resolved)
         .field("accepts_any", &self.accepts_any)
         .finish()
    }
}

impl Initializer for InfusionLayer {
    fn label(&self) -> &str { LAYER_LABEL }

    fn shape(&self) -> &ParameterShape { &self.shape }

    fn initialize(&self, instance: &mut Instance, args: Arguments, next: Option<&InitStep>) -> Result<(), InstantiationError> {
        assign_state(instance, &self.keys, &args.named, |key| self.prefill.resolve_key(key))?;
        let forwarded = forward_arguments(&self.resolved, &self.keys, args, self.accepts_any)?;
        chain::invoke(next, instance, forwarded)
    }

    fn rebase(&self, head: Option<&InitStep>) -> Option<Arc<dyn Initializer>> {
        Some(Arc::new(Self::new(Arc::clone(&self.keys), head, Arc::clone(&self.prefill))))
    }
}
