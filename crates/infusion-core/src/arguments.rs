//! Argumentos de una llamada de construcción.
//!
//! Una llamada lleva posicionales, argumentos nombrados (ordenados) y un
//! callback opcional que se reenvía siempre sin tocar.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Argumentos nombrados en orden de llegada.
pub type Named = IndexMap<String, Value>;

/// Callback de paso (el parámetro final tipo bloque).
#[derive(Clone)]
pub struct Block(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl Block {
    pub fn new<F>(f: F) -> Self
        where F: Fn(&[Value]) -> Value + Send + Sync + 'static
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value { (self.0)(args) }

    /// Identidad: dos `Block` son el mismo si comparten el closure.
    pub fn ptr_eq(&self, other: &Block) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Block(..)") }
}

#[derive(Debug, Clone, Default)]
pub struct Arguments {
    pub positionals: Vec<Value>,
    pub named: Named,
    pub block: Option<Block>,
}

impl Arguments {
    pub fn new() -> Self { Self::default() }

    pub fn positional(mut self, value: impl Into<Value>) -> Self {
        self.positionals.push(value.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn block<F>(mut self, f: F) -> Self
        where F: Fn(&[Value]) -> Value + Send + Sync + 'static
    {
        self.block = Some(Block::new(f));
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    pub fn is_empty(&self) -> bool { self.positionals.is_empty() && self.named.is_empty() && self.block.is_none() }
}
