//! Identificadores de origen y keys cortas de dependencias.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identificador con el que se consulta el container.
///
/// `Symbol` representa un token simbólico (`:a`) y `Text` una cadena
/// (`"n.b"`). Ambos se resuelven por su forma plana; la distinción sólo se
/// conserva para los mensajes de error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    Symbol(String),
    Text(String),
}

impl Identifier {
    pub fn symbol(name: impl Into<String>) -> Self { Self::Symbol(name.into()) }

    pub fn text(name: impl Into<String>) -> Self { Self::Text(name.into()) }

    /// Forma plana usada para derivar keys y consultar el container.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Symbol(s) | Self::Text(s) => s,
        }
    }

    /// Representación para mensajes: `:a` para símbolos, `"a"` para texto.
    pub fn inspect(&self) -> String {
        match self {
            Self::Symbol(s) => format!(":{s}"),
            Self::Text(s) => format!("{s:?}"),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self { Self::Text(s) }
}

/// Key corta y validada bajo la que se expone una dependencia.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyKey(Arc<str>);

impl DependencyKey {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for DependencyKey {
    fn from(s: &str) -> Self { Self(Arc::from(s)) }
}

impl From<String> for DependencyKey {
    fn from(s: String) -> Self { Self(Arc::from(s)) }
}

impl Borrow<str> for DependencyKey {
    fn borrow(&self) -> &str { &self.0 }
}

impl AsRef<str> for DependencyKey {
    fn as_ref(&self) -> &str { &self.0 }
}

impl PartialEq<str> for DependencyKey {
    fn eq(&self, other: &str) -> bool { &*self.0 == other }
}

impl PartialEq<&str> for DependencyKey {
    fn eq(&self, other: &&str) -> bool { &*self.0 == *other }
}
