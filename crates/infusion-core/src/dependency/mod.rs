//! Normalización de la configuración de dependencias.
pub mod identifier;
pub mod map;

pub use identifier::{DependencyKey, Identifier};
pub use map::{DependencyMap, Entry};
