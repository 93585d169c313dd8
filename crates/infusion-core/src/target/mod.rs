//! Tipos destino, instancias y visibilidad de readers.
pub mod instance;
pub mod scope;
pub mod types;

pub use instance::Instance;
pub use scope::Scope;
pub use types::{Reader, TargetType, TypeBuilder, TypeKind};
