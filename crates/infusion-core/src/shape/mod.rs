//! Formas de parámetros y enlace de argumentos.
pub mod bind;
pub mod parameter;

pub use bind::Bindings;
pub use parameter::{Forwarding, Parameter, ParameterKind, ParameterShape};
