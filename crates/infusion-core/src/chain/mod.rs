//! Cadena de inicialización enlazada explícitamente.
pub mod handwritten;
pub mod step;

pub use handwritten::{Handwritten, InitBody, Invocation};
pub use step::{invoke, resolve_shape, InitStep, Initializer};
