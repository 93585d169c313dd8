//! infusion-adapters: containers listos para usar con `infusion-core`.
//!
//! El núcleo sólo conoce el trait `Container`; aquí viven las
//! implementaciones con estado propio (registro concurrente de valores y
//! factorías).

pub mod registry;

pub use registry::{Namespace, Registry};
