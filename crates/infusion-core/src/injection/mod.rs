//! Núcleo de inyección: pre-relleno, capa de inicialización y merge.
pub mod injector;
pub mod layer;
pub mod merge;
pub mod prefill;

pub use injector::Injector;
pub use layer::InfusionLayer;
pub use merge::{assign_state, forward_arguments};
pub use prefill::Prefill;
