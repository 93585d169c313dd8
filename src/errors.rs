use thiserror::Error;

use infusion_core::{AccessError, DependencyError, InfuseError, InstantiationError};

/// Errores de la librería de alto nivel. Los del núcleo se envuelven sin
/// alterar su mensaje.
#[derive(Debug, Error)]
pub enum InfusionError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    Dependency(#[from] DependencyError),
    #[error(transparent)]
    Infuse(#[from] InfuseError),
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
    #[error(transparent)]
    Access(#[from] AccessError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_variant_format() {
        let err = InfusionError::Config("patrón inválido".into());
        assert_eq!(err.to_string(), "Error de configuración: patrón inválido");
    }

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: InfusionError = DependencyError::InvalidDependency { identifier: "\"123\"".into() }.into();
        assert_eq!(err.to_string(), "Cannot use \"123\" as an identifier.");
    }
}
