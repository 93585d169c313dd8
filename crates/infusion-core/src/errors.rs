//! Errores del núcleo de inyección.
//!
//! Los errores de configuración (`DependencyError`, `InfuseError`) se
//! producen de forma síncrona al construir o aplicar un `Injector`. Durante la
//! instanciación sólo aparecen los errores del container (`ResolveError`) o
//! del siguiente inicializador de la cadena (`ArgumentError`, `Initializer`),
//! que se propagan sin reinterpretar.

use thiserror::Error;

/// Fallos al normalizar la lista de configuración de dependencias.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DependencyError {
    /// El identificador no se puede reducir a una key válida.
    #[error("Cannot use {identifier} as an identifier.")]
    InvalidDependency { identifier: String },
    /// Segundo registro de una key ya existente. `key` es la key original y
    /// `identifier` la fuente que colisiona.
    #[error("Remove {identifier} since it's a duplicate of :{key}.")]
    DuplicateDependency { key: String, identifier: String },
}

/// Fallos al aplicar un `Injector` sobre un tipo.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InfuseError {
    #[error(transparent)]
    Dependency(#[from] DependencyError),
    #[error("Can only infuse a class, invalid object: {name} ({kind}).")]
    UnsupportedTarget { name: String, kind: String },
}

/// Errores reportados por un `Container` al resolver un identificador.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolveError {
    #[error("Nothing registered with the key {identifier}.")]
    NotFound { identifier: String },
    #[error("Unable to resolve {identifier}: {reason}")]
    Failed { identifier: String, reason: String },
}

/// Errores de enlace entre argumentos y la forma de parámetros declarada.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ArgumentError {
    #[error("wrong number of arguments (given {given}, expected {expected})")]
    Arity { given: usize, expected: String },
    #[error("missing keyword(s): {}", .0.join(", "))]
    MissingKeywords(Vec<String>),
    #[error("unknown keyword(s): {}", .0.join(", "))]
    UnknownKeywords(Vec<String>),
}

/// Errores durante la construcción de una instancia.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InstantiationError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error("{name} is a mixin and cannot be instantiated")]
    NotInstantiable { name: String },
    /// Error propio de un inicializador escrito a mano.
    #[error("{0}")]
    Initializer(String),
}

/// Errores de acceso a los readers generados.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AccessError {
    #[error("undefined reader `{name}' for an instance of {type_name}")]
    Undefined { name: String, type_name: String },
    #[error("private method `{name}' called for an instance of {type_name}")]
    Private { name: String, type_name: String },
    #[error("protected method `{name}' called for an instance of {type_name}")]
    Protected { name: String, type_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dependency_message() {
        let e = DependencyError::InvalidDependency { identifier: "\"123\"".into() };
        assert_eq!(e.to_string(), "Cannot use \"123\" as an identifier.");
    }

    #[test]
    fn duplicate_dependency_message() {
        let e = DependencyError::DuplicateDependency { key: "a".into(), identifier: "\"a\"".into() };
        assert_eq!(e.to_string(), "Remove \"a\" since it's a duplicate of :a.");
    }

    #[test]
    fn infuse_error_is_transparent_for_dependency_errors() {
        let inner = DependencyError::InvalidDependency { identifier: ":x".into() };
        let e = InfuseError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
    }

    #[test]
    fn argument_error_lists_keywords() {
        let e = ArgumentError::MissingKeywords(vec!["four".into(), "five".into()]);
        assert_eq!(e.to_string(), "missing keyword(s): four, five");
    }
}
