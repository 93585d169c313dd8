//! Configuración de la librería desde variables de entorno.
//! Carga `.env` una sola vez y expone `InfusionConfig`, que ajusta un
//! `Actuator` (scope por defecto y patrón de nombre de las keys).

use std::env;

use dotenvy::dotenv;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::InfusionError;
use infusion_core::constants::NAME_PATTERN;
use infusion_core::{Actuator, Scope};

pub const DEFAULT_SCOPE_VAR: &str = "INFUSION_DEFAULT_SCOPE";
pub const NAME_PATTERN_VAR: &str = "INFUSION_NAME_PATTERN";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct InfusionConfig {
    /// Scope de los readers generados por `Actuator::inject`.
    pub default_scope: Scope,
    /// Patrón para derivar keys; `None` usa el de por defecto.
    pub name_pattern: Option<Regex>,
}

impl Default for InfusionConfig {
    fn default() -> Self { Self { default_scope: Scope::Private, name_pattern: None } }
}

impl InfusionConfig {
    pub fn from_env() -> Result<Self, InfusionError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construye la configuración a partir de una función de consulta.
    /// Un scope desconocido degrada a `private`; un patrón inválido falla.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InfusionError>
        where F: Fn(&str) -> Option<String>
    {
        let default_scope = lookup(DEFAULT_SCOPE_VAR).map(|v| Scope::parse(v.trim())).unwrap_or_default();
        let name_pattern = match lookup(NAME_PATTERN_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) if raw == NAME_PATTERN => None,
            Some(raw) => Some(Regex::new(&raw).map_err(|e| InfusionError::Config(format!("{NAME_PATTERN_VAR}: {e}")))?),
            None => None,
        };
        debug!("infusion config: default scope {default_scope}, custom pattern {}", name_pattern.is_some());
        Ok(Self { default_scope, name_pattern })
    }

    /// Aplica la configuración sobre un `Actuator`.
    pub fn configure(&self, actuator: Actuator) -> Actuator {
        let actuator = actuator.with_default_scope(self.default_scope);
        match &self.name_pattern {
            Some(pattern) => actuator.with_name_pattern(pattern.clone()),
            None => actuator,
        }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }
