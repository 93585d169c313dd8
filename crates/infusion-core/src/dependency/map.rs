//! `DependencyMap`: normaliza una lista de configuración en una tabla
//! ordenada `key -> Identifier` sin duplicados.
//!
//! Reglas:
//! - Si el último elemento es un mapping, sus pares son aliases explícitos
//!   (`key -> fuente`); el resto son identificadores posicionales.
//! - Los posicionales se reducen a su key mediante el patrón de nombre.
//! - Se registran primero los posicionales y luego los aliases. La primera
//!   registración de una key gana; la segunda falla con
//!   `DuplicateDependency`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::identifier::{DependencyKey, Identifier};
use crate::constants::{NAME_PATTERN, VALID_IDENTIFIER};
use crate::errors::DependencyError;

static DEFAULT_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(NAME_PATTERN).expect("NAME_PATTERN is a valid regex"));

static VALID_IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(VALID_IDENTIFIER).expect("VALID_IDENTIFIER is a valid regex"));

/// Elemento de la lista de configuración.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Identifier(Identifier),
    Aliases(IndexMap<String, Identifier>),
}

impl Entry {
    /// Construye un mapping de aliases `key -> fuente` conservando el orden.
    pub fn aliases<I, K, V>(pairs: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<Identifier>
    {
        Self::Aliases(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    fn inspect(&self) -> String {
        match self {
            Self::Identifier(id) => id.inspect(),
            Self::Aliases(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {}", v.inspect())).collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }
}

impl From<&str> for Entry {
    fn from(s: &str) -> Self { Self::Identifier(Identifier::from(s)) }
}

impl From<String> for Entry {
    fn from(s: String) -> Self { Self::Identifier(Identifier::from(s)) }
}

impl From<Identifier> for Entry {
    fn from(id: Identifier) -> Self { Self::Identifier(id) }
}

impl From<IndexMap<String, Identifier>> for Entry {
    fn from(map: IndexMap<String, Identifier>) -> Self { Self::Aliases(map) }
}

/// Tabla inmutable de dependencias declaradas.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyMap {
    keys: Vec<DependencyKey>,
    table: IndexMap<DependencyKey, Identifier>,
}

impl DependencyMap {
    /// Construye el mapa usando el patrón de nombre por defecto.
    pub fn build<I, E>(configuration: I) -> Result<Self, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        Self::build_with_pattern(configuration, &DEFAULT_NAME_PATTERN)
    }

    /// Igual que `build` pero con un patrón de nombre propio. Se usa la
    /// coincidencia completa del patrón como key.
    pub fn build_with_pattern<I, E>(configuration: I, name_pattern: &Regex) -> Result<Self, DependencyError>
        where I: IntoIterator<Item = E>,
              E: Into<Entry>
    {
        let mut entries: Vec<Entry> = configuration.into_iter().map(Into::into).collect();
        let aliases = if matches!(entries.last(), Some(Entry::Aliases(_))) {
            match entries.pop() {
                Some(Entry::Aliases(map)) => map,
                _ => IndexMap::new(),
            }
        } else {
            IndexMap::new()
        };

        let mut table: IndexMap<DependencyKey, Identifier> = IndexMap::with_capacity(entries.len() + aliases.len());

        for entry in entries {
            let identifier = match entry {
                Entry::Identifier(id) => id,
                // Un mapping que no va al final se trata como identificador
                // posicional y nunca reduce a una key válida.
                other => return Err(DependencyError::InvalidDependency { identifier: other.inspect() }),
            };
            let key = to_key(&identifier, name_pattern)?;
            insert(&mut table, key, identifier)?;
        }

        for (name, identifier) in aliases {
            insert(&mut table, DependencyKey::from(name), identifier)?;
        }

        let keys = table.keys().cloned().collect();
        Ok(Self { keys, table })
    }

    /// Keys en orden de inserción.
    pub fn keys(&self) -> &[DependencyKey] { &self.keys }

    /// Tabla `key -> identificador de origen`.
    pub fn table(&self) -> &IndexMap<DependencyKey, Identifier> { &self.table }

    pub fn get(&self, key: &str) -> Option<&Identifier> { self.table.get(key) }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&DependencyKey, &Identifier)> { self.table.iter() }
}

fn to_key(identifier: &Identifier, name_pattern: &Regex) -> Result<DependencyKey, DependencyError> {
    let raw = identifier.as_str();
    let invalid = || DependencyError::InvalidDependency { identifier: identifier.inspect() };

    if !VALID_IDENTIFIER_PATTERN.is_match(raw) {
        return Err(invalid());
    }

    name_pattern.find(raw)
                .filter(|m| !m.as_str().is_empty())
                .map(|m| DependencyKey::from(m.as_str()))
                .ok_or_else(invalid)
}

fn insert(table: &mut IndexMap<DependencyKey, Identifier>, key: DependencyKey, identifier: Identifier) -> Result<(), DependencyError> {
    if table.contains_key(&key) {
        return Err(DependencyError::DuplicateDependency { key: key.to_string(),
                                                          identifier: identifier.inspect() });
    }
    table.insert(key, identifier);
    Ok(())
}
