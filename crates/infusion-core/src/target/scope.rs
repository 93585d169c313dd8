use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// Visibilidad de los readers generados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Public,
    Protected,
    #[default]
    Private,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Public, Scope::Protected, Scope::Private];

    /// Interpreta un nombre de scope; cualquier valor desconocido degrada a
    /// `Private`.
    pub fn parse(name: &str) -> Self {
        match name {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            other => {
                debug!("unknown scope {other:?}, falling back to private");
                Self::Private
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
