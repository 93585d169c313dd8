//! Constantes compartidas del núcleo de inyección.

/// Patrón por defecto para derivar la key corta de un identificador.
///
/// Se toma la coincidencia anclada al final, por lo que los prefijos de
/// namespace (`n.m.c` -> `c`) y los dígitos iniciales (`1a` -> `a`) quedan
/// fuera de la key.
pub const NAME_PATTERN: &str = r"[a-z_][a-zA-Z_0-9]*$";

/// Forma completa que debe tener cualquier identificador posicional.
pub const VALID_IDENTIFIER: &str = r"^[\w.]+$";

/// Separador de namespaces en los identificadores (`primary.zwei`).
pub const NAMESPACE_SEPARATOR: char = '.';

/// Nombre con el que se expone la lista canónica de keys inyectadas.
pub const INFUSED_KEYS: &str = "infused_keys";
