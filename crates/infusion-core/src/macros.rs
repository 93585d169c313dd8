//! Macro para declarar listas de configuración de dependencias.
//!
//! Formas soportadas:
//! - dependencies!["a", "n.b"]
//! - dependencies!["a", "n.b"; { "demo" => "test" }]

/// Construye un `Vec<Entry>`; el mapping opcional tras `;` se añade como
/// último elemento (aliases).
#[macro_export]
macro_rules! dependencies {
    ($($id:expr),* $(,)? ; { $($alias:expr => $source:expr),* $(,)? }) => {{
        let mut entries: ::std::vec::Vec<$crate::dependency::Entry> =
            ::std::vec![$($crate::dependency::Entry::from($id)),*];
        entries.push($crate::dependency::Entry::aliases([$(($alias, $source)),*]));
        entries
    }};
    ($($id:expr),* $(,)?) => {{
        let entries: ::std::vec::Vec<$crate::dependency::Entry> =
            ::std::vec![$($crate::dependency::Entry::from($id)),*];
        entries
    }};
}
