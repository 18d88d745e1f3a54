//! # Headers HTTP
//! src/http/header.rs
//!
//! Almacén de headers compartido por requests y responses.
//!
//! ## Canonicalización
//!
//! Cada header se guarda bajo una clave canónica derivada de su label:
//! se pasa a minúsculas, se separa por `-`, se capitaliza cada segmento y se
//! vuelve a unir. Así `conTeNT-length` y `Content-Length` son el mismo header.
//! Solo se cambia la caja de letras ASCII: los nombres de header son tokens
//! ASCII, y así la canonicalización es idempotente para cualquier string.
//!
//! ## Sub-valores
//!
//! Un valor como `text/plain; charset=UTF-8` se separa por `;` en segmentos.
//! Cada segmento `nombre=valor` es un parámetro, y el primer segmento sin `=`
//! es el valor "desnudo" (`text/plain`).

use regex::Regex;
use std::sync::OnceLock;

/// Nombre canónico del header de largo del body
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Nombre canónico del header de tipo de contenido
pub const CONTENT_TYPE: &str = "Content-Type";

/// Separador de parámetros: `;` seguido opcionalmente de espacios
fn param_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new("; *").expect("static regex is valid"))
}

/// Deriva la clave canónica de un label
///
/// # Ejemplo
/// ```
/// use http_protocol::http::header::canonical_key;
///
/// assert_eq!(canonical_key("conTeNT-length"), "Content-Length");
/// assert_eq!(canonical_key("x-request-id"), "X-Request-Id");
/// ```
pub fn canonical_key(label: &str) -> String {
    label
        .to_ascii_lowercase()
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

/// Pasa a mayúscula el primer carácter de un segmento
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase()).chain(chars).collect(),
        None => String::new(),
    }
}

/// Un header individual
///
/// Dos headers son iguales si coinciden clave canónica y valor, aunque el
/// label original difiera.
#[derive(Debug, Clone)]
pub struct Header {
    /// Label tal como llegó (ej: "conTeNT-length")
    label: String,

    /// Clave canónica derivada del label (ej: "Content-Length")
    key: String,

    /// Valor sin procesar
    value: String,
}

impl Header {
    /// Crea un header derivando su clave canónica
    ///
    /// Label y valor se guardan sin espacios al inicio ni al final, igual que
    /// los deja el parser.
    pub fn new(label: &str, value: &str) -> Self {
        let (label, value) = (label.trim(), value.trim());
        Self {
            label: label.to_string(),
            key: canonical_key(label),
            value: value.to_string(),
        }
    }

    /// Label original
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Clave canónica
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Valor completo
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reemplaza el valor
    pub fn set_value(&mut self, value: &str) {
        self.value = value.trim().to_string();
    }

    /// Indica si el header se puede escribir como una sola línea
    ///
    /// El label no puede tener `\r`, `\n` ni `:`; el valor no puede tener
    /// `\r` ni `\n`.
    pub fn is_wire_safe(&self) -> bool {
        let breaks_line = |c: char| c == '\r' || c == '\n';
        !self.label.contains(|c: char| breaks_line(c) || c == ':') && !self.value.contains(breaks_line)
    }

    /// Busca un sub-valor dentro del valor
    ///
    /// Con `name` vacío retorna el primer segmento sin `=`; si no, el payload
    /// del parámetro `name`. Retorna `None` si no existe.
    ///
    /// # Ejemplo
    /// ```
    /// use http_protocol::http::Header;
    ///
    /// let header = Header::new("Content-Type", "text/plain; charset=UTF-8");
    /// assert_eq!(header.subvalue(""), Some("text/plain"));
    /// assert_eq!(header.subvalue("charset"), Some("UTF-8"));
    /// assert_eq!(header.subvalue("boundary"), None);
    /// ```
    pub fn subvalue(&self, name: &str) -> Option<&str> {
        param_separator()
            .split(&self.value)
            .find_map(|segment| match segment.split_once('=') {
                Some((param, payload)) if !name.is_empty() && param == name => Some(payload),
                None if name.is_empty() => Some(segment),
                _ => None,
            })
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Header {}

/// Almacén de headers de un mensaje
///
/// Guarda a lo sumo un header por clave canónica. El orden de iteración es
/// el de inserción; reemplazar un header conserva su posición.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    /// Crea un almacén vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea o reemplaza el header bajo la clave canónica de `label`
    pub fn set(&mut self, label: &str, value: &str) {
        self.insert(Header::new(label, value));
    }

    /// Inserta un header ya construido, reemplazando el de la misma clave
    pub fn insert(&mut self, header: Header) {
        match self.entries.iter_mut().find(|existing| existing.key == header.key) {
            Some(existing) => *existing = header,
            None => self.entries.push(header),
        }
    }

    /// Obtiene el header de una clave (se canonicaliza antes de buscar)
    pub fn get(&self, key: &str) -> Option<&Header> {
        let key = canonical_key(key);
        self.entries.iter().find(|header| header.key == key)
    }

    /// Obtiene el valor del header de una clave
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(Header::value)
    }

    /// Obtiene un sub-valor del header de una clave
    pub fn subvalue(&self, key: &str, name: &str) -> Option<&str> {
        self.get(key)?.subvalue(name)
    }

    /// Elimina y retorna el header de una clave
    pub fn remove(&mut self, key: &str) -> Option<Header> {
        let key = canonical_key(key);
        let index = self.entries.iter().position(|header| header.key == key)?;
        Some(self.entries.remove(index))
    }

    /// Itera los headers en orden de inserción
    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
