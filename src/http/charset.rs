//! # Charsets
//!
//! Envoltorio sobre `encoding_rs` para decodificar bodies entrantes y
//! codificar bodies salientes. Los labels se resuelven con las reglas WHATWG
//! (`"utf8"`, `"UTF-8"` y `"unicode-1-1-utf-8"` son el mismo charset).

use super::error::{HttpError, Result};
use encoding_rs::Encoding;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Codificación de texto de un mensaje
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charset(&'static Encoding);

impl Charset {
    /// UTF-8, el charset por defecto
    pub fn utf8() -> Self {
        Charset(encoding_rs::UTF_8)
    }

    /// Busca un charset por su label
    ///
    /// # Ejemplo
    /// ```
    /// use http_protocol::http::Charset;
    ///
    /// assert_eq!(Charset::for_label("utf8"), Some(Charset::utf8()));
    /// assert_eq!(Charset::for_label("no-such-charset"), None);
    /// ```
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Charset)
    }

    /// Resuelve el parámetro `charset` de un header
    ///
    /// Ausente o desconocido degrada a UTF-8.
    pub fn from_param(label: Option<&str>) -> Self {
        match label {
            None => Self::utf8(),
            Some(label) => Self::for_label(label).unwrap_or_else(|| {
                tracing::warn!(label, "Unknown charset, falling back to UTF-8");
                Self::utf8()
            }),
        }
    }

    /// Nombre canónico (ej: `"UTF-8"`, `"windows-1252"`)
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Decodifica bytes a texto
    ///
    /// Las secuencias inválidas se reemplazan por U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, _had_errors) = self.0.decode_without_bom_handling(bytes);
        text.into_owned()
    }

    /// Codifica texto a bytes
    ///
    /// Falla con `UnencodableBody` si algún carácter no existe en este charset
    /// o si el charset no sirve como codificación de salida (UTF-16).
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        let (bytes, used, had_errors) = self.0.encode(text);
        if had_errors || used != self.0 {
            return Err(HttpError::UnencodableBody { charset: self.name() });
        }
        Ok(bytes)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}

impl std::fmt::Debug for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Charset({})", self.name())
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Charset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
