//! # Tipos MIME
//!
//! Conjunto cerrado de tipos de contenido que entiende el motor. Cualquier
//! código desconocido (o ausente) se trata como `application/octet-stream`.

use serde::{Serialize, Serializer};

/// Tipos de contenido soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MimeType {
    /// `application/octet-stream` - bytes sin interpretar (default)
    #[default]
    Raw,

    /// `text/html`
    Html,

    /// `application/json`
    Json,

    /// `text/plain`
    Text,
}

impl MimeType {
    /// Todas las variantes, en orden de búsqueda
    pub const ALL: [MimeType; 4] = [MimeType::Raw, MimeType::Html, MimeType::Json, MimeType::Text];

    /// Código canónico que viaja en el header `Content-Type`
    ///
    /// # Ejemplo
    /// ```
    /// use http_protocol::http::MimeType;
    /// assert_eq!(MimeType::Json.code(), "application/json");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            MimeType::Raw => "application/octet-stream",
            MimeType::Html => "text/html",
            MimeType::Json => "application/json",
            MimeType::Text => "text/plain",
        }
    }

    /// Busca el tipo por coincidencia exacta del código
    ///
    /// Retorna `Raw` si el código es `None` o no coincide con ninguno.
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|code| Self::ALL.into_iter().find(|mime| mime.code() == code))
            .unwrap_or_default()
    }

    /// Indica si el body de este tipo es texto (y por lo tanto lleva charset)
    pub fn is_text(&self) -> bool {
        !matches!(self, MimeType::Raw)
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for MimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
