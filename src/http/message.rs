//! # Contrato Común de Mensajes
//!
//! Todo mensaje HTTP (request o response) expone tres facetas derivadas de
//! sus headers: largo del body, tipo de contenido y charset. Las tres son
//! tolerantes: un valor ausente o inválido degrada a su default en vez de
//! fallar.

use super::charset::Charset;
use super::header::{Headers, CONTENT_LENGTH, CONTENT_TYPE};
use super::mime::MimeType;

/// Contrato común de requests y responses
pub trait Message {
    /// Headers del mensaje
    fn headers(&self) -> &Headers;

    /// Largo del body en bytes (`Content-Length`, o 0)
    fn content_length(&self) -> usize {
        content_length(self.headers())
    }

    /// Tipo de contenido (valor desnudo de `Content-Type`, o `Raw`)
    fn content_type(&self) -> MimeType {
        content_type(self.headers())
    }

    /// Charset (parámetro `charset` de `Content-Type`, o UTF-8)
    fn charset(&self) -> Charset {
        charset(self.headers())
    }
}

/// Deriva el largo del body desde `Content-Length`
pub fn content_length(headers: &Headers) -> usize {
    match headers.value(CONTENT_LENGTH) {
        None => 0,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(value, "Invalid Content-Length, assuming 0");
            0
        }),
    }
}

/// Deriva el tipo de contenido desde `Content-Type`
pub fn content_type(headers: &Headers) -> MimeType {
    MimeType::from_code(headers.subvalue(CONTENT_TYPE, ""))
}

/// Deriva el charset desde el parámetro `charset` de `Content-Type`
pub fn charset(headers: &Headers) -> Charset {
    Charset::from_param(headers.subvalue(CONTENT_TYPE, "charset"))
}
