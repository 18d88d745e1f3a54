//! # Errores del Protocolo
//! src/http/error.rs
//!
//! Todos los errores que puede producir el parsing o la serialización de un
//! mensaje HTTP. Un error durante el parsing invalida el mensaje completo:
//! nunca se retorna un `Request` o `Response` a medio construir.

use thiserror::Error;

/// Alias de `Result` usado en todo el módulo `http`
pub type Result<T> = std::result::Result<T, HttpError>;

/// Errores que pueden ocurrir al leer o escribir un mensaje HTTP
#[derive(Debug, Error)]
pub enum HttpError {
    /// La línea de inicio no tiene 3 tokens o no usa el marcador `HTTP/`
    #[error("Malformed start line: {0:?}")]
    MalformedStartLine(String),

    /// Método HTTP fuera del conjunto soportado
    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// Código de estado fuera del conjunto soportado
    #[error("Unknown HTTP status: {0}")]
    UnknownStatus(String),

    /// Línea de header sin el separador `:`
    #[error("Malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    /// El stream terminó antes de leer `Content-Length` bytes
    #[error("Truncated body: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },

    /// El body de texto no se puede representar en el charset declarado
    #[error("Body cannot be encoded as {charset}")]
    UnencodableBody { charset: &'static str },

    /// Un header que no se puede escribir como una sola línea
    #[error("Header cannot be written as one line: {0:?}")]
    InvalidHeader(String),

    /// Una línea supera el largo máximo permitido
    #[error("Line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// El mensaje trae más headers de los permitidos
    #[error("More than {limit} header lines")]
    TooManyHeaders { limit: usize },

    /// El `Content-Length` declarado supera el máximo permitido
    #[error("Declared body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },

    /// Error de I/O del stream subyacente
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializando un body JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
