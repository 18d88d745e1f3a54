//! # Límites del Parser
//!
//! Cotas que protegen al parser de líneas, headers o bodies arbitrariamente
//! grandes. Se validan antes de reservar memoria.

/// Límites aplicados al leer un mensaje
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Largo máximo de una línea, sin contar el terminador
    pub max_line_length: usize,

    /// Cantidad máxima de líneas de header
    pub max_headers: usize,

    /// `Content-Length` máximo aceptado
    pub max_body_length: usize,
}

impl ParseLimits {
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 8 * 1024;
    pub const DEFAULT_MAX_HEADERS: usize = 100;
    pub const DEFAULT_MAX_BODY_LENGTH: usize = 10 * 1024 * 1024;
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_line_length: Self::DEFAULT_MAX_LINE_LENGTH,
            max_headers: Self::DEFAULT_MAX_HEADERS,
            max_body_length: Self::DEFAULT_MAX_BODY_LENGTH,
        }
    }
}
