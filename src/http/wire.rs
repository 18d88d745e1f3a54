//! # Lectura del Formato de Cable
//! src/http/wire.rs
//!
//! Primitivas compartidas por el parser de requests y el de responses:
//!
//! 1. **Línea**: bytes hasta `\n` (un `\r` final se descarta)
//! 2. **Headers**: líneas `Label: valor` hasta una línea vacía
//! 3. **Body**: exactamente `Content-Length` bytes
//!
//! Las lecturas son bloqueantes y nunca van más allá de lo necesario: si el
//! body es vacío no se vuelve a tocar el stream después del head.

use super::error::{HttpError, Result};
use super::header::Headers;
use super::limits::ParseLimits;
use std::io::{BufRead, Read};

/// Terminador de línea que se escribe al serializar
pub const CRLF: &[u8] = b"\r\n";

/// Marcador de protocolo de las líneas de inicio
pub const PROTOCOL_PREFIX: &str = "HTTP/";

/// Versión que se escribe en las responses
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Lee una línea del stream
///
/// Retorna `None` si el stream ya estaba agotado. Una línea cortada por el
/// fin del stream se retorna tal cual.
pub fn read_line<R: BufRead>(input: &mut R, limits: &ParseLimits) -> Result<Option<String>> {
    let mut raw = Vec::new();
    // +2 para el terminador "\r\n"
    let cap = limits.max_line_length.saturating_add(2) as u64;
    let read = input.by_ref().take(cap).read_until(b'\n', &mut raw)?;

    if read == 0 {
        return Ok(None);
    }

    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }

    if raw.len() > limits.max_line_length {
        return Err(HttpError::LineTooLong { limit: limits.max_line_length });
    }

    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

/// Lee las líneas de header que siguen a la línea de inicio
///
/// Termina en la línea vacía separadora. El fin del stream dentro del bloque
/// de headers cuenta como esa línea vacía: un head truncado no se reporta
/// como error. Un mensaje sin `Content-Length` cortado a mitad de los headers
/// se parsea con los headers que alcanzaron a llegar; la truncación solo se
/// detecta en el body (`TruncatedBody`).
pub fn read_headers<R: BufRead>(input: &mut R, limits: &ParseLimits) -> Result<Headers> {
    let mut headers = Headers::new();
    let mut count = 0;

    while let Some(line) = read_line(input, limits)? {
        // La línea vacía marca el fin de los headers
        if line.is_empty() {
            break;
        }

        count += 1;
        if count > limits.max_headers {
            return Err(HttpError::TooManyHeaders { limit: limits.max_headers });
        }

        // Separar solo en el primer ':' (los valores pueden contener más)
        let (label, value) = line
            .split_once(':')
            .ok_or_else(|| HttpError::MalformedHeaderLine(line.clone()))?;
        let (label, value) = (label.trim(), value.trim());

        tracing::trace!(label, value, "Header parsed");
        headers.set(label, value);
    }

    Ok(headers)
}

/// Lee exactamente `length` bytes del body
pub fn read_body<R: Read>(input: &mut R, length: usize, limits: &ParseLimits) -> Result<Vec<u8>> {
    if length == 0 {
        return Ok(Vec::new());
    }

    if length > limits.max_body_length {
        return Err(HttpError::BodyTooLarge { length, limit: limits.max_body_length });
    }

    let mut body = Vec::with_capacity(length);
    input.by_ref().take(length as u64).read_to_end(&mut body)?;

    if body.len() < length {
        return Err(HttpError::TruncatedBody { expected: length, received: body.len() });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ParseLimits {
        ParseLimits::default()
    }

    #[test]
    fn test_read_line_crlf_and_lf() {
        let mut input: &[u8] = b"first\r\nsecond\nthird";
        assert_eq!(read_line(&mut input, &limits()).unwrap().as_deref(), Some("first"));
        assert_eq!(read_line(&mut input, &limits()).unwrap().as_deref(), Some("second"));
        assert_eq!(read_line(&mut input, &limits()).unwrap().as_deref(), Some("third"));
        assert_eq!(read_line(&mut input, &limits()).unwrap(), None);
    }

    #[test]
    fn test_read_line_too_long() {
        let limits = ParseLimits { max_line_length: 4, ..ParseLimits::default() };

        let mut exact: &[u8] = b"abcd\r\n";
        assert_eq!(read_line(&mut exact, &limits).unwrap().as_deref(), Some("abcd"));

        let mut long: &[u8] = b"abcdefgh\r\n";
        assert!(matches!(read_line(&mut long, &limits), Err(HttpError::LineTooLong { limit: 4 })));
    }

    #[test]
    fn test_read_headers_splits_on_first_colon() {
        let mut input: &[u8] = b"Date: Tue, 15 Nov 1994 08:12:31 GMT\r\n\r\nbody";
        let headers = read_headers(&mut input, &limits()).unwrap();
        assert_eq!(headers.value("Date"), Some("Tue, 15 Nov 1994 08:12:31 GMT"));
        // El body queda sin leer
        assert_eq!(input, b"body");
    }

    #[test]
    fn test_read_headers_trims_label_and_value() {
        let mut input: &[u8] = b"  host :   example.com  \r\n\r\n";
        let headers = read_headers(&mut input, &limits()).unwrap();
        assert_eq!(headers.value("Host"), Some("example.com"));
    }

    #[test]
    fn test_read_headers_missing_colon() {
        let mut input: &[u8] = b"Host localhost\r\n\r\n";
        let result = read_headers(&mut input, &limits());
        assert!(matches!(result, Err(HttpError::MalformedHeaderLine(line)) if line == "Host localhost"));
    }

    #[test]
    fn test_read_headers_eof_ends_headers() {
        let mut input: &[u8] = b"Host: a";
        let headers = read_headers(&mut input, &limits()).unwrap();
        assert_eq!(headers.value("Host"), Some("a"));
    }

    #[test]
    fn test_read_headers_too_many() {
        let limits = ParseLimits { max_headers: 1, ..ParseLimits::default() };
        let mut input: &[u8] = b"A: 1\r\nB: 2\r\n\r\n";
        assert!(matches!(read_headers(&mut input, &limits), Err(HttpError::TooManyHeaders { limit: 1 })));
    }

    #[test]
    fn test_read_body_exact() {
        let mut input: &[u8] = b"hello world";
        let body = read_body(&mut input, 5, &limits()).unwrap();
        assert_eq!(body, b"hello");
        assert_eq!(input, b" world");
    }

    #[test]
    fn test_read_body_truncated() {
        let mut input: &[u8] = b"abc";
        let result = read_body(&mut input, 10, &limits());
        assert!(matches!(result, Err(HttpError::TruncatedBody { expected: 10, received: 3 })));
    }

    #[test]
    fn test_read_body_too_large() {
        let limits = ParseLimits { max_body_length: 2, ..ParseLimits::default() };
        let mut input: &[u8] = b"abc";
        assert!(matches!(read_body(&mut input, 3, &limits), Err(HttpError::BodyTooLarge { length: 3, limit: 2 })));
    }
}
