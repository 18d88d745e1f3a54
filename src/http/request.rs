//! # Parsing de Requests HTTP/1.x
//! src/http/request.rs
//!
//! Este módulo lee un request HTTP desde un stream de bytes.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /member/7?verbose=1 HTTP/1.1\r\n
//! Content-Type: text/plain; charset=UTF-8\r\n
//! Content-Length: 14\r\n
//! \r\n
//! <14 bytes de body>
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /resource HTTP/x.y` (exactamente 3 tokens)
//! 2. **Headers**: Pares `Label: valor` (uno por línea)
//! 3. **Línea vacía**: separa headers del body
//! 4. **Body**: `Content-Length` bytes, decodificados con el charset declarado

use super::error::{HttpError, Result};
use super::header::Headers;
use super::limits::ParseLimits;
use super::message::Message;
use super::wire;
use serde::Serialize;
use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// PUT - Reemplazar un recurso
    PUT,

    /// POST - Enviar datos a un recurso
    POST,

    /// DELETE - Eliminar un recurso
    DELETE,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::PUT => "PUT",
            Method::POST => "POST",
            Method::DELETE => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = HttpError;

    /// Parsea un método HTTP (sensible a mayúsculas)
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::GET),
            "PUT" => Ok(Method::PUT),
            "POST" => Ok(Method::POST),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(HttpError::UnknownMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Recurso tal como llegó (path + query, sin normalizar)
    resource: String,

    /// Versión del protocolo (ej: "HTTP/1.1")
    version: String,

    /// Query parameters decodificados
    query_params: HashMap<String, String>,

    /// Headers del request
    headers: Headers,

    /// Body decodificado con el charset del request
    body: String,
}

impl Request {
    /// Parsea un request completo desde bytes en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_protocol::http::{Message, Method, MimeType, Request};
    ///
    /// let raw = b"POST /notes?draft=1 HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::POST);
    /// assert_eq!(request.resource(), "/notes?draft=1");
    /// assert_eq!(request.content_type(), MimeType::Text);
    /// assert_eq!(request.body(), "hello");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let mut input = buffer;
        Self::read_from(&mut input)
    }

    /// Lee un request desde un stream con los límites por defecto
    pub fn read_from<R: BufRead>(input: &mut R) -> Result<Self> {
        Self::read_with_limits(input, &ParseLimits::default())
    }

    /// Lee un request desde un stream
    ///
    /// Bloquea en cada lectura. No consume nada más allá del body: si el
    /// request no trae `Content-Length` (o es 0) no se lee más después de la
    /// línea vacía.
    pub fn read_with_limits<R: BufRead>(input: &mut R, limits: &ParseLimits) -> Result<Self> {
        // 1. Request line
        let line = wire::read_line(input, limits)?.unwrap_or_default();
        let (method, resource, version) = Self::parse_request_line(&line)?;
        tracing::debug!(%method, resource, version, "Request line parsed");

        // 2. Headers hasta la línea vacía
        let headers = wire::read_headers(input, limits)?;

        // 3. Body según Content-Length y charset
        let length = super::message::content_length(&headers);
        let charset = super::message::charset(&headers);
        let bytes = wire::read_body(input, length, limits)?;
        let body = charset.decode(&bytes);
        tracing::debug!(length, %charset, "Request body read");

        let query_params = resource
            .split_once('?')
            .map(|(_, query)| parse_query_string(query))
            .unwrap_or_default();

        Ok(Request {
            method,
            resource: resource.to_string(),
            version: version.to_string(),
            query_params,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path?query HTTP/1.1`, separado por espacios simples
    fn parse_request_line(line: &str) -> Result<(Method, &str, &str)> {
        let parts: Vec<&str> = line.split(' ').collect();

        // Debe tener exactamente 3 partes: METHOD RESOURCE VERSION
        if parts.len() != 3 || !parts[2].starts_with(wire::PROTOCOL_PREFIX) {
            return Err(HttpError::MalformedStartLine(line.to_string()));
        }

        let method = parts[0].parse()?;
        Ok((method, parts[1], parts[2]))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el recurso completo, tal como llegó
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Obtiene el path del recurso (antes del primer `?`)
    pub fn path(&self) -> &str {
        self.resource
            .split_once('?')
            .map_or(self.resource.as_str(), |(path, _)| path)
    }

    /// Obtiene la query string cruda (después del primer `?`)
    pub fn query(&self) -> Option<&str> {
        self.resource.split_once('?').map(|(_, query)| query)
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    ///
    /// # Ejemplo
    /// ```
    /// use http_protocol::http::Request;
    ///
    /// let request = Request::parse(b"GET /search?q=hello%20world&page=2 HTTP/1.1\r\n\r\n").unwrap();
    ///
    /// assert_eq!(request.query_param("q"), Some("hello world"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body decodificado
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Message for Request {
    fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// Parsea una query string
///
/// Ejemplo: "num=10&text=hello" → {"num": "10", "text": "hello"}
fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|param| !param.is_empty())
        .map(|param| match param.split_once('=') {
            Some((key, value)) => (percent_decode(key), percent_decode(value)),
            // Parámetro sin valor (ej: "?debug")
            None => (percent_decode(param), String::new()),
        })
        .collect()
}

/// Decodifica `%XX` y `+` de un componente de query
///
/// Las secuencias `%` inválidas se dejan tal cual.
fn percent_decode(component: &str) -> String {
    let bytes = component.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => match hex_pair(bytes.get(i + 1..i + 3)) {
                Some(byte) => {
                    decoded.push(byte);
                    i += 2;
                }
                None => decoded.push(b'%'),
            },
            other => decoded.push(other),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

/// Convierte dos dígitos hexadecimales en un byte
fn hex_pair(pair: Option<&[u8]>) -> Option<u8> {
    let digit = |byte: u8| (byte as char).to_digit(16);
    match pair? {
        [high, low] => Some((digit(*high)? * 16 + digit(*low)?) as u8),
        _ => None,
    }
}
