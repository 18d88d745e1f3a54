//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! X-Request-Id: abc123\r\n
//! Content-Type: application/json; charset=UTF-8\r\n
//! Content-Length: 12\r\n
//! \r\n
//! {"ok":true}
//! ```
//!
//! El tipo y el charset viven solo en el header `Content-Type`: los builders
//! lo reescriben y las consultas de [`Message`] lo leen. Al serializar,
//! `Content-Type` se normaliza y `Content-Length` se calcula del body ya
//! codificado; cualquier valor puesto a mano se sobrescribe.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_protocol::http::{MimeType, Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("x-request-id", "abc123")
//!     .with_content_type(MimeType::Text)
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes().unwrap();
//! // Ahora puedes enviar `bytes` por el socket
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::charset::Charset;
use super::error::{HttpError, Result};
use super::header::{Headers, CONTENT_LENGTH, CONTENT_TYPE};
use super::limits::ParseLimits;
use super::message::{self, Message};
use super::mime::MimeType;
use super::status::StatusCode;
use super::wire;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{BufRead, Write};

/// Payload de la respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    /// Bytes que se envían tal cual
    Bytes(Vec<u8>),

    /// Texto que se codifica con el charset de la respuesta al serializar
    Text(String),
}

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers adicionales, en orden de inserción
    headers: Headers,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Body,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto no tiene headers, el body es vacío, el tipo es
    /// `application/octet-stream` y el charset UTF-8.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Body::Bytes(Vec::new()),
        }
    }

    /// Agrega un header a la respuesta (si ya existe, se sobrescribe)
    pub fn with_header(mut self, label: &str, value: &str) -> Self {
        self.add_header(label, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    ///
    /// Un `Content-Type` puesto a mano pasa a ser el tipo y el charset
    /// declarados.
    pub fn add_header(&mut self, label: &str, value: &str) {
        self.headers.set(label, value);
    }

    /// Declara el tipo de contenido
    ///
    /// Reescribe `Content-Type` conservando el charset ya declarado.
    pub fn with_content_type(mut self, content_type: MimeType) -> Self {
        let charset = self.declared_charset();
        self.headers.set(CONTENT_TYPE, &content_type_value(content_type, charset));
        self
    }

    /// Declara el charset del body de texto
    ///
    /// Reescribe `Content-Type` con el tipo actual y el parámetro `charset`.
    pub fn with_charset(mut self, charset: Charset) -> Self {
        let content_type = self.content_type();
        self.headers.set(CONTENT_TYPE, &content_type_value(content_type, Some(charset)));
        self
    }

    /// Charset puesto explícitamente en `Content-Type`, si lo hay
    fn declared_charset(&self) -> Option<Charset> {
        self.headers
            .subvalue(CONTENT_TYPE, "charset")
            .map(|_| self.charset())
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// El texto se codifica con el charset declarado al serializar.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Body::Text(body.to_string());
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (imágenes, archivos comprimidos, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = Body::Bytes(body);
        self
    }

    /// Crea una respuesta JSON exitosa (200 OK)
    ///
    /// # Ejemplo
    /// ```
    /// use http_protocol::http::{Message, MimeType, Response};
    ///
    /// let response = Response::json(&serde_json::json!({"status": "ok"})).unwrap();
    /// assert_eq!(response.content_type(), MimeType::Json);
    /// assert_eq!(response.body_text(), r#"{"status":"ok"}"#);
    /// ```
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(Self::new(StatusCode::Ok)
            .with_content_type(MimeType::Json)
            .with_body(&body))
    }

    /// Crea una respuesta HTML exitosa (200 OK)
    pub fn html(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type(MimeType::Html)
            .with_body(body)
    }

    /// Crea una respuesta de texto plano exitosa (200 OK)
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_content_type(MimeType::Text)
            .with_body(body)
    }

    /// Crea una respuesta de error con mensaje JSON
    ///
    /// Formato del JSON: `{"error":"mensaje"}`
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::new(status)
            .with_content_type(MimeType::Json)
            .with_body(&body)
    }

    /// Respuesta 404 estándar
    pub fn not_found() -> Self {
        Self::error(StatusCode::NotFound, StatusCode::NotFound.reason_phrase())
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body codificado tal como viajará por el cable
    ///
    /// Falla con `UnencodableBody` si el texto no cabe en el charset.
    pub fn encoded_body(&self) -> Result<Cow<'_, [u8]>> {
        match &self.body {
            Body::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            Body::Text(text) => self.charset().encode(text),
        }
    }

    /// Body como texto (los bytes se decodifican con el charset declarado)
    pub fn body_text(&self) -> String {
        match &self.body {
            Body::Text(text) => text.clone(),
            Body::Bytes(bytes) => self.charset().decode(bytes),
        }
    }

    /// Headers finales: los agregados más `Content-Type` y `Content-Length`
    ///
    /// Falla con `InvalidHeader` si algún header rompería la línea al
    /// escribirse.
    pub fn wire_headers(&self) -> Result<Headers> {
        let length = self.encoded_body()?.len();
        self.headers_for(length)
    }

    fn headers_for(&self, length: usize) -> Result<Headers> {
        let mut headers = self.headers.clone();
        let value = content_type_value(self.content_type(), self.declared_charset());
        headers.set(CONTENT_TYPE, &value);
        headers.set(CONTENT_LENGTH, &length.to_string());

        if let Some(header) = headers.iter().find(|header| !header.is_wire_safe()) {
            return Err(HttpError::InvalidHeader(header.label().to_string()));
        }
        Ok(headers)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        self.write_to(&mut result)?;
        Ok(result)
    }

    /// Escribe la respuesta completa en un stream
    ///
    /// El body se codifica y los headers se validan antes de escribir: si
    /// algo falla, no se escribe nada.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let body = self.encoded_body()?;
        let headers = self.headers_for(body.len())?;

        // 1. Status line
        // Formato: HTTP/1.1 200 OK\r\n
        write!(out, "{} {}", wire::HTTP_VERSION, self.status)?;
        out.write_all(wire::CRLF)?;

        // 2. Headers
        // Formato: Header-Name: Value\r\n
        for header in &headers {
            write!(out, "{}: {}", header.key(), header.value())?;
            out.write_all(wire::CRLF)?;
        }

        // 3. Línea vacía que separa headers del body
        out.write_all(wire::CRLF)?;

        // 4. Body (si existe)
        out.write_all(&body)?;

        tracing::debug!(status = %self.status, length = body.len(), "Response written");
        Ok(())
    }

    /// Parsea una respuesta serializada desde bytes en memoria
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let mut input = buffer;
        Self::read_from(&mut input)
    }

    /// Lee una respuesta desde un stream con los límites por defecto
    pub fn read_from<R: BufRead>(input: &mut R) -> Result<Self> {
        Self::read_with_limits(input, &ParseLimits::default())
    }

    /// Lee una respuesta desde un stream
    ///
    /// El body se conserva como bytes; tipo y charset salen de los headers.
    pub fn read_with_limits<R: BufRead>(input: &mut R, limits: &ParseLimits) -> Result<Self> {
        let line = wire::read_line(input, limits)?.unwrap_or_default();
        let status = Self::parse_status_line(&line)?;
        tracing::debug!(%status, "Status line parsed");

        let headers = wire::read_headers(input, limits)?;
        let length = message::content_length(&headers);
        let body = wire::read_body(input, length, limits)?;

        Ok(Self {
            status,
            headers,
            body: Body::Bytes(body),
        })
    }

    /// Parsea la status line
    ///
    /// Formato: `HTTP/1.1 404 Not Found` (el reason phrase puede tener espacios)
    fn parse_status_line(line: &str) -> Result<StatusCode> {
        let mut parts = line.splitn(3, ' ');
        let (version, code) = match (parts.next(), parts.next()) {
            (Some(version), Some(code)) if version.starts_with(wire::PROTOCOL_PREFIX) => (version, code),
            _ => return Err(HttpError::MalformedStartLine(line.to_string())),
        };
        tracing::trace!(version, "Status line version");

        let code: u16 = code
            .parse()
            .map_err(|_| HttpError::MalformedStartLine(line.to_string()))?;
        StatusCode::from_u16(code).ok_or_else(|| HttpError::UnknownStatus(code.to_string()))
    }
}

impl Message for Response {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Largo del body codificado (0 si no se puede codificar)
    ///
    /// `Content-Length` recién se escribe al serializar, así que se calcula
    /// del body en vez de leerse de los headers.
    fn content_length(&self) -> usize {
        self.encoded_body().map(|body| body.len()).unwrap_or(0)
    }
}

/// Valor de `Content-Type`
///
/// Lleva `charset` si el tipo es de texto (UTF-8 si no se declaró otro) o si
/// se declaró uno explícitamente.
fn content_type_value(content_type: MimeType, charset: Option<Charset>) -> String {
    match charset {
        Some(charset) => format!("{}; charset={}", content_type.code(), charset.name()),
        None if content_type.is_text() => {
            format!("{}; charset={}", content_type.code(), Charset::utf8().name())
        }
        None => content_type.code().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_text(response: &Response) -> String {
        String::from_utf8(response.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert_eq!(response.content_length(), 0);
        assert_eq!(response.content_type(), MimeType::Raw);
        assert_eq!(response.charset(), Charset::utf8());
    }

    #[test]
    fn test_with_header() {
        let response = Response::new(StatusCode::Ok)
            .with_header("x-custom", "value")
            .with_header("X-CUSTOM", "other");

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers().value("X-Custom"), Some("other"));
    }

    #[test]
    fn test_content_type_header_updates_declared_type() {
        let response = Response::new(StatusCode::Ok)
            .with_header("content-type", "text/html; charset=latin1");

        assert_eq!(response.content_type(), MimeType::Html);
        assert_eq!(response.charset().name(), "windows-1252");
    }

    #[test]
    fn test_to_bytes_exact() {
        let response = Response::new(StatusCode::Ok)
            .with_header("X-Id", "7")
            .with_content_type(MimeType::Text)
            .with_body("Hellå");

        assert_eq!(
            wire_text(&response),
            "HTTP/1.1 200 OK\r\n\
             X-Id: 7\r\n\
             Content-Type: text/plain; charset=UTF-8\r\n\
             Content-Length: 6\r\n\
             \r\n\
             Hellå"
        );
    }

    #[test]
    fn test_content_length_overrides_manual_value() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Length", "999")
            .with_content_type(MimeType::Text)
            .with_body("abc");
        let text = wire_text(&response);

        assert!(text.contains("Content-Length: 3\r\n"));
        assert!(!text.contains("999"));
        // Content-Length conserva su posición original
        assert!(text.starts_with("HTTP/1.1 200 OK\r\nContent-Length: 3\r\n"));
    }

    #[test]
    fn test_raw_body_has_no_charset() {
        let response = Response::new(StatusCode::Ok).with_body_bytes(vec![0x00, 0x01, 0xFF]);
        let bytes = response.to_bytes().unwrap();
        let head = String::from_utf8_lossy(&bytes);

        assert!(head.contains("Content-Type: application/octet-stream\r\n"));
        assert!(head.contains("Content-Length: 3\r\n"));
        assert!(bytes.ends_with(&[0x00, 0x01, 0xFF]));
    }

    #[test]
    fn test_body_encoded_with_declared_charset() {
        let latin = Charset::for_label("latin1").unwrap();
        let response = Response::text("Hå").with_charset(latin);

        assert_eq!(response.content_length(), 2);
        let bytes = response.to_bytes().unwrap();
        assert!(bytes.ends_with(&[0x48, 0xE5]));
    }

    #[test]
    fn test_unencodable_body() {
        let latin = Charset::for_label("latin1").unwrap();
        let response = Response::text("☃").with_charset(latin);

        let mut out = Vec::new();
        let result = response.write_to(&mut out);
        assert!(matches!(result, Err(HttpError::UnencodableBody { .. })));
        // No se escribió nada
        assert!(out.is_empty());
        assert_eq!(response.content_length(), 0);
    }

    #[test]
    fn test_declared_facets_live_in_headers() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html")
            .with_content_type(MimeType::Json);

        assert_eq!(response.headers().value("Content-Type"), Some("application/json; charset=UTF-8"));
        assert_eq!(response.content_type(), MimeType::Json);

        let latin = Charset::for_label("latin1").unwrap();
        let response = response.with_charset(latin).with_content_type(MimeType::Text);
        assert_eq!(response.headers().subvalue("Content-Type", "charset"), Some("windows-1252"));
        assert_eq!(response.content_type(), MimeType::Text);
        assert_eq!(response.charset(), latin);
    }

    #[test]
    fn test_header_with_line_break_is_rejected() {
        let response = Response::new(StatusCode::Ok).with_header("X-A", "v\r\nSet-Cookie: evil=1");

        let mut out = Vec::new();
        let result = response.write_to(&mut out);
        assert!(matches!(result, Err(HttpError::InvalidHeader(label)) if label == "X-A"));
        // No se escribió nada
        assert!(out.is_empty());
        assert!(response.wire_headers().is_err());

        let response = Response::new(StatusCode::Ok).with_header("X:A", "v");
        assert!(matches!(response.to_bytes(), Err(HttpError::InvalidHeader(_))));
    }

    #[test]
    fn test_json_response() {
        let response = Response::json(&serde_json::json!({ "status": "ok" })).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), MimeType::Json);
        assert!(wire_text(&response).contains("Content-Type: application/json; charset=UTF-8\r\n"));
        assert_eq!(response.body_text(), r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_error_response_escapes_message() {
        let response = Response::error(StatusCode::BadRequest, r#"bad "quote""#);

        assert_eq!(response.status(), StatusCode::BadRequest);
        let value: serde_json::Value = serde_json::from_str(&response.body_text()).unwrap();
        assert_eq!(value["error"], r#"bad "quote""#);
    }

    #[test]
    fn test_not_found() {
        let response = Response::not_found();
        assert!(wire_text(&response).starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_empty_body_response() {
        let text = wire_text(&Response::new(StatusCode::NoContent));
        assert!(text.ends_with("Content-Length: 0\r\n\r\n"));
    }

    // ==================== Lectura ====================

    #[test]
    fn test_round_trip() {
        let original = Response::html("<p>Wørld</p>")
            .with_header("X-Request-Id", "abc123")
            .with_header("Date", "Tue, 15 Nov 1994 08:12:31 GMT");
        let bytes = original.to_bytes().unwrap();
        let parsed = Response::parse(&bytes).unwrap();

        assert_eq!(parsed.status(), original.status());
        assert_eq!(parsed.headers(), &original.wire_headers().unwrap());
        assert_eq!(parsed.content_type(), MimeType::Html);
        assert_eq!(parsed.charset(), original.charset());
        assert_eq!(parsed.encoded_body().unwrap(), original.encoded_body().unwrap());
        assert_eq!(parsed.body_text(), "<p>Wørld</p>");
        assert_eq!(parsed.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_padded_header() {
        let original = Response::text("x").with_header("  X-A ", " padded ");
        let parsed = Response::parse(&original.to_bytes().unwrap()).unwrap();

        assert_eq!(parsed.headers().value("X-A"), Some("padded"));
        assert_eq!(parsed.headers(), &original.wire_headers().unwrap());
    }

    #[test]
    fn test_parse_status_line_errors() {
        assert!(matches!(Response::parse(b"HTTP/1.1\r\n\r\n"), Err(HttpError::MalformedStartLine(_))));
        assert!(matches!(Response::parse(b"SIP/2.0 200 OK\r\n\r\n"), Err(HttpError::MalformedStartLine(_))));
        assert!(matches!(Response::parse(b"HTTP/1.1 abc OK\r\n\r\n"), Err(HttpError::MalformedStartLine(_))));
        assert!(matches!(Response::parse(b"HTTP/1.1 418 I'm a teapot\r\n\r\n"), Err(HttpError::UnknownStatus(code)) if code == "418"));
    }
}
