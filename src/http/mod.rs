//! # Módulo HTTP
//!
//! Este módulo implementa un motor de mensajes HTTP/1.x desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Almacén de headers con claves canónicas y sub-valores
//! - Contrato común de mensajes (largo, tipo de contenido, charset)
//! - Parsing de requests desde un stream de bytes
//! - Construcción y serialización de responses
//!
//! No abre sockets ni maneja conexiones: recibe un stream ya abierto y
//! retorna mensajes (o escribe bytes en un stream de salida).
//!
//! ### Formato de Request
//!
//! ```text
//! GET /member/7 HTTP/1.1\r\n
//! Content-Type: text/plain; charset=UTF-8\r\n
//! Content-Length: 14\r\n
//! \r\n
//! <body>
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json; charset=UTF-8\r\n
//! Content-Length: 11\r\n
//! \r\n
//! {"ok":true}
//! ```

pub mod charset;   // Codificación de bodies
pub mod error;     // Tipos de error
pub mod header;    // Almacén de headers
pub mod limits;    // Límites del parser
pub mod message;   // Contrato común Request/Response
pub mod mime;      // Tipos de contenido
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP
pub mod wire;      // Lectura de líneas, headers y body

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use charset::Charset;
pub use error::{HttpError, Result};
pub use header::{Header, Headers};
pub use limits::ParseLimits;
pub use message::Message;
pub use mime::MimeType;
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
