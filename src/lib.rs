//! # HTTP Protocol
//! src/lib.rs
//!
//! Motor de mensajes HTTP/1.x: lee requests desde un stream de bytes y
//! serializa responses. Está pensado para ser llamado por un servidor externo
//! (que maneja sockets, concurrencia y routing) con un stream ya abierto.
//!
//! ## Arquitectura
//!
//! - `http`: headers, mensajes, parsing de requests y construcción de responses
//! - `config`: configuración del CLI que acompaña a la librería
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_protocol::http::{Message, Method, Request, Response};
//!
//! let raw = b"PUT /member/7 HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nhi";
//! let request = Request::parse(raw).unwrap();
//! assert_eq!(request.method(), Method::PUT);
//!
//! let response = Response::text(request.body());
//! assert_eq!(response.content_length(), 2);
//! ```

pub mod config;
pub mod http;
