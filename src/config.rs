//! # Configuración del CLI
//! src/config.rs
//!
//! Configuración del binario `http_protocol`, con soporte para argumentos CLI
//! y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! printf 'GET /member/7 HTTP/1.1\r\n\r\n' | ./http_protocol --json
//! ./http_protocol --input request.txt --echo
//! ./http_protocol --mode response --input response.txt
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_MAX_BODY=1024 HTTP_LOG=http_protocol=debug ./http_protocol --input request.txt
//! ```

use crate::http::ParseLimits;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Tipo de mensaje que se lee de la entrada
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Leer un request HTTP
    Request,

    /// Leer una response HTTP
    Response,
}

/// Configuración del CLI
#[derive(Debug, Clone, Parser)]
#[command(name = "http_protocol")]
#[command(about = "Parsea mensajes HTTP/1.x y serializa responses")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Archivo con el mensaje crudo (por defecto stdin)
    #[arg(short, long, env = "HTTP_INPUT")]
    pub input: Option<PathBuf>,

    /// Tipo de mensaje a leer
    #[arg(long, value_enum, default_value = "request", env = "HTTP_MODE")]
    pub mode: Mode,

    /// Escribir en stdout una response que devuelve el body del request
    #[arg(long)]
    pub echo: bool,

    /// Imprimir el resumen como JSON
    #[arg(long)]
    pub json: bool,

    // === Límites ===

    /// Largo máximo de una línea en bytes
    #[arg(long = "max-line-length", default_value = "8192", env = "HTTP_MAX_LINE_LENGTH")]
    pub max_line_length: usize,

    /// Cantidad máxima de headers
    #[arg(long = "max-headers", default_value = "100", env = "HTTP_MAX_HEADERS")]
    pub max_headers: usize,

    /// Largo máximo del body en bytes
    #[arg(long = "max-body", default_value = "10485760", env = "HTTP_MAX_BODY")]
    pub max_body_length: usize,

    // === Logging ===

    /// Filtro de logs (se usa si RUST_LOG no está definido)
    #[arg(long = "log", default_value = "http_protocol=info", env = "HTTP_LOG")]
    pub log_filter: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Límites del parser según la configuración
    pub fn limits(&self) -> ParseLimits {
        ParseLimits {
            max_line_length: self.max_line_length,
            max_headers: self.max_headers,
            max_body_length: self.max_body_length,
        }
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.max_line_length < 16 {
            return Err("Max line length must be >= 16".to_string());
        }
        if self.max_headers == 0 {
            return Err("Max headers must be >= 1".to_string());
        }
        if self.echo && self.mode == Mode::Response {
            return Err("Echo is only available in request mode".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        let limits = ParseLimits::default();
        Self {
            input: None,
            mode: Mode::Request,
            echo: false,
            json: false,
            max_line_length: limits.max_line_length,
            max_headers: limits.max_headers,
            max_body_length: limits.max_body_length,
            log_filter: "http_protocol=info".to_string(),
        }
    }
}
