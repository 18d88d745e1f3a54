//! # HTTP Protocol - Entry Point
//! src/main.rs
//!
//! Lee un mensaje HTTP crudo desde un archivo o stdin, lo parsea e imprime un
//! resumen. Con `--echo` escribe en stdout una response que devuelve el body
//! del request (o un 400 si el request es inválido).

use http_protocol::config::{Config, Mode};
use http_protocol::http::{
    Charset, HttpError, Message, Method, MimeType, ParseLimits, Request, Response, StatusCode,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Resumen de un request parseado
#[derive(Serialize)]
struct RequestSummary<'a> {
    method: Method,
    resource: &'a str,
    version: &'a str,
    content_type: MimeType,
    charset: Charset,
    content_length: usize,
    headers: Vec<(&'a str, &'a str)>,
    body: &'a str,
}

/// Resumen de una response parseada
#[derive(Serialize)]
struct ResponseSummary<'a> {
    status: StatusCode,
    reason: &'static str,
    content_type: MimeType,
    charset: Charset,
    content_length: usize,
    headers: Vec<(&'a str, &'a str)>,
    body: String,
}

fn main() -> ExitCode {
    let config = Config::new();
    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Failed to process message");
            ExitCode::FAILURE
        }
    }
}

/// Inicializa el subscriber de logs (siempre en stderr)
fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(config: &Config) -> Result<(), HttpError> {
    let mut input: Box<dyn BufRead> = match &config.input {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading message from file");
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let limits = config.limits();

    match config.mode {
        Mode::Request => handle_request(&mut input, &limits, config, &mut out),
        Mode::Response => handle_response(&mut input, &limits, config, &mut out),
    }
}

fn handle_request<R: BufRead, W: Write>(
    input: &mut R,
    limits: &ParseLimits,
    config: &Config,
    out: &mut W,
) -> Result<(), HttpError> {
    let request = match Request::read_with_limits(input, limits) {
        Ok(request) => request,
        Err(e) => {
            if config.echo {
                Response::error(StatusCode::BadRequest, &e.to_string()).write_to(out)?;
                out.flush()?;
            }
            return Err(e);
        }
    };

    tracing::info!(
        method = %request.method(),
        resource = request.resource(),
        content_length = request.content_length(),
        "Request parsed"
    );

    if config.echo {
        let response = Response::new(StatusCode::Ok)
            .with_content_type(request.content_type())
            .with_charset(request.charset())
            .with_body(request.body());
        response.write_to(out)?;
        out.flush()?;
        return Ok(());
    }

    let summary = RequestSummary {
        method: request.method(),
        resource: request.resource(),
        version: request.version(),
        content_type: request.content_type(),
        charset: request.charset(),
        content_length: request.content_length(),
        headers: request.headers().iter().map(|h| (h.key(), h.value())).collect(),
        body: request.body(),
    };

    if config.json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{} {} {}", summary.method, summary.resource, summary.version)?;
        for (key, value) in &summary.headers {
            writeln!(out, "{}: {}", key, value)?;
        }
        writeln!(out, "----------")?;
        writeln!(out, "{}", summary.body)?;
        writeln!(out, "----------")?;
        writeln!(out, "{} ({})", summary.content_type, summary.charset)?;
    }

    Ok(())
}

fn handle_response<R: BufRead, W: Write>(
    input: &mut R,
    limits: &ParseLimits,
    config: &Config,
    out: &mut W,
) -> Result<(), HttpError> {
    let response = Response::read_with_limits(input, limits)?;
    tracing::info!(status = %response.status(), "Response parsed");

    let summary = ResponseSummary {
        status: response.status(),
        reason: response.status().reason_phrase(),
        content_type: response.content_type(),
        charset: response.charset(),
        content_length: response.content_length(),
        headers: response.headers().iter().map(|h| (h.key(), h.value())).collect(),
        body: response.body_text(),
    };

    if config.json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", summary.status)?;
        for (key, value) in &summary.headers {
            writeln!(out, "{}: {}", key, value)?;
        }
        writeln!(out, "----------")?;
        writeln!(out, "{}", summary.body)?;
    }

    Ok(())
}
