//! # Query Gateway
//!
//! Turns one set of request parameters into one response.
//!
//! ```text
//! Idle → ParamsParsed → FormatValidated → CaptureActive → Executed → Responded → Idle
//! ```
//!
//! - An unknown format is rejected (400) before a capture is opened or
//!   any query work is done.
//! - A capture that cannot be opened yields 500.
//! - Errors while building the filter, compiling the matcher or printing
//!   map to a status by their kind alone (see [`status_for`]). The
//!   capture is released before the error response is built.
//! - With serialization on, the whole pipeline runs under one lock.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{ErrorKind, GolError, GolResult};
use crate::observability::{ObservationScope, Severity};
use crate::query::{run_query, OutputFormat, QueryRequest, CSV_KEYS};
use crate::store::FeatureSource;

use super::capture::OutputCapture;
use super::config::ServerConfig;
use super::params::QueryParams;

/// Body of a rejected format
pub const INVALID_FORMAT_BODY: &str = "Invalid format";

/// Body of every internal failure
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// HTTP status for an error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::User => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status, content type and body of one gateway response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl GatewayResponse {
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into().into_bytes(),
        }
    }

    pub fn internal_error() -> Self {
        Self::text(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
    }

    /// Plain-text response for a pipeline error; internal detail is not exposed
    pub fn from_error(err: &GolError) -> Self {
        match err.kind() {
            ErrorKind::User => Self::text(status_for(ErrorKind::User), err.to_string()),
            ErrorKind::Internal => Self::internal_error(),
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

impl IntoResponse for GolError {
    fn into_response(self) -> Response {
        GatewayResponse::from_error(&self).into_response()
    }
}

/// The request handler behind `GET /`
pub struct QueryGateway {
    source: Arc<dyn FeatureSource>,
    lock: Mutex<()>,
    serialize: bool,
    precision: usize,
    capture_dir: Option<PathBuf>,
}

impl QueryGateway {
    pub fn new(source: Arc<dyn FeatureSource>, config: &ServerConfig) -> Self {
        Self {
            source,
            lock: Mutex::new(()),
            serialize: config.serialize_requests,
            precision: config.precision,
            capture_dir: config.capture_dir.clone(),
        }
    }

    /// Handle one request from start to finished response
    pub fn handle(&self, params: &QueryParams) -> GatewayResponse {
        let _serialized = self
            .serialize
            .then(|| self.lock.lock().unwrap_or_else(PoisonError::into_inner));

        let scope = ObservationScope::with_fields(
            "REQUEST",
            &[("format", params.format.as_str()), ("query", params.query.as_str())],
        );

        let format = params.output_format();
        if format.is_unknown() {
            scope.fail_with_fields(
                Severity::Warn,
                &[("reason", INVALID_FORMAT_BODY), ("status", "400")],
            );
            return GatewayResponse::text(StatusCode::BAD_REQUEST, INVALID_FORMAT_BODY);
        }

        let mut capture = match OutputCapture::begin(self.capture_dir.as_deref()) {
            Ok(capture) => capture,
            Err(e) => {
                scope.fail_with_fields(
                    Severity::Error,
                    &[("reason", e.to_string().as_str()), ("status", "500")],
                );
                return GatewayResponse::internal_error();
            }
        };

        let outcome = self.execute(format, params, capture.writer());
        let body = match outcome {
            Ok(()) => capture.finish().map_err(GolError::from),
            Err(err) => {
                drop(capture);
                Err(err)
            }
        };

        match body {
            Ok(body) => {
                scope.complete_with_fields(&[
                    ("bytes", body.len().to_string().as_str()),
                    ("status", "200"),
                ]);
                GatewayResponse {
                    status: StatusCode::OK,
                    content_type: format.content_type(),
                    body,
                }
            }
            Err(err) => {
                let response = GatewayResponse::from_error(&err);
                let reason = err.to_string();
                let status = response.status.as_u16().to_string();
                let severity = match err.kind() {
                    ErrorKind::User => Severity::Info,
                    ErrorKind::Internal => Severity::Error,
                };
                scope.fail_with_fields(
                    severity,
                    &[("reason", reason.as_str()), ("status", status.as_str())],
                );
                response
            }
        }
    }

    /// Run the query for `params` into `out`
    fn execute(
        &self,
        format: OutputFormat,
        params: &QueryParams,
        out: &mut dyn Write,
    ) -> GolResult<()> {
        let request = QueryRequest {
            query: &params.query,
            bbox: &params.bbox,
            area: &params.area,
            keys: if format == OutputFormat::Csv { CSV_KEYS } else { "" },
            precision: self.precision,
        };
        run_query(self.source.as_ref(), format, &request, out)
    }
}
