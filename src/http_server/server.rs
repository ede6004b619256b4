//! # HTTP Server
//!
//! Axum listener in front of the [`QueryGateway`].
//!
//! The gateway is synchronous; each request runs on the blocking pool so
//! a slow query never stalls the async workers that accept connections.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::error::{GolError, GolResult};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::FeatureSource;

use super::config::ServerConfig;
use super::gateway::{GatewayResponse, QueryGateway};
use super::params::QueryParams;

/// Shared state of the gateway route
#[derive(Clone)]
struct GatewayState {
    gateway: Arc<QueryGateway>,
    cors_origin: HeaderValue,
}

/// HTTP server for a Geo-Object Library
pub struct GolServer {
    config: ServerConfig,
    router: Router,
}

impl GolServer {
    /// Create a server over `source`; fails on an invalid configuration
    pub fn new(source: Arc<dyn FeatureSource>, config: ServerConfig) -> GolResult<Self> {
        config.validate()?;
        let state = GatewayState {
            gateway: Arc::new(QueryGateway::new(source, &config)),
            cors_origin: config.cors_header()?,
        };
        let router = Router::new()
            .route("/", get(query_handler))
            .with_state(state);
        Ok(Self { config, router })
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process ends
    pub async fn start(self) -> GolResult<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|_| {
            GolError::InvalidConfig(format!("Invalid listen address: {}", self.socket_addr()))
        })?;

        let listener = TcpListener::bind(addr).await?;
        println!("Listening on port {}...", self.config.port);
        log_event_with_fields(
            Event::Serving,
            &[
                ("addr", addr.to_string().as_str()),
                ("cors", self.config.cors_origin.as_str()),
                (
                    "serialized",
                    if self.config.serialize_requests { "true" } else { "false" },
                ),
            ],
        );

        axum::serve(listener, self.router).await?;
        log_event(Event::ServerStopped);
        Ok(())
    }
}

async fn query_handler(
    State(state): State<GatewayState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let response = match pairs {
        Ok(Query(pairs)) => run_gateway(&state, QueryParams::from_pairs(pairs)).await,
        Err(rejection) => {
            let reason = rejection.body_text();
            log_event_with_fields(Event::RequestRejected, &[("reason", reason.as_str())]);
            GatewayResponse::text(StatusCode::BAD_REQUEST, reason)
        }
    };

    let mut http = response.into_response();
    let headers = http.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, state.cors_origin.clone());
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
    http
}

async fn run_gateway(state: &GatewayState, params: QueryParams) -> GatewayResponse {
    let gateway = Arc::clone(&state.gateway);
    tokio::task::spawn_blocking(move || gateway.handle(&params))
        .await
        .unwrap_or_else(|e| {
            log_event_with_fields(Event::RequestFailed, &[("reason", e.to_string().as_str())]);
            GatewayResponse::internal_error()
        })
}
