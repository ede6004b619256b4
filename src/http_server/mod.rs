//! # gol HTTP Query Gateway
//!
//! Serves a single read-only endpoint over a Geo-Object Library.
//!
//! # Endpoints
//!
//! - `GET /?query=&format=&bbox=&area=` - run a GOQL query, formatted
//!
//! # Request pipeline
//!
//! listener → [`QueryGateway`] (serialization lock) → [`QueryParams`] →
//! spatial filter → matcher → printer into an [`OutputCapture`] →
//! response

pub mod capture;
pub mod config;
pub mod gateway;
pub mod params;
pub mod server;

pub use capture::OutputCapture;
pub use config::ServerConfig;
pub use gateway::{status_for, GatewayResponse, QueryGateway};
pub use params::QueryParams;
pub use server::GolServer;
