//! # checkout-api
//!
//! HTTP API layer for checkout-gate-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout acceptance endpoint
//! - Stable error envelope responses for every validation failure
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/checkout` | Validate and accept a checkout request |

pub mod config;
pub mod handlers;
pub mod routes;

pub use config::AppConfig;
pub use routes::create_router;
