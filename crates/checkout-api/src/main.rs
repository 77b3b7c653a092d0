//! # Checkout-Gate RS
//!
//! Validation gate in front of checkout processing.
//!
//! ## Usage
//!
//! ```bash
//! # Optional configuration
//! export HOST=0.0.0.0
//! export PORT=8080
//!
//! # Run the server
//! checkout-gate
//! ```

use checkout_api::{config::AppConfig, routes};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    let config = AppConfig::from_env();
    let addr = config.socket_addr();
    let is_prod = config.is_production();

    info!("Environment: {}", config.environment);

    // Create router
    let app = routes::create_router();

    // Start server
    info!("Checkout-Gate starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Checkout: POST http://{}/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Checkout-Gate RS
  ----------------
  Checkout acceptance gate
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
