use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use granula::server::{self, ServerConfig};
use granula::{ElementRegistry, SimConfig, Simulation};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = match std::env::var("GRANULA_ELEMENTS") {
        Ok(path) => {
            info!(%path, "loading element bundle");
            ElementRegistry::from_json(&std::fs::read_to_string(path)?)?
        }
        Err(_) => ElementRegistry::builtin()?,
    };
    info!(elements = registry.len(), "element registry loaded");

    let addr: SocketAddr = match std::env::var("GRANULA_ADDR") {
        Ok(addr) => addr.parse()?,
        Err(_) => {
            let port: u16 = std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000);
            SocketAddr::from(([0, 0, 0, 0], port))
        }
    };

    let sim = Simulation::new(Arc::new(registry), SimConfig::default());
    let config = ServerConfig {
        addr,
        ..ServerConfig::default()
    };

    server::run(sim, config).await?;
    Ok(())
}
