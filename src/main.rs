use crate::cache::ExpiringCache;
use crate::config::AppConfig;
use crate::state::AppState;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod errors;
mod featured;
mod listings;
mod responses;
mod router;
mod state;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mls_proxy=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1️⃣ Configuration; the API key is mandatory
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    // 2️⃣ Shared scrape cache, lives as long as the process
    let cache = Arc::new(ExpiringCache::new(config.featured_cache_ttl));

    let state = match AppState::new(&config, cache) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr = config.bind_addr();
    tracing::info!("MLS proxy running on http://{addr}");

    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| router::serve(req, &state));

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
