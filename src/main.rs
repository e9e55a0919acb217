//! Inkpost service entry point.
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────┐
//! │  Config  │───▶│  Stores + │───▶│ Gateway  │
//! │  (YAML)  │    │  Services │    │ (axum)   │
//! └──────────┘    └───────────┘    └──────────┘
//! ```
//!
//! Configuration (signing secret, token TTL, hashing work factor) is
//! loaded once here and never mutated afterwards.

use std::sync::Arc;

use anyhow::Context;

use inkpost::auth::AuthService;
use inkpost::config::AppConfig;
use inkpost::gateway::{self, state::AppState};
use inkpost::logging::init_logging;
use inkpost::store::{PostStore, UserStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);

    let _log_guard = init_logging(&config);
    tracing::info!("starting inkpost (env: {})", env);

    let users = Arc::new(UserStore::new());
    let posts = Arc::new(PostStore::new());
    let auth = Arc::new(
        AuthService::new(users.clone(), &config.auth)
            .context("failed to build auth service")?,
    );

    let state = Arc::new(AppState::new(
        users,
        posts,
        auth,
        config.upload.clone(),
    ));

    gateway::run_server(&config.gateway, state).await
}
