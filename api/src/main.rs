use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use ks_api::app::{create_app, AppSettings, AppState};
use ks_core::UserService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (reads .env first)
    let config = ks_api::config::load().context("invalid configuration")?;

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!("Starting Keystone API Server ({})", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET is not set; using the development secret");
    }

    let infra = ks_infra::initialize().await;
    let state = web::Data::new(AppState::new(UserService::new(infra.users, infra.events)));
    let settings = AppSettings::from(&config);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &settings));
    if let Some(workers) = config.server.workers {
        server = server.workers(workers.get());
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await
        .context("server error")
}
