//! Server and migration command handlers.

use std::net::SocketAddr;
use std::sync::Arc;
use verne::{
    ApiState, ConfigError, VerneConfig, VerneResult, establish_connection,
    establish_connection_with_url, run_migrations,
};

use super::build_pipeline;

/// Start the HTTP server on the configured or overridden bind address.
pub async fn handle_serve(config: &VerneConfig, bind: Option<String>) -> VerneResult<()> {
    let addr = bind
        .unwrap_or_else(|| config.server.bind_addr.clone())
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::new(format!("Invalid bind address: {e}")))?;

    let (pipeline, store) = build_pipeline(config)?;
    let state = ApiState::new(Arc::new(pipeline), store);

    verne::serve(addr, state).await
}

/// Apply pending database migrations.
pub fn handle_migrate(config: &VerneConfig) -> VerneResult<()> {
    let mut conn = match &config.database.url {
        Some(url) => establish_connection_with_url(url)?,
        None => establish_connection()?,
    };

    run_migrations(&mut conn)?;
    println!("Migrations applied");
    Ok(())
}
