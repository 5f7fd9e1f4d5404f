use anyhow::Context;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use std::sync::Arc;
use todolist_api::{app, AppState};
use todolist_core::db;
use todolist_core::repository::SqliteRepository;
use todolist_core::service::TaskService;

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(default = "default_database_path")]
    database_path: String,
    #[serde(default)]
    api: ApiConfig,
}

#[derive(Deserialize, Debug)]
struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    bind_addr: String,
}

fn default_database_path() -> String {
    "todolist.db".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn load_config() -> Result<Config, figment::Error> {
    Figment::new()
        .merge(Toml::file("todolist.toml"))
        .merge(Env::prefixed("TODOLIST_").split("__"))
        .extract()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config().context("failed to load configuration")?;

    let pool = db::establish_connection(&config.database_path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_path))?;
    let repository = Arc::new(SqliteRepository::new(pool));
    let state = AppState::new(TaskService::new(repository));

    let listener = tokio::net::TcpListener::bind(&config.api.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.api.bind_addr))?;
    tracing::info!("todolist API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
