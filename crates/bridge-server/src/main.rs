mod api;
mod cache;
mod config;
mod models;
mod player_ws;
mod registry;
mod router;
mod state;

use std::path::PathBuf;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

const DEFAULT_BIND: &str = "0.0.0.0:4391";

#[derive(Parser, Debug)]
#[command(name = "spotify-bridge-server")]
struct Args {
    /// HTTP bind address, e.g. 0.0.0.0:4391
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,

    /// Shared secret for command paths (overrides config)
    #[arg(long)]
    auth_token: Option<String>,

    /// Optional dashboard directory served at /
    #[arg(long)]
    dashboard_dir: Option<PathBuf>,

    /// Optional server config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info")),
        )
        .init();

    let cfg = match args.config.as_ref() {
        Some(path) => config::ServerConfig::load(path)?,
        None => config::ServerConfig::default(),
    };
    let bind = match args.bind {
        Some(addr) => addr,
        None => config::bind_from_config(&cfg)?
            .unwrap_or_else(|| DEFAULT_BIND.parse().expect("default bind")),
    };
    let auth_token = args
        .auth_token
        .or_else(|| cfg.auth_token.clone())
        .context("auth_token is required; pass --auth-token or set it in the config file")?;
    let dashboard_dir = args
        .dashboard_dir
        .or_else(|| config::dashboard_dir_from_config(&cfg));

    tracing::info!(bind = %bind, "starting spotify-bridge-server");
    if let Some(dir) = dashboard_dir.as_ref() {
        tracing::info!(dir = %dir.display(), "serving dashboard");
    }

    let _ = ctrlc::set_handler(move || {
        if let Some(system) = actix_web::rt::System::try_current() {
            system.stop();
        } else {
            std::process::exit(0);
        }
    });

    let state = web::Data::new(AppState::new(auth_token));

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(state.clone())
            .wrap(Logger::default().exclude("/status"))
            .service(player_ws::player_ws)
            .service(api::status)
            .service(api::playpause)
            .service(api::next_track)
            .service(api::previous_track)
            .service(api::shuffle)
            .service(api::repeat_mode)
            .service(api::mute)
            .service(api::unmute)
            .service(api::seek)
            .service(api::volume)
            .service(api::volume_up)
            .service(api::volume_down);
        if let Some(dir) = dashboard_dir.as_ref() {
            app = app.service(actix_files::Files::new("/", dir).index_file("index.html"));
        }
        app
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
