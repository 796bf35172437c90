use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use school_api::config::AppConfig;
use school_api::startup;

#[derive(Parser, Debug)]
#[command(name = "school-api")]
#[command(about = "REST API for teachers, students, classrooms, subjects and executives")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut app_config =
        if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists() {
            tracing::warn!("no config.yaml found, using in-memory SQLite defaults");
            AppConfig::default_config()
        } else {
            AppConfig::load_from_file(&args.config)?
        };

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    let backend = startup::build_backend(&app_config).await?;
    let app = startup::build_router(backend, &app_config);

    let host: IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        tracing::warn!(host = %app_config.server.host, "invalid host address, using 127.0.0.1");
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    tracing::info!(%addr, database = %app_config.database.url, "school API listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
