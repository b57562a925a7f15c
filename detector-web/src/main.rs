//! detector-web - AI-generated image detector
//!
//! Serves an upload form, forwards each image to the detection service and
//! shows the probability that it is AI-generated.
//!
//! Startup:
//! 1. Bootstrap config (CLI > env > TOML > defaults)
//! 2. Tracing
//! 3. Credentials; on failure the service serves setup guidance only

use anyhow::{Context, Result};
use clap::Parser;
use detector_common::config::{default_config_path, load_toml_config, ConfigOverrides};
use detector_common::load_credentials;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use detector_web::services::DetectionClient;
use detector_web::{build_router, build_setup_router, AppState, SetupState};

/// Command-line arguments for detector-web
#[derive(Parser, Debug)]
#[command(name = "detector-web")]
#[command(about = "AI-generated image detector web service")]
#[command(version)]
struct Args {
    /// Bootstrap TOML configuration file
    #[arg(short, long, env = "DETECTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "DETECTOR_PORT")]
    port: Option<u16>,

    /// Secrets file holding the detection service credentials
    #[arg(short, long, env = "DETECTOR_SECRETS_FILE")]
    secrets: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DETECTOR_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let file_config = load_toml_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let config_found = file_config.is_some();

    let config = file_config.unwrap_or_default().with_overrides(ConfigOverrides {
        port: args.port,
        secrets_file: args.secrets,
        log_level: args.log_level,
    });
    config.validate().context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("detector_web={level},detector_common={level},tower_http={level}").into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting detector-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if config_found {
        info!("Loaded configuration from {}", config_path.display());
    } else {
        warn!(
            "Configuration file {} not found, using defaults",
            config_path.display()
        );
    }

    let app = match load_credentials(&config.secrets_file) {
        Ok(credentials) => {
            info!("Detection service credentials loaded");

            let client = DetectionClient::new(
                config.detection.endpoint.clone(),
                config.detection_timeout(),
            )
            .context("Failed to create detection client")?;
            info!(
                "Detection endpoint: {} (timeout {:?})",
                client.endpoint(),
                client.timeout()
            );

            build_router(AppState::new(credentials, client, config.max_upload_bytes))
        }
        Err(e) => {
            error!("Machine learning model credentials not found: {}", e);
            warn!("Uploads are disabled until credentials are configured and the service is restarted");
            build_setup_router(SetupState::new(&e, &config.secrets_file))
        }
    };
    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
