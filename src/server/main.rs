use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use crate::catalog::{CatalogAccessor, SqliteCatalog};
use crate::server::config::{self, Config};
use crate::server::http::{self, AppState, Templates, STATIC_PREFIX};
use crate::server::Args;
use crate::slideshow::{RotationState, SlideshowTicker};
use crate::utils;
use crate::utils::periodic::{self, Schedule};
use crate::weather::{ForecastClient, WeatherCache, WeatherRefresher};

pub async fn run_server() {
    let args = Args::parse();

    if let Err(e) = utils::init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        return;
    }

    if let Err(e) = run(args).await {
        tracing::error!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        cfg.server_config.listen_addr = listen;
    }
    tracing::debug!("config: {:?}", cfg);

    let templates = Templates::load(&cfg.server_config.templates_dir)?;

    let catalog: Arc<dyn CatalogAccessor> = Arc::new(SqliteCatalog::new(
        cfg.catalog_config.db_path.clone(),
        STATIC_PREFIX,
    ));
    match catalog.count_records().await {
        Ok(count) => tracing::info!("Catalog has {} images", count),
        Err(e) => tracing::warn!("Could not count catalog images: {}", e),
    }

    let rotation = Arc::new(RotationState::load(catalog.as_ref()).await);
    if rotation.is_empty() {
        tracing::warn!("No images available, the frame will report an empty catalog");
    }
    let weather = Arc::new(WeatherCache::new());

    let cancel = CancellationToken::new();
    let slideshow_task = periodic::spawn(
        Arc::new(SlideshowTicker::new(rotation.clone())),
        Schedule::every(cfg.slideshow_config.interval()),
        &cancel,
    );

    let weather_task = if cfg.weather_config.enabled {
        let client = ForecastClient::new(
            cfg.weather_config.points_url(),
            cfg.weather_config.timeout(),
            &cfg.weather_config.user_agent,
        );
        tracing::info!("Weather source: {}", client.points_url());
        Some(periodic::spawn(
            Arc::new(WeatherRefresher::new(client, weather.clone())),
            Schedule::immediately_then_every(cfg.weather_config.interval()),
            &cancel,
        ))
    } else {
        tracing::info!("Weather refresh disabled");
        None
    };

    let state = AppState {
        rotation,
        weather,
        catalog,
        templates: Arc::new(templates),
    };
    let app = http::router(state, &cfg.server_config.static_dir);

    let addr = cfg.server_config.listen_addr.clone();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server starting on {}", addr);

    tokio::spawn(cancel_on_signal(cancel.clone()));

    let served = http::serve(listener, app, cancel.clone()).await;

    cancel.cancel();
    slideshow_task.shutdown().await;
    if let Some(task) = weather_task {
        task.shutdown().await;
    }

    served.map_err(|e| anyhow::anyhow!("http server failed: {}", e))
}

async fn cancel_on_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = cancel.cancelled() => return,
    }
    tracing::info!("Shutdown signal received");
    cancel.cancel();
}
