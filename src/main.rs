mod api;
mod app;
mod config;
mod logger;
mod mqtt;
mod panel;
mod plotter;
mod poller;
mod series;
mod status;
mod types;
mod utils;

use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use eframe::egui;
use log::{error, info, warn};

use api::SacDmClient;
use app::SacDmApp;
use config::AppConfig;
use mqtt::{run_mqtt_client, FeedSignals};

fn main() {
    dotenv().ok();

    let config_path = AppConfig::config_path();
    let (mut config, config_error) = match AppConfig::load_or_create(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_env_overrides();

    logger::init_logger(&config.log_level);
    info!("Application starting");
    match config_error {
        Some(e) => warn!("Using default config, failed to load {}: {}", config_path.display(), e),
        None => info!("Loaded config from {}", config_path.display()),
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let client = match SacDmClient::new(&config.api.base_url, config.api.timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid baseline API configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Baseline API at {}", client.base_url());

    let (reading_sender, reading_receiver) = bounded(config.mqtt.channel_capacity);
    let feed_signals = FeedSignals::default();

    let mqtt_config = config.mqtt.clone();
    let mqtt_signals = feed_signals.clone();
    let mqtt_handle = thread::spawn(move || {
        if let Err(e) = run_mqtt_client(&mqtt_config, reading_sender, mqtt_signals) {
            error!("Reading feed thread failed: {}", e);
        }
    });

    let options = eframe::NativeOptions {
        vsync: config.window.vsync,
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_resizable(config.window.resizable),
        ..Default::default()
    };

    let title = config.window.title.clone();
    let handle = runtime.handle().clone();
    let app_signals = feed_signals.clone();
    if let Err(e) = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SacDmApp::new(
                config,
                handle,
                Arc::new(client),
                reading_receiver,
                app_signals,
            )))
        }),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // The app (and with it the poll loop) is gone; stop the feed next.
    info!("GUI closed, signaling reading feed to shutdown");
    feed_signals.request_shutdown();
    runtime.shutdown_background();

    match mqtt_handle.join() {
        Ok(()) => info!("Reading feed shut down"),
        Err(e) => error!("Reading feed thread panicked: {:?}", e),
    }
}
