//! Silicon Scaling Projector - Transistor count projection client
//!
//! Submits process parameters to a remote prediction service and plots the
//! result against the historical Moore's Law trend.

mod charts;
mod client;
mod config;
mod gui;
mod model;
mod report;
mod state;

use anyhow::Context;
use client::HttpPredictionClient;
use config::AppConfig;
use eframe::egui;
use gui::ProjectorApp;
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let client = HttpPredictionClient::new(config.endpoint.clone())
        .context("building prediction client")?;
    info!(endpoint = client.endpoint(), "Prediction service configured");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 820.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Silicon Scaling Projector"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Silicon Scaling Projector",
        options,
        Box::new(move |cc| Ok(Box::new(ProjectorApp::new(cc, config, Arc::new(client))))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
