use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{load_settings, DashboardClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DashboardApp;

#[derive(Parser, Debug)]
#[command(about = "E-commerce products, orders and users dashboard")]
struct Args {
    /// Gateway base URL; overrides dashboard.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings =
        load_settings(args.api_url.as_deref()).context("failed to load dashboard settings")?;
    tracing::info!(api_url = %settings.api_url, "starting dashboard");

    let client = DashboardClient::from_settings(&settings);
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("E-Commerce Dashboard")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    let api_url = settings.api_url;
    eframe::run_native(
        "E-Commerce Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::bootstrap(cmd_tx, ui_rx, api_url)))),
    )
    .map_err(|err| anyhow!("failed to run dashboard window: {err}"))
}
