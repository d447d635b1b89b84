// =================================
//  StockLens: quotes & company news
// =================================

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use stocklens_client::prelude::*;

mod app;
mod cli;
mod display;
mod markup;

fn preprocess(level: log::LevelFilter) {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger; RUST_LOG wins over --trace, except that reqwest
    // stays at info because its debug lines print full URLs (token included)
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .filter_module("reqwest", log::LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    preprocess(cli.trace.into());
    log::info!("Command line input recorded: {cli:?}");

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    log::info!("Data provider: {}", config.base_url);

    let client = build_client(&config)?;
    let endpoints = config.endpoints();

    // fetches run here; the window keeps the main thread
    let runtime = tokio::runtime::Runtime::new()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::TITLE)
            .with_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        app::TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app::LensApp::new(client, endpoints, handle)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window closed with an error: {e}"))?;

    log::info!("StockLens closed");
    Ok(())
}
