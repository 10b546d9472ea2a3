// pagestat: fetch a page, fall back to the cached copy, and show text statistics.

mod analysis;
mod app;
mod cache;
mod config;
mod error;
mod logging;
mod pipeline;
mod provider;
mod remote;
mod state;
mod ui;

use std::sync::Arc;

use crate::app::App;
use crate::cache::FileStore;
use crate::config::AppConfig;
use crate::error::Result;
use crate::provider::ContentProvider;
use crate::remote::PageClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    let store = match &config.cache_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::open_default()?,
    };
    logging::init(store.base())?;

    let client = PageClient::new(&config)?;
    let url = client.url().to_string();
    tracing::info!(%url, cache = %store.base().display(), "starting pagestat");

    let provider = Arc::new(ContentProvider::new(client, store));
    let mut app = App::new(url, app::fetch_spawner(provider, config.analysis_options()));

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    Ok(())
}
