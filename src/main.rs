// postpeek: browse posts from a GraphQL API through a stale-while-revalidate cache.

mod app;
mod cache;
mod config;
mod error;
mod graphql;
mod logging;
mod queries;
mod state;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};

use crate::app::App;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::Result;
use crate::graphql::{GraphQlClient, PostsApi};

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_or_warn(&config);
    info!("starting postpeek");

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let client = GraphQlClient::new(&config.endpoint)?;
    info!(endpoint = client.endpoint(), "client ready");
    let api: Arc<dyn PostsApi> = Arc::new(client);
    let cache = QueryCache::new(config.cache_config());
    let mut app = App::new(cache, api);

    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal);
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    info!("exiting");
    result?;
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
