//! Terminal UI for the employee directory
//!
//! Run: cargo run -p directory-tui
//!
//! Talks to a running directory-server; set DIRECTORY_API_URL to point at a
//! non-default address.

mod app;
mod form;
mod table;
mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use directory_client::DirectoryClient;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

const DEFAULT_API_URL: &str = "http://localhost:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Route tracing into the in-app log pane instead of stdout, which the
    // terminal UI owns while running.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let base_url =
        std::env::var("DIRECTORY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = DirectoryClient::new(&base_url)?;
    tracing::info!("connecting to {}", client.base_url());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, tx);
    app.refetch();

    let result = run_app(&mut terminal, &mut app, rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut events: mpsc::UnboundedReceiver<app::AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Drain completed API calls before blocking on input
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()?
                && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            {
                app.handle_key(key);
            }
        }

        app.on_tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
