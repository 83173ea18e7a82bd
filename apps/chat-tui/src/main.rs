//! Terminal chat client for the Super Builder bridge.
//!
//! Talks only to the bridge's HTTP surface; the gRPC backend stays an
//! implementation detail of the bridge.

mod app;
mod client;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use client::BridgeClient;

#[derive(Parser)]
#[command(name = "chat-tui")]
#[command(about = "Terminal chat client for the Super Builder bridge", long_about = None)]
struct Cli {
    /// Base URL of the chat bridge
    #[arg(long, env = "SB_BRIDGE_URL", default_value = "http://localhost:8003")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    sb_common::init_tracing("chat_tui")?;

    let client = BridgeClient::new(cli.api_url.trim_end_matches('/'));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let result = app.run(&mut terminal).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
