mod app;
mod config;
mod error;
mod event;
mod filter;
mod github;
mod logging;
mod state;
#[cfg(test)]
mod test_utils;
mod ui;

use app::{App, Request};
use clap::Parser;
use config::{Config, Overrides};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::AppEvent;
use futures::StreamExt;
use github::client::GitHubClient;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "lookout", about = "Terminal viewer for GitHub profiles and READMEs")]
struct Cli {
    #[arg(long, short, help = "Look up this GitHub user on start")]
    user: Option<String>,
    #[arg(long, help = "GitHub API base URL")]
    api_base: Option<String>,
    #[arg(long, help = "Seconds a cached response stays fresh")]
    cache_ttl: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(Overrides {
        api_base_url: cli.api_base,
        cache_ttl_secs: cli.cache_ttl,
    });

    if let Err(e) = logging::init(&config.resolved_log_file()) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::info!(?config, "starting");

    let client = match GitHubClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new();

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    if let Some(handle) = cli.user {
        app.query = handle;
        if let Some(request) = app.submit_search() {
            spawn_request(request, &client, &tx);
        }
    }

    loop {
        app.cache_entries = client.cached_entries();
        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };

        process_event(&mut app, first, &client, &tx);
        while let Ok(pending) = rx.try_recv() {
            process_event(&mut app, pending, &client, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    Ok(())
}

fn process_event(
    app: &mut App,
    event: AppEvent,
    client: &GitHubClient,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    if let Some(request) = app.handle_event(event) {
        spawn_request(request, client, tx);
    }
}

fn spawn_request(request: Request, client: &GitHubClient, tx: &mpsc::UnboundedSender<AppEvent>) {
    let tx = tx.clone();
    let client = client.clone();
    tokio::spawn(async move {
        let _ = tx.send(request.run(&client).await);
    });
}
