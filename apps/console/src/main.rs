use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{FileHandle, FormRuntime, PredictClient, RenderTiming, UiEvent};
use storage::Storage;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, normalize_database_url};
use render::render;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Parser, Debug)]
#[command(about = "Submit an abstract to the skim service and watch the sections type out")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// SQLite url or path holding the theme preference.
    #[arg(long)]
    db: Option<String>,
    #[arg(long, conflicts_with_all = ["file", "link"])]
    text: Option<String>,
    #[arg(long, conflicts_with = "link")]
    file: Option<PathBuf>,
    #[arg(long)]
    link: Option<String>,
    /// Deliver --file as a drag-and-drop instead of a picker selection.
    #[arg(long, requires = "file")]
    drop: bool,
    #[arg(long)]
    toggle_theme: bool,
    /// Print the final cards without the typing animation.
    #[arg(long)]
    no_animation: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref());
    let server_url = args.server_url.unwrap_or(settings.server_url);
    let database_url = normalize_database_url(&args.db.unwrap_or(settings.preferences_db));

    let store = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open preferences database"
        );
        error
    })?;
    let client = PredictClient::new(&server_url)?;
    let endpoint = client.endpoint().clone();
    let timing = RenderTiming {
        char_interval: Duration::from_millis(settings.char_interval_ms),
        ..RenderTiming::default()
    };

    let mut runtime = FormRuntime::new(store, client, timing, Vec::new());
    runtime.load().await?;
    if args.toggle_theme {
        runtime.dispatch(UiEvent::ThemeToggled).await?;
    }
    info!(
        theme = runtime.state().theme.as_str(),
        endpoint = %endpoint,
        "form ready"
    );

    let input_given = args.text.is_some() || args.file.is_some() || args.link.is_some();
    if !input_given && args.toggle_theme {
        println!("theme is now {}", runtime.state().theme.as_str());
        runtime.store().close().await;
        return Ok(());
    }

    if let Some(text) = args.text {
        runtime.dispatch(UiEvent::TextInput(text)).await?;
    } else if let Some(link) = args.link {
        runtime.dispatch(UiEvent::LinkInput(link)).await?;
    } else if let Some(path) = args.file {
        let file = FileHandle::from_path(path);
        if args.drop {
            runtime.dispatch(UiEvent::DragOver).await?;
            runtime.dispatch(UiEvent::Dropped(vec![file])).await?;
        } else {
            runtime.dispatch(UiEvent::FileSelected(Some(file))).await?;
        }
    }

    if let Err(err) = refuse_on_alerts(runtime.alerts()) {
        runtime.store().close().await;
        return Err(err);
    }

    runtime.dispatch(UiEvent::SubmitRequested).await?;

    if args.no_animation {
        runtime.flush().await?;
    } else {
        runtime
            .play_out(|state| {
                print!("{CLEAR_SCREEN}{}", render(state));
                let _ = io::stdout().flush();
            })
            .await?;
        print!("{CLEAR_SCREEN}");
    }
    print!("{}", render(runtime.state()));
    runtime.store().close().await;
    Ok(())
}

/// Prints any alerts raised while staging the input and refuses to submit.
fn refuse_on_alerts(alerts: &[String]) -> Result<()> {
    if alerts.is_empty() {
        return Ok(());
    }
    for alert in alerts {
        eprintln!("{alert}");
    }
    bail!("submission refused: {}", alerts.join("; "))
}
