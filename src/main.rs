//! reelscout - browse TMDB movie lists from the terminal
//!
//! Lists popular, trending and top-rated movies, searches the catalog and
//! shows details for a single movie. Configuration comes from the environment
//! (see `Config::from_env`); logs go to stderr and are filtered by `RUST_LOG`.

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelscout::cli::{Cli, Request};
use reelscout::data::ImageSize;
use reelscout::{ui, App, Config, TmdbClient};

/// Installs the stderr log subscriber
///
/// Defaults to warnings only so command output on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelscout=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs one request and returns what should be printed
async fn run(request: Request, app: &App) -> Result<String, Box<dyn std::error::Error>> {
    let client = app.client();
    let output = match request {
        Request::Home => ui::render_home(&app.load_home().await),
        Request::List { list, page, window } => {
            let response = app.load_list(list, page, window).await?;
            ui::render_movie_list(list.title(), &response)
        }
        Request::Search { query, page } => {
            let response = client.search_movies(&query, page).await?;
            ui::render_movie_list(&format!("Search: {}", query), &response)
        }
        Request::Details { id } => {
            let view = app.load_movie(id).await?;
            let poster = client.image_url(view.details.poster_path.as_deref(), ImageSize::W500);
            ui::render_movie_detail(&view, &poster)
        }
        Request::Similar { id, page } => {
            let response = client.similar_movies(id, page).await?;
            ui::render_movie_list(&format!("Similar to #{}", id), &response)
        }
        Request::Recommended { id, page } => {
            let response = client.recommended_movies(id, page).await?;
            ui::render_movie_list(&format!("Recommended for #{}", id), &response)
        }
        Request::Image { path, size } => format!("{}\n", client.image_url(path.as_deref(), size)),
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let request = match Request::from_cli(&cli) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    debug!("Configuration loaded: {}", config.summary());

    let app = App::new(TmdbClient::new(config));
    info!(?request, "running");

    match run(request, &app).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
