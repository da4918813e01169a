mod config;

use anyhow::{anyhow, Context, Result};
use catalog::{
    GenreId, InteractionLog, InteractionRecord, InteractionStore, JsonFileStore, LogKind,
    MovieCatalog, MovieId, MovieSummary,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use config::Config;
use server::{EngineConfig, RecommendationEngine, RecommendationTracker};
use sources::{GenreProfile, InteractionContext, SignalWeights};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tmdb_client::TmdbClient;
use tracing::{debug, warn};

/// Moxie - genre-based movie recommendations from your own activity
#[derive(Parser)]
#[command(name = "moxie-recs")]
#[command(about = "Movie recommendations from your viewing history, favorites and watchlist", long_about = None)]
struct Cli {
    /// Directory holding the interaction logs (overrides MOXIE_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations
    Recommend {
        /// Show the genre scores behind the recommendations
        #[arg(long)]
        explain: bool,
    },

    /// Record that you viewed a movie
    View { id: MovieId },

    /// Add or remove a favorite
    Favorite {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Add or remove a watchlist entry
    Watchlist {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Write one log to a JSON file
    Export { slot: Slot, file: PathBuf },

    /// Replace one log with the content of a JSON file
    Import { slot: Slot, file: PathBuf },

    /// Show all three logs and your top genres
    History,

    /// Empty one log
    Clear { slot: Slot },
}

#[derive(Subcommand)]
enum ListAction {
    Add { id: MovieId },
    Remove { id: MovieId },
}

#[derive(Clone, Copy, ValueEnum)]
enum Slot {
    RecentlyViewed,
    Favorites,
    Watchlist,
}

impl From<Slot> for LogKind {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::RecentlyViewed => LogKind::RecentlyViewed,
            Slot::Favorites => LogKind::Favorites,
            Slot::Watchlist => LogKind::Watchlist,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let data_dir = cli.data_dir.unwrap_or_else(|| config.moxie_data_dir.clone());
    debug!(data_dir = %data_dir.display(), "Using interaction store");
    let store = JsonFileStore::new(data_dir);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { explain } => handle_recommend(&store, &config, explain).await?,
        Commands::View { id } => handle_view(&store, &config, id).await?,
        Commands::Favorite { action } => {
            handle_list(&store, &config, LogKind::Favorites, action).await?
        }
        Commands::Watchlist { action } => {
            handle_list(&store, &config, LogKind::Watchlist, action).await?
        }
        Commands::Export { slot, file } => handle_export(&store, slot.into(), file)?,
        Commands::Import { slot, file } => handle_import(&store, slot.into(), file)?,
        Commands::History => handle_history(&store, &config).await?,
        Commands::Clear { slot } => {
            let kind = LogKind::from(slot);
            store
                .clear(kind)
                .with_context(|| format!("Failed to clear {}", kind))?;
            println!("{} Cleared {}", "✓".green(), kind);
        }
    }

    Ok(())
}

fn tmdb_client(config: &Config) -> Result<TmdbClient> {
    let api_key = config
        .tmdb_api_key
        .clone()
        .ok_or_else(|| anyhow!("TMDB_API_KEY is not set"))?;

    let client = TmdbClient::new(api_key).with_base_url(config.tmdb_api_url.as_str());
    match config.fetch_timeout() {
        Some(timeout) => Ok(client.with_timeout(timeout)?),
        None => Ok(client),
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(store: &JsonFileStore, config: &Config, explain: bool) -> Result<()> {
    let snapshot = store
        .load_snapshot()
        .context("Failed to load interaction logs")?;
    let client = Arc::new(tmdb_client(config)?);

    let engine = RecommendationEngine::with_config(
        client.clone(),
        EngineConfig {
            fetch_timeout: config.fetch_timeout(),
            ..EngineConfig::default()
        },
    );
    let tracker = RecommendationTracker::new();
    let context = InteractionContext::from_snapshot(&snapshot);

    let start = Instant::now();
    tracker
        .refresh(&engine, context.recently_viewed, context.favorites, context.watchlist)
        .await;
    let state = tracker.latest();

    if !state.has_enough_signal {
        println!(
            "{} Not enough activity yet: {} of {} interactions recorded",
            "!".yellow(),
            snapshot.total(),
            engine.config().min_interactions
        );
        return Ok(());
    }

    print_recommendations(&state.movies);
    println!("{}", format!("({} in {:.2?})", state.movies.len(), start.elapsed()).dimmed());

    if explain {
        let names = genre_names(&client).await;

        println!();
        print_genre_scores(&state.profile, &names, engine.config().genre_count);
        if state.fallback {
            println!(
                "{}",
                "No genre results were available; showing movies from your own logs".yellow()
            );
        }
    }
    Ok(())
}

/// Handle the 'view' command
async fn handle_view(store: &JsonFileStore, config: &Config, id: MovieId) -> Result<()> {
    let client = tmdb_client(config)?;
    let details = client
        .movie_details(id)
        .await
        .with_context(|| format!("Failed to look up movie {}", id))?;

    let mut log = store.load(LogKind::RecentlyViewed)?;
    if log.add(InteractionRecord::from_details(&details)) {
        store.save(&log)?;
        println!("{} Viewed {} ({})", "✓".green(), details.title.bold(), id);
    } else {
        println!("{} is already your most recent view", details.title);
    }
    Ok(())
}

/// Handle the 'favorite' and 'watchlist' commands
async fn handle_list(
    store: &JsonFileStore,
    config: &Config,
    kind: LogKind,
    action: ListAction,
) -> Result<()> {
    let mut log = store.load(kind)?;

    match action {
        ListAction::Add { id } => {
            if log.contains(id) {
                println!("Movie {} is already in {}", id, kind);
                return Ok(());
            }
            let client = tmdb_client(config)?;
            let details = client
                .movie_details(id)
                .await
                .with_context(|| format!("Failed to look up movie {}", id))?;

            log.add(InteractionRecord::from_details(&details));
            store.save(&log)?;
            println!("{} Added {} to {}", "✓".green(), details.title.bold(), kind);
        }
        ListAction::Remove { id } => {
            if log.remove(id) {
                store.save(&log)?;
                println!("{} Removed {} from {}", "✓".green(), id, kind);
            } else {
                println!("Movie {} is not in {}", id, kind);
            }
        }
    }
    Ok(())
}

/// Handle the 'export' command
fn handle_export(store: &JsonFileStore, kind: LogKind, file: PathBuf) -> Result<()> {
    let log = store.load(kind)?;
    fs::write(&file, log.to_json()?)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    println!(
        "{} Exported {} {} entries to {}",
        "✓".green(),
        log.len(),
        kind,
        file.display()
    );
    Ok(())
}

/// Handle the 'import' command
fn handle_import(store: &JsonFileStore, kind: LogKind, file: PathBuf) -> Result<()> {
    let contents = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut log = InteractionLog::new(kind);
    let count = log
        .import_json(&contents)
        .with_context(|| format!("{} is not a valid {} export", file.display(), kind))?;
    store.save(&log)?;

    println!("{} Imported {} {} entries", "✓".green(), count, kind);
    Ok(())
}

/// Handle the 'history' command
async fn handle_history(store: &JsonFileStore, config: &Config) -> Result<()> {
    let snapshot = store
        .load_snapshot()
        .context("Failed to load interaction logs")?;

    for kind in LogKind::ALL {
        let log = snapshot.log(kind);
        println!("{}", format!("{} ({})", kind, log.len()).bold().blue());
        for record in log.records() {
            let when = record
                .viewed_at
                .map(|at| format!(" viewed {}", at.format("%Y-%m-%d %H:%M")))
                .unwrap_or_default();
            println!("  {} {}{}", format!("{:>7}", record.id).dimmed(), record.title, when);
        }
    }

    // Offline scores: favorites without genre ids are not looked up here
    let context = InteractionContext::from_snapshot(&snapshot);
    let (profile, missing) = GenreProfile::from_known_genres(&context, &SignalWeights::default());
    let names = match tmdb_client(config) {
        Ok(client) => genre_names(&client).await,
        Err(_) => HashMap::new(),
    };

    println!();
    print_genre_scores(&profile, &names, 5);
    if !missing.is_empty() {
        println!(
            "{}",
            format!("{} favorites have no genre ids yet", missing.len()).dimmed()
        );
    }
    Ok(())
}

async fn genre_names(client: &TmdbClient) -> HashMap<GenreId, String> {
    match client.genre_list().await {
        Ok(genres) => genres.into_iter().map(|g| (g.id, g.name)).collect(),
        Err(e) => {
            warn!("Could not load genre names: {}", e);
            HashMap::new()
        }
    }
}

fn print_genre_scores(profile: &GenreProfile, names: &HashMap<GenreId, String>, top: usize) {
    println!("{}", "Top genres:".bold().blue());
    if profile.is_empty() {
        println!("  (no genre signal yet)");
        return;
    }

    for (genre, score) in profile.ranked().into_iter().take(top) {
        let name = names
            .get(&genre)
            .cloned()
            .unwrap_or_else(|| format!("genre {}", genre));
        println!("  {:<20} {:.2}", name, score);
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(movies: &[MovieSummary]) {
    println!("{}", "Movie Recommendations:".bold().blue());
    if movies.is_empty() {
        println!("  (nothing to recommend right now)");
        return;
    }

    for (index, movie) in movies.iter().enumerate() {
        let year = movie
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .unwrap_or("????");
        println!(
            "{}. {} ({}) - popularity {:.1}, rated {:.1}",
            (index + 1).to_string().green(),
            movie.title.bold(),
            year,
            movie.popularity,
            movie.vote_average
        );
    }
}
