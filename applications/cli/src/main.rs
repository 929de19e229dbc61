//! ParisZik - headless catalog administration and playback
use anyhow::Context;
use clap::{Parser, Subcommand};
use pariszik_cli::{CliConfig, CliError, ConsoleUi, HeadlessEngine, HeadlessSession};
use pariszik_core::{
    ContentId, CreateComment, CreateContent, MediaItem, PlaybackHistoryStore, UpdateContent,
};
use pariszik_playback::format_time;
use pariszik_storage::{comments, contents, LocalStorageContext};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pariszik")]
#[command(about = "ParisZik catalog and playback from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./pariszik.toml if present)
    #[arg(short, long, global = true, env = "PARISZIK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a content item to the catalog
    Add {
        title: String,
        artist: String,
        /// Playable file path or URL
        file_url: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        /// Mark as live stream
        #[arg(long)]
        live: bool,
        #[arg(long)]
        uploaded_by: Option<String>,
    },
    /// Change fields of a content item
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        file_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long)]
        live: Option<bool>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// List every item, newest first
    List,
    /// Most viewed items
    Popular {
        #[arg(short, long, default_value_t = contents::DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Newest items
    Latest {
        #[arg(short, long, default_value_t = contents::DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Live streams
    Live,
    /// Items whose title starts with QUERY
    Search { query: String },
    /// Show one item as JSON
    Show { id: String },
    /// Like an item
    Like { id: String },
    /// Comment on an item
    Comment {
        id: String,
        text: String,
        #[arg(short, long, default_value = "anonymous")]
        author: String,
    },
    /// List comments of an item, newest first
    Comments { id: String },
    /// Toggle the favorite flag of an item
    Favorite { id: String },
    /// Delete an item and its comments
    Delete { id: String },
    /// Show recently played items
    Recent,
    /// Forget recently played items
    ClearRecent,
    /// Play items as a playlist
    Play {
        /// Content ids, in playlist order
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip forward this many times after starting
        #[arg(short, long, default_value_t = 0)]
        skip: usize,
        /// Volume override (0.0-1.0)
        #[arg(long)]
        volume: Option<f32>,
        /// Seek to this fraction of the final item
        #[arg(long)]
        seek: Option<f64>,
        /// Duration the headless engine reports for every item
        #[arg(long)]
        duration_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pariszik=info,pariszik_playback=info,pariszik_storage=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let pool = pariszik_storage::create_pool(&config.storage.database_url)
        .await
        .context("opening database")?;
    pariszik_storage::run_migrations(&pool).await?;
    let storage = LocalStorageContext::new(pool)
        .with_history_capacity(config.playback.history_capacity);

    run(cli.command, &config, storage).await
}

async fn run(command: Commands, config: &CliConfig, storage: LocalStorageContext) -> anyhow::Result<()> {
    let pool = storage.pool().clone();

    match command {
        Commands::Add {
            title,
            artist,
            file_url,
            description,
            thumbnail,
            live,
            uploaded_by,
        } => {
            let mut content = CreateContent::new(title, artist, file_url);
            content.description = description;
            content.thumbnail_url = thumbnail;
            content.is_live = live;
            content.uploaded_by = uploaded_by;

            let item = contents::create(&pool, content).await?;
            println!("{}", item.id);
        }
        Commands::Update {
            id,
            title,
            artist,
            file_url,
            description,
            thumbnail,
            live,
            published,
        } => {
            let changes = UpdateContent {
                title,
                artist,
                description,
                thumbnail_url: thumbnail,
                file_url,
                is_live: live,
                is_published: published,
            };
            let item = contents::update(&pool, &ContentId::new(id), changes).await?;
            print_items(&[item]);
        }
        Commands::List => print_items(&contents::get_all(&pool).await?),
        Commands::Popular { limit } => print_items(&contents::get_popular(&pool, limit).await?),
        Commands::Latest { limit } => print_items(&contents::get_latest(&pool, limit).await?),
        Commands::Live => print_items(&contents::get_live(&pool).await?),
        Commands::Search { query } => print_items(&contents::search(&pool, &query).await?),
        Commands::Show { id } => {
            let item = find_item(&pool, &id).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::Like { id } => {
            let likes = contents::add_like(&pool, &ContentId::new(id)).await?;
            println!("{} likes", likes);
        }
        Commands::Comment { id, text, author } => {
            let comment = comments::add(&pool, &ContentId::new(id), CreateComment { author, text }).await?;
            println!("{}", comment.id);
        }
        Commands::Comments { id } => {
            for comment in comments::list(&pool, &ContentId::new(id)).await? {
                println!(
                    "{}  {}: {}",
                    comment.created_at.format("%Y-%m-%d %H:%M"),
                    comment.author,
                    comment.text
                );
            }
        }
        Commands::Favorite { id } => {
            let is_favorite = contents::toggle_favorite(&pool, &ContentId::new(id)).await?;
            println!("{}", if is_favorite { "favorite" } else { "not favorite" });
        }
        Commands::Delete { id } => {
            contents::delete(&pool, &ContentId::new(id.clone())).await?;
            tracing::info!(%id, "Content deleted");
        }
        Commands::Recent => {
            for entry in storage.recent_plays().await? {
                println!(
                    "{}  {} - {}  ({})",
                    entry.id,
                    entry.title,
                    entry.artist,
                    entry.played_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::ClearRecent => storage.clear().await?,
        Commands::Play {
            ids,
            skip,
            volume,
            seek,
            duration_secs,
        } => {
            let mut items = Vec::with_capacity(ids.len());
            for id in &ids {
                items.push(find_item(&pool, id).await?);
            }

            play(config, storage, items, skip, volume, seek, duration_secs).await?;
        }
    }

    Ok(())
}

async fn play(
    config: &CliConfig,
    storage: LocalStorageContext,
    items: Vec<MediaItem>,
    skip: usize,
    volume: Option<f32>,
    seek: Option<f64>,
    duration_secs: Option<u64>,
) -> anyhow::Result<()> {
    let (engine, signals) = HeadlessEngine::new();
    let engine = match duration_secs {
        Some(secs) => engine.with_nominal_duration(Duration::from_secs(secs)),
        None => engine,
    };

    let storage = Arc::new(storage);
    let mut session = HeadlessSession::new(
        config.playback.clone(),
        engine,
        signals,
        storage.clone(),
        storage,
    );

    if let Some(volume) = volume {
        session.controller_mut().set_volume(volume);
    }

    let mut snapshot = session.play_playlist(items, skip).await?;

    if let Some(fraction) = seek {
        if session.controller_mut().seek_to_fraction(fraction)? {
            session.pump_signals().await;
        } else {
            tracing::warn!("Cannot seek: duration unknown (try --duration-secs)");
        }
        snapshot = session.controller().snapshot();
    }

    {
        let mut ui = ConsoleUi::new(std::io::stdout().lock());
        session.controller_mut().dispatch_events(&mut ui);
    }

    println!(
        "{} at {} (index {})",
        if snapshot.is_playing() { "playing" } else { "stopped" },
        format_time(snapshot.position.as_secs_f64()),
        snapshot.display_index()
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

async fn find_item(pool: &sqlx::SqlitePool, id: &str) -> anyhow::Result<MediaItem> {
    contents::get_by_id(pool, &ContentId::new(id))
        .await?
        .ok_or_else(|| CliError::NotFound(id.to_string()).into())
}

fn print_items(items: &[MediaItem]) {
    for item in items {
        println!(
            "{}  {} - {}  views:{} likes:{} comments:{}{}{}",
            item.id,
            item.title,
            item.artist,
            item.views,
            item.likes,
            item.comments,
            if item.is_live { "  [live]" } else { "" },
            if item.is_favorite { "  ♥" } else { "" },
        );
    }
}
