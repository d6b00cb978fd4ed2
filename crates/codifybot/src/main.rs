use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;

use codifybot::cli::{Cli, Commands};
use codifybot::telegram::handlers::SessionStorage;
use codifybot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use codifycore::core::config;
use codifycore::core::error::AppError;
use codifycore::storage::{catalog, get_connection, initialize_database};
use codifycore::{ContentRepository, CourseStore, EventLog, Router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log the panic instead of losing it in the dispatcher task
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env before any config value is read
    let _ = dotenv();

    let log_file = codifycore::core::init_logger(&config::LOG_DIR)?;
    log::info!("Logging to {}", log_file.display());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot().await,
        Commands::InitDb => init_db(),
        Commands::Courses => list_courses(),
    }
}

fn load_content() -> Result<ContentRepository> {
    let content = ContentRepository::load(config::CONTENT_PATH.as_deref().map(Path::new))
        .context("load course content")?;
    log::info!("Loaded content for {} course(s)", content.len());
    Ok(content)
}

fn init_db() -> Result<()> {
    let db = initialize_database(&config::DATABASE_PATH)?;
    if db.created {
        println!("Created {} with {} course(s)", *config::DATABASE_PATH, db.seeded_courses);
    } else {
        println!("{} already exists, left unchanged", *config::DATABASE_PATH);
    }
    Ok(())
}

fn list_courses() -> Result<()> {
    let db = initialize_database(&config::DATABASE_PATH)?;
    let content = load_content()?;
    let conn = get_connection(&db.pool)?;

    for name in catalog::list_active_courses(&conn)? {
        let status = if content.contains(&name) { "content" } else { "no content" };
        println!("{:<20} {}", name, status);
    }
    Ok(())
}

async fn run_bot() -> Result<()> {
    let token = match config::require_bot_token() {
        Ok(token) => token,
        Err(AppError::ConfigMissing(name)) => {
            log::error!("❌ {} is not set; the bot will not start", name);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let db = initialize_database(&config::DATABASE_PATH)
        .with_context(|| format!("open database {}", *config::DATABASE_PATH))?;
    let content = load_content()?;

    let router = Router::new(
        CourseStore::new(Arc::new(db.pool)),
        Arc::new(content),
        EventLog::new("codify::router"),
    );
    let deps = HandlerDeps::new(Arc::new(router));

    let bot = create_bot(&token)?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    log::info!("✅ Bot started");
    Dispatcher::builder(bot, schema(deps))
        .dependencies(dptree::deps![SessionStorage::new()])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Bot stopped");
    Ok(())
}
