use std::fmt;
use std::sync::{Arc, Mutex};

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::EnvFilter;

use flashmaster_core::model::{CardRecord, Catalog};
use services::StudySession;
use storage::repository::Storage;
use ui::{App, UiApp, build_app_context};

/// Default deck compiled into the binary; `--cards` overrides it.
const DEFAULT_CARDS_JSON: &str = include_str!("../assets/cards.json");

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    session: Mutex<Option<StudySession>>,
}

impl UiApp for DesktopApp {
    fn take_session(&self) -> Option<StudySession> {
        self.session.lock().ok().and_then(|mut guard| guard.take())
    }
}

struct Args {
    db_url: String,
    cards_path: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--cards <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://flashmaster.sqlite3");
    eprintln!("  --cards built-in sample deck");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASHMASTER_DB_URL, FLASHMASTER_CARDS, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("FLASHMASTER_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://flashmaster.sqlite3".into(), normalize_sqlite_url);
        let mut cards_path = std::env::var("FLASHMASTER_CARDS").ok();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--cards" => {
                    cards_path = Some(require_value(args, "--cards")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, cards_path })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn load_catalog(cards_path: Option<&str>) -> Result<Catalog, Box<dyn std::error::Error>> {
    let raw = match cards_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_CARDS_JSON.to_owned(),
    };

    let records: Vec<CardRecord> = serde_json::from_str(&raw)?;
    Ok(Catalog::from_records(records)?)
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = load_catalog(parsed.cards_path.as_deref())?;
    if catalog.is_empty() {
        tracing::warn!("card data set is empty; the UI will show the no-data state");
    }

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let session = StudySession::start(catalog, Arc::clone(&storage.mastery)).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        session: Mutex::new(Some(session)),
    });
    let context = build_app_context(&app);

    // Explicitly disable always-on-top so the app doesn't behave like a
    // modal window in dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("FlashMaster")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
