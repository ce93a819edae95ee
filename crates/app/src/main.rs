use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use directories::ProjectDirs;
use drill_core::model::PackCatalog;
use services::speech::{DEFAULT_LANGUAGE_PREFIX, DEFAULT_RATE};
use services::{
    AppServices, Clock, PreferencesService, QuizService, QuizSettings, SpeechConfig,
};
use storage::pack_file::PackFileRepository;
use storage::repository::Storage;
use ui::{App, UiApp, WebSpeech, build_app_context};

const DB_FILE_NAME: &str = "drill.sqlite3";

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    NoDataDir,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw:?}"),
            ArgsError::NoDataDir => write!(
                f,
                "no data directory for this platform; pass --db or set DRILL_DB_URL"
            ),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Vocabulary drill: flashcards, multiple choice, listening and typing.
#[derive(Debug, Parser)]
#[command(name = "drill", version)]
struct Args {
    /// SQLite URL for saved preferences; `sqlite::memory:` keeps nothing.
    #[arg(long = "db", env = "DRILL_DB_URL")]
    db_url: Option<String>,

    /// JSON pack file used instead of the built-in packs.
    #[arg(long, env = "DRILL_PACKS")]
    packs: Option<PathBuf>,

    /// Language prefix used to pick a speech voice, e.g. `de` or `pl`.
    #[arg(long, env = "DRILL_SPEECH_LANG", default_value = DEFAULT_LANGUAGE_PREFIX)]
    speech_lang: String,

    /// Fixed shuffle seed.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn resolved_db_url(&self) -> Result<String, ArgsError> {
        match self.db_url.as_deref() {
            Some(raw) if raw.trim().is_empty() => Err(ArgsError::InvalidDbUrl {
                raw: raw.to_string(),
            }),
            Some(raw) => Ok(normalize_sqlite_url(raw.to_string())),
            None => default_db_url(),
        }
    }
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<PackCatalog> {
        self.services.catalog()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn preferences(&self) -> Arc<PreferencesService> {
        self.services.preferences()
    }
}

fn default_db_url() -> Result<String, ArgsError> {
    let dirs = ProjectDirs::from("org", "drill", "drill").ok_or(ArgsError::NoDataDir)?;
    Ok(format!(
        "sqlite://{}",
        dirs.data_dir().join(DB_FILE_NAME).display()
    ))
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
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
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

    let path = Path::new(path);
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
    pretty_env_logger::init();
    let args = Args::parse();

    let db_url = args.resolved_db_url()?;
    prepare_sqlite_file(&db_url)?;
    let mut storage = Storage::sqlite(&db_url).await?;
    log::info!("preferences stored at {db_url}");

    if let Some(path) = args.packs.as_deref() {
        storage = storage.with_packs(Arc::new(PackFileRepository::open(path)?));
    }

    let settings = QuizSettings {
        seed: args.seed,
        speech: SpeechConfig::new(args.speech_lang, DEFAULT_RATE),
    };
    let services =
        AppServices::from_storage(&storage, Clock::system(), Arc::new(WebSpeech), settings)
            .await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // tao may default to always-on-top in some macOS dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Drill")
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
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
