use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use facesession_config::{SettingsStore, paths};
use facesession_media::{ContentUri, FileResolver, Materializer, mime};
use facesession_session::SessionClient;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "facesession",
    about = "facesession — Face API liveness session client"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a liveness session and print its auth token.
    Token {
        /// Settings file (default: ~/.config/facesession/settings.json).
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
        /// Reference image to verify against (file:// URI or path).
        #[arg(long, value_name = "URI")]
        verify_image: Option<String>,
    },
    /// Copy a picked image into the cache directory and print its path.
    CacheImage {
        /// Image to copy (file:// URI or path).
        uri: String,
        /// Cache directory (default: ~/.cache/facesession).
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
    /// Show or change the persisted settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the effective settings (the key is masked).
    Show {
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },
    /// Update one or more settings.
    Set {
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
        /// Face API endpoint, e.g. https://<resource>.cognitiveservices.azure.com
        #[arg(long)]
        endpoint: Option<String>,
        /// Face API subscription key.
        #[arg(long)]
        key: Option<String>,
        /// Ask the service to return liveness results to the client.
        #[arg(long, value_name = "BOOL")]
        send_results_to_client: Option<bool>,
        /// Device correlation id sent with every session request.
        #[arg(long, value_name = "ID")]
        device_correlation_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Token {
            settings,
            verify_image,
        } => cmd_token(settings, verify_image).await,
        Commands::CacheImage { uri, cache_dir } => cmd_cache_image(uri, cache_dir).await,
        Commands::Settings { action } => match action {
            SettingsAction::Show { settings } => cmd_settings_show(settings),
            SettingsAction::Set {
                settings,
                endpoint,
                key,
                send_results_to_client,
                device_correlation_id,
            } => cmd_settings_set(
                settings,
                ClientConfigPatch {
                    endpoint,
                    key,
                    send_results_to_client,
                    device_correlation_id,
                },
            ),
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn cmd_token(settings: Option<PathBuf>, verify_image: Option<String>) -> Result<()> {
    let config = open_settings(settings)?
        .load()
        .map_err(|e| anyhow::anyhow!("settings error: {e}"))?;

    let image = match verify_image {
        Some(uri) => {
            let uri = ContentUri::new(uri);
            warn_if_not_accepted(&uri).await;
            let materializer = Materializer::buffer_only(Arc::new(FileResolver));
            Some(materializer.read_to_buffer(&uri).await?)
        }
        None => None,
    };

    let token = SessionClient::default()
        .acquire_token(&config, image.as_deref())
        .await;
    if token.is_empty() {
        bail!("no session token obtained (check endpoint and key with `facesession settings show`)");
    }
    println!("{token}");
    Ok(())
}

async fn cmd_cache_image(uri: String, cache_dir: Option<PathBuf>) -> Result<()> {
    let cache_dir = match cache_dir {
        Some(dir) => dir,
        None => paths::cache_dir()?,
    };
    let uri = ContentUri::new(uri);
    warn_if_not_accepted(&uri).await;
    let path = Materializer::new(Arc::new(FileResolver), cache_dir)
        .copy_to_cache(&uri)
        .await?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_settings_show(settings: Option<PathBuf>) -> Result<()> {
    let store = open_settings(settings)?;
    let mut config = store
        .load()
        .map_err(|e| anyhow::anyhow!("settings error: {e}"))?;
    if !config.api_key.is_empty() {
        config.api_key = "***".to_string();
    }
    println!("# {}", store.path().display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Fields to overwrite in the persisted settings.
struct ClientConfigPatch {
    endpoint: Option<String>,
    key: Option<String>,
    send_results_to_client: Option<bool>,
    device_correlation_id: Option<String>,
}

fn cmd_settings_set(settings: Option<PathBuf>, patch: ClientConfigPatch) -> Result<()> {
    let store = open_settings(settings)?;
    let mut config = store
        .load_persisted()
        .map_err(|e| anyhow::anyhow!("settings error: {e}"))?;
    if let Some(endpoint) = patch.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(key) = patch.key {
        config.api_key = key;
    }
    if let Some(send) = patch.send_results_to_client {
        config.send_results_to_client = send;
    }
    if let Some(id) = patch.device_correlation_id {
        config.device_correlation_id = Some(id);
    }
    store.save(&config)?;
    eprintln!("settings written to {}", store.path().display());
    Ok(())
}

fn open_settings(path: Option<PathBuf>) -> Result<SettingsStore> {
    let path = match path {
        Some(p) => p,
        None => paths::settings_path()?,
    };
    Ok(SettingsStore::new(path))
}

async fn warn_if_not_accepted(uri: &ContentUri) {
    use facesession_media::ContentResolver as _;
    match FileResolver.mime_type(uri).await {
        Some(m) if mime::is_accepted_mime_type(&m) => {}
        Some(m) => tracing::warn!(uri = %uri, mime = %m, "image type is not JPEG or PNG"),
        None => tracing::warn!(uri = %uri, "cannot determine image type"),
    }
}
