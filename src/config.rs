use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Personal e-book library server with reading progress and uploads.
#[derive(Parser, Debug, Clone)]
#[command(name = "shelf-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "SHELF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve {
        /// Address to bind the server to.
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Library directory holding the book files.
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// JSON file holding reading progress.
        #[arg(short, long)]
        progress_file: Option<PathBuf>,
    },

    /// Create a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Library and progress store locations.
    #[serde(default)]
    pub library: LibraryConfig,

    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(
        std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        8000,
    )
}

/// Library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Root directory of the served books.
    #[serde(default = "default_library_path")]
    pub path: PathBuf,

    /// Reading progress store.
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
            progress_file: default_progress_file(),
        }
    }
}

fn default_library_path() -> PathBuf {
    PathBuf::from("books")
}

fn default_progress_file() -> PathBuf {
    PathBuf::from("progress.json")
}

/// Upload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted request body, in megabytes.
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_mb: default_max_size_mb(),
        }
    }
}

fn default_max_size_mb() -> usize {
    512
}

impl UploadConfig {
    /// Body limit in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("shelf-rs.toml"),
            dirs::config_dir()
                .map(|p| p.join("shelf-rs").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/shelf-rs/config.toml"),
        ];

        candidates
            .into_iter()
            .find(|p| !p.as_os_str().is_empty() && p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# shelf-rs configuration

[server]
bind = "0.0.0.0:8000"

[library]
# Directory served over HTTP and receiving uploads
path = "books"
# Reading progress store (JSON array of {file, progress})
progress_file = "progress.json"

[upload]
# Largest accepted upload, in megabytes
max_size_mb = 512
"#
        .to_string()
    }
}

/// Book formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookFormat {
    /// EPUB format (Electronic Publication).
    Epub,
    /// MOBI format (Mobipocket eBook).
    Mobi,
    /// AZW3 format (Kindle Format 8).
    Azw3,
    /// FB2 format (FictionBook).
    Fb2,
    /// CBZ format (Comic Book ZIP archive).
    Cbz,
}

impl BookFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            BookFormat::Epub => "application/epub+zip",
            BookFormat::Mobi => "application/x-mobipocket-ebook",
            BookFormat::Azw3 => "application/vnd.amazon.mobi8-ebook",
            BookFormat::Fb2 => "application/x-fictionbook+xml",
            BookFormat::Cbz => "application/vnd.comicbook+zip",
        }
    }

    /// Try to detect format from file extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "epub" => Some(BookFormat::Epub),
            "mobi" => Some(BookFormat::Mobi),
            "azw3" => Some(BookFormat::Azw3),
            "fb2" => Some(BookFormat::Fb2),
            "cbz" => Some(BookFormat::Cbz),
            _ => None,
        }
    }

    /// Canonical lowercase extension.
    pub fn extension(&self) -> &'static str {
        match self {
            BookFormat::Epub => "epub",
            BookFormat::Mobi => "mobi",
            BookFormat::Azw3 => "azw3",
            BookFormat::Fb2 => "fb2",
            BookFormat::Cbz => "cbz",
        }
    }
}
