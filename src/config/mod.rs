mod credentials;

pub use credentials::CredentialStore;

use anyhow::Result;
use ::config::{Config, Environment, File, FileFormat};
use dirs::home_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings: built-in defaults, then the settings file, then
/// `HOTEL_DESK_*` environment variables. Command-line flags are applied on
/// top by the binary.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub password: Option<String>,
    pub log_filter: String,
    pub connect_timeout_secs: u64,
    pub echo_statements: bool,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_file_path);
        Self::load_with_env(&path, Environment::with_prefix("HOTEL_DESK"))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Settings> {
        let settings = Config::builder()
            .set_default("host", "localhost")?
            .set_default("log_filter", "warn")?
            .set_default("connect_timeout_secs", 10_i64)?
            .set_default("echo_statements", true)?
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Json).required(false))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn config_dir() -> PathBuf {
        let mut dir = home_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push(".hotel-desk");
        dir
    }

    fn default_file_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }
}
