//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/category-selector/config.toml` (XDG) or platform config dir
//! 2. Project config: `.category-selector.toml`
//! 3. Environment variables: `CATSEL_*`
//!
//! ```toml
//! [taxonomy]
//! path = "taxonomy.toml"
//!
//! [selector]
//! context = "default"
//! ```
//!
//! `selector.context` picks the context whose root category is listed when
//! the CLI is not given `--context`. Without it, roots of every context are
//! listed.

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".category-selector.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CATSEL_";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
}

/// Where the taxonomy document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Path to a TOML or JSON taxonomy document.
    #[serde(default = "default_taxonomy_path")]
    pub path: PathBuf,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            path: default_taxonomy_path(),
        }
    }
}

fn default_taxonomy_path() -> PathBuf {
    PathBuf::from("taxonomy.toml")
}

/// Choice list defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Default context id. `None` lists roots of every context.
    #[serde(default)]
    pub context: Option<String>,
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered figment, exposed so callers can merge extra providers.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(PROJECT_CONFIG_FILE))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
    }

    /// User config path: ~/.config/category-selector/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("category-selector")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("category-selector").join("config.toml"))
            .unwrap_or_default()
    }
}
