//! Configuration file handling for cei-site.
//!
//! Loads configuration from `~/.config/cei-site/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::carousel::{Slide, DEFAULT_INTERVAL};
use crate::registration::{DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Configuration file structure for cei-site.
/// Loaded from ~/.config/cei-site/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct CarouselConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_slides")]
    pub slides: Vec<SlideConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SlideConfig {
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RegistrationConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MenuConfig {
    #[serde(default = "default_links")]
    pub links: Vec<String>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            slides: default_slides(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            links: default_links(),
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Build the carousel slides from the configured entries.
    pub fn build_slides(&self) -> Vec<Slide> {
        self.slides
            .iter()
            .map(|s| match &s.image {
                Some(image) => Slide::with_image(s.title.clone(), image.clone()),
                None => Slide::new(s.title.clone()),
            })
            .collect()
    }
}

impl RegistrationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL.as_millis() as u64
}

fn default_slides() -> Vec<SlideConfig> {
    ["Bienvenidos", "Nuestras instalaciones", "Inscripciones abiertas"]
        .into_iter()
        .enumerate()
        .map(|(i, title)| SlideConfig {
            title: title.to_string(),
            image: Some(format!("img/slide{}.jpg", i + 1)),
        })
        .collect()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_links() -> Vec<String> {
    ["Inicio", "Nosotros", "Servicios", "Contacto"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            config.validate().map_err(|message| ConfigError::Invalid {
                path: path.clone(),
                message,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), String> {
        if self.registration.timeout_secs == 0 {
            return Err("registration.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config file '{}': {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("cei-site").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/cei-site/config.toml")
        })
}

/// Contents written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# cei-site configuration

[carousel]
# Time between automatic slide changes
interval_ms = 5000

[[carousel.slides]]
title = "Bienvenidos"
image = "img/slide1.jpg"

[[carousel.slides]]
title = "Nuestras instalaciones"
image = "img/slide2.jpg"

[[carousel.slides]]
title = "Inscripciones abiertas"
image = "img/slide3.jpg"

[registration]
# Registration service (CEI_API_BASE_URL overrides base_url)
base_url = "http://localhost:5000"
endpoint = "/api/registrar"
timeout_secs = 30

[menu]
links = ["Inicio", "Nosotros", "Servicios", "Contacto"]
"#;
