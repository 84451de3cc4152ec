use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "MISSION_VIZ_CONFIG";

// ---------------------------------------------------------------------------
// Camera settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub damping: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            near: 0.1,
            far: 10_000.0,
            damping: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub api_base_url: String,
    pub trajectory_days: u32,
    pub body_scale: f64,          // scene units per km of diameter
    pub min_body_size: f64,       // scene units
    pub star_count: usize,
    pub star_radius: f64,
    pub surface_fraction: f32,    // share of the viewport given to the 3D view
    pub camera: CameraSettings,
    /// Fixed seed for star and placement randomness. `None` = fresh entropy.
    pub seed: Option<u64>,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".into(),
            trajectory_days: 365,
            body_scale: 0.000_05,
            min_body_size: 0.05,
            star_count: 25_000,
            star_radius: 1000.0,
            surface_fraction: 0.7,
            camera: CameraSettings::default(),
            seed: None,
        }
    }
}

impl VizConfig {
    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_string(),
            source,
        })
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &shown)
    }

    /// Load from the file named by `MISSION_VIZ_CONFIG`, or defaults if unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
