use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::ConfigError;
use crate::core::settling::{SimulationConfig, TrajectoryModel};

pub const CONFIG_FILE: &str = "viscous_fall.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub frame_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            fps: 5,
            width: 400,
            height: 960,
        }
    }
}

impl ExportConfig {
    pub fn frame_delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }
}

/// Where the file layer of the configuration came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Missing,
    /// The file exists but could not be read (permissions, a directory, ...).
    Unreadable,
    Invalid,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub playback: PlaybackConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Reads `viscous_fall.toml` from the working directory if present, then
    /// applies `VISCOUS_FALL_*` environment overrides and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let (mut config, _) = Self::from_file_or_default(Path::new(CONFIG_FILE));
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file_or_default(path: &Path) -> (Self, ConfigSource) {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content, path) {
                Ok(cfg) => {
                    log::info!("Loaded configuration from {}", path.display());
                    (cfg, ConfigSource::File)
                }
                Err(e) => {
                    log::warn!("{e}, using defaults");
                    (Self::default(), ConfigSource::Invalid)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No {} found, using defaults", path.display());
                (Self::default(), ConfigSource::Missing)
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}, using defaults", path.display());
                (Self::default(), ConfigSource::Unreadable)
            }
        }
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// `lookup` abstracts the environment so overrides can be tested without
    /// touching process state.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("VISCOUS_FALL_MODEL").filter(|v| !v.is_empty()) {
            self.simulation.model = match value.as_str() {
                "recurrence" => TrajectoryModel::Recurrence,
                "closed_form" => TrajectoryModel::ClosedForm,
                _ => {
                    return Err(ConfigError::Override {
                        key: "VISCOUS_FALL_MODEL",
                        value,
                    });
                }
            };
        }
        if let Some(value) = lookup("VISCOUS_FALL_TIME_STEP").filter(|v| !v.is_empty()) {
            self.simulation.time_step_s = parse_override("VISCOUS_FALL_TIME_STEP", value)?;
        }
        if let Some(value) = lookup("VISCOUS_FALL_TIME_HORIZON").filter(|v| !v.is_empty()) {
            self.simulation.time_horizon_s = parse_override("VISCOUS_FALL_TIME_HORIZON", value)?;
        }
        if let Some(value) = lookup("VISCOUS_FALL_FRAME_INTERVAL_MS").filter(|v| !v.is_empty()) {
            self.playback.frame_interval_ms =
                parse_override("VISCOUS_FALL_FRAME_INTERVAL_MS", value)?;
        }
        if let Some(value) = lookup("VISCOUS_FALL_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.export.output_dir = PathBuf::from(value);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        let positive = [
            ("simulation.tube_height_m", sim.tube_height_m),
            ("simulation.time_horizon_s", sim.time_horizon_s),
            ("simulation.time_step_s", sim.time_step_s),
            ("simulation.gravity_mps2", sim.gravity_mps2),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive(key));
            }
        }
        if self.playback.frame_interval_ms == 0 {
            return Err(ConfigError::NonPositive("playback.frame_interval_ms"));
        }
        if self.export.fps == 0 {
            return Err(ConfigError::NonPositive("export.fps"));
        }
        if self.export.width == 0 || self.export.height == 0 {
            return Err(ConfigError::NonPositive("export.width/height"));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Override { key, value })
}
