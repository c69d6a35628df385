use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use crate::SongError;

/// How decoded events are printed
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    merge_tracks: bool,
    output_format: OutputFormat,
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".midisong";

    pub const fn merge_tracks(&self) -> bool {
        self.merge_tracks
    }

    pub fn set_merge_tracks(&mut self, merge_tracks: bool) {
        self.merge_tracks = merge_tracks;
    }

    pub const fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, output_format: OutputFormat) {
        self.output_format = output_format;
    }

    fn get_base_path() -> Result<PathBuf, SongError> {
        let home = home_dir()
            .ok_or_else(|| SongError::ConfigError("Could not find home directory".to_string()))?;
        let path = home.join(Self::FOLDER);
        Ok(path)
    }

    pub fn get_path() -> Result<PathBuf, SongError> {
        let base = Self::get_base_path()?;
        Ok(base.join("config.json"))
    }

    /// Defaults if the config does not exist
    pub fn read_config() -> Result<Self, SongError> {
        let config_path = Self::get_path()?;
        Self::read_config_from(&config_path)
    }

    pub fn read_config_from(config_path: &Path) -> Result<Self, SongError> {
        if !config_path.exists() {
            log::debug!("No configuration found at {config_path:?}, using defaults");
            return Ok(Self::default());
        }
        let file = File::open(config_path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader).map_err(|err| {
            SongError::ConfigError(format!("Could not read local configuration {err:}"))
        })?;
        Ok(config)
    }

    pub fn save_config(&self) -> Result<(), SongError> {
        let config_path = Self::get_path()?;
        self.save_config_to(&config_path)
    }

    /// Creates the parent folder if needed
    pub fn save_config_to(&self, config_path: &Path) -> Result<(), SongError> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            SongError::ConfigError(format!("Could not save local configuration {err:}"))
        })?;
        let mut file = File::create(config_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("midisong-config-{}-{name}", std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_missing_config_is_default() {
        let path = temp_config_path("missing");
        let config = Config::read_config_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.merge_tracks());
        assert_eq!(config.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_save_then_read() {
        let path = temp_config_path("save");
        let mut config = Config::default();
        config.set_merge_tracks(true);
        config.set_output_format(OutputFormat::Json);
        config.save_config_to(&path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"output_format\": \"json\""));
        assert_eq!(Config::read_config_from(&path).unwrap(), config);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_partial_config() {
        let path = temp_config_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"merge_tracks": true}"#).unwrap();
        let config = Config::read_config_from(&path).unwrap();
        assert!(config.merge_tracks());
        assert_eq!(config.output_format(), OutputFormat::Text);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_invalid_config() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "merge_tracks = true").unwrap();
        let err = Config::read_config_from(&path).unwrap_err();
        assert!(matches!(err, SongError::ConfigError(_)));
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
