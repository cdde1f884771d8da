//! Runtime configuration read from the environment (and `.env`, if present).

use std::env;
use std::path::PathBuf;

use crate::generators::engine::DEFAULT_CIUDAD;

pub const DEFAULT_MOTIVOS_FILE: &str = "motivos.json";
pub const DEFAULT_OUTPUT_DIR: &str = "OficiosGenerados";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON file holding the motivos list.
    pub motivos_file: PathBuf,
    /// Folder where generated notices are written.
    pub output_dir: PathBuf,
    /// City printed on the date line of every notice.
    pub ciudad: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            motivos_file: PathBuf::from(DEFAULT_MOTIVOS_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ciudad: DEFAULT_CIUDAD.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` and read `AVISOS_MOTIVOS_FILE`, `AVISOS_OUTPUT_DIR` and
    /// `AVISOS_CIUDAD`, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            motivos_file: value("AVISOS_MOTIVOS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.motivos_file),
            output_dir: value("AVISOS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            ciudad: value("AVISOS_CIUDAD").unwrap_or(defaults.ciudad),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("OficiosGenerados"));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("AVISOS_MOTIVOS_FILE", "/srv/avisos/motivos.json"),
            ("AVISOS_OUTPUT_DIR", "  "),
            ("AVISOS_CIUDAD", "Monterrey"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.motivos_file, PathBuf::from("/srv/avisos/motivos.json"));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.ciudad, "Monterrey");
    }
}
