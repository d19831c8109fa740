use super::models::AppConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str::<AppConfig>(contents)
}

pub fn serialize_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = parse_config("namespace = \"pergamene\"\n").expect("valid toml");
        assert_eq!(cfg.namespace, "pergamene");
        assert_eq!(cfg.data_dir, ".lectern");
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.color_seed, None);
    }

    #[test]
    fn serialized_config_parses_back() {
        let cfg = AppConfig {
            catalog_path: Some("data/scripture.json".to_string()),
            color_seed: Some(42),
            log_level: LogLevel::Debug,
            ..AppConfig::default()
        };
        let text = serialize_config(&cfg).expect("serialize");
        assert_eq!(parse_config(&text).expect("parse"), cfg);
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("/nonexistent/lectern/config.toml"));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn invalid_level_is_a_parse_error() {
        assert!(parse_config("log_level = \"loud\"\n").is_err());
    }
}
