use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    // Directory holding the dictionary and country table files
    pub dir: PathBuf,
    // Primary dictionary per target-language track
    pub en_dict: String,
    pub kr_dict: String,
    // Country tables are named "{country_prefix}{Country}.json"
    pub country_prefix: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub language: String,
    // Whether to use terminal alternate screen in watch mode
    pub alt_screen: bool,
    pub max_suggestions: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Database"),
            en_dict: "CsOne_main.json".to_string(),
            kr_dict: "CsSK_main.json".to_string(),
            country_prefix: "Cs".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            alt_screen: false,
            max_suggestions: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_path();

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path();
        let config_dir = config_path.parent().unwrap();

        fs::create_dir_all(config_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    fn get_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nt")
            .join("config.toml")
    }

    pub fn get_effective_language(&self) -> String {
        if self.display.language == "auto" {
            // Try to get system language
            std::env::var("LANG")
                .unwrap_or_else(|_| "en_US".to_string())
                .split('.')
                .next()
                .unwrap_or("en")
                .to_string()
        } else {
            self.display.language.clone()
        }
    }

    /// Database directory, with the NT_DATA_DIR env override applied.
    pub fn effective_data_dir(&self) -> PathBuf {
        std::env::var("NT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.database.dir.clone())
    }

    /// Alternate-screen setting, with the NT_ALT_SCREEN env override applied.
    pub fn effective_alt_screen(&self) -> bool {
        std::env::var("NT_ALT_SCREEN")
            .ok()
            .map(|v| {
                let v = v.to_lowercase();
                !(v == "0" || v == "false")
            })
            .unwrap_or(self.display.alt_screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_database_conventions() {
        let config = Config::default();
        assert_eq!(config.database.dir, PathBuf::from("Database"));
        assert_eq!(config.database.en_dict, "CsOne_main.json");
        assert_eq!(config.database.kr_dict, "CsSK_main.json");
        assert_eq!(config.database.country_prefix, "Cs");
        assert_eq!(config.display.max_suggestions, 5);
        assert!(!config.display.alt_screen);
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let config: Config = toml::from_str("[display]\nlanguage = \"zh\"\n").unwrap();
        assert_eq!(config.display.language, "zh");
        assert_eq!(config.database.country_prefix, "Cs");
    }

    // The env var is owned by this test alone; sibling tests leave it untouched
    #[test]
    fn data_dir_env_override_takes_precedence() {
        let mut config = Config::default();
        config.database.dir = PathBuf::from("/from/config");

        std::env::remove_var("NT_DATA_DIR");
        assert_eq!(config.effective_data_dir(), PathBuf::from("/from/config"));

        std::env::set_var("NT_DATA_DIR", "/from/env");
        assert_eq!(config.effective_data_dir(), PathBuf::from("/from/env"));

        std::env::remove_var("NT_DATA_DIR");
        assert_eq!(config.effective_data_dir(), PathBuf::from("/from/config"));
    }

    #[test]
    fn alt_screen_env_override_parses_truthiness() {
        let mut config = Config::default();
        config.display.alt_screen = true;

        std::env::remove_var("NT_ALT_SCREEN");
        assert!(config.effective_alt_screen());

        // "0" and "false" (any casing) turn the alternate screen off
        for falsy in ["0", "false", "FALSE"] {
            std::env::set_var("NT_ALT_SCREEN", falsy);
            assert!(!config.effective_alt_screen());
        }

        // Anything else set counts as on, overriding the config value
        config.display.alt_screen = false;
        for truthy in ["1", "true", "yes"] {
            std::env::set_var("NT_ALT_SCREEN", truthy);
            assert!(config.effective_alt_screen());
        }

        std::env::remove_var("NT_ALT_SCREEN");
        assert!(!config.effective_alt_screen());
    }
}
