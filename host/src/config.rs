use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_engine::GameConfig;

const CONFIG_FILE_NAME: &str = "snake_host_config.yaml";

pub fn get_config_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: PathBuf,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig {
    pub enabled: bool,
    pub restart_on_game_over: bool,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            restart_on_game_over: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub draw_board: bool,
    #[serde(default)]
    pub autopilot: AutopilotConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_host_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let config = Config {
            draw_board: true,
            autopilot: AutopilotConfig {
                enabled: true,
                restart_on_game_over: false,
            },
            ..Config::default()
        };
        let file_path = get_temp_file_path();

        let manager = get_config_manager(file_path.clone());
        assert!(manager.set_config(&config).is_ok());

        let provider = FileContentConfigProvider::new(file_path.clone());
        let content = provider.get_config_content().unwrap().unwrap();
        assert!(content.contains("draw_board: true"));

        let reloaded = get_config_manager(file_path.clone()).get_config().unwrap();
        assert_eq!(reloaded, config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_empty_sections_fall_back_to_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: Config = serializer.deserialize("draw_board: true\n").unwrap();
        assert!(config.draw_board);
        assert_eq!(config.game, GameConfig::default());
        assert!(!config.autopilot.enabled);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom.yaml");
        assert_eq!(get_config_path(Some(path.clone())), path);
        assert!(get_config_path(None).ends_with(CONFIG_FILE_NAME));
    }
}
