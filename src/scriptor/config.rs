use crate::error::{Result, ScriptorError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SAVE_DELAY_MS: u64 = 400;
const DEFAULT_DAILY_GOAL: usize = 500;

/// Outline a fresh project starts with.
pub const DEFAULT_SECTIONS: [&str; 7] = [
    "Title Page",
    "Copyright",
    "Dedication",
    "Table of Contents",
    "Foreword",
    "Introduction",
    "Chapter 1",
];

/// Configuration for scriptor, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptorConfig {
    /// Quiet period before a debounced save, in milliseconds
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,

    /// Words per day that count as reaching the goal
    #[serde(default = "default_daily_goal")]
    pub daily_goal: usize,

    /// Prompt library used by `prompt` when no `--library` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_library: Option<PathBuf>,

    /// Section titles for a new or reset project
    #[serde(default = "default_sections")]
    pub default_sections: Vec<String>,
}

fn default_save_delay_ms() -> u64 {
    DEFAULT_SAVE_DELAY_MS
}

fn default_daily_goal() -> usize {
    DEFAULT_DAILY_GOAL
}

fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for ScriptorConfig {
    fn default() -> Self {
        Self {
            save_delay_ms: DEFAULT_SAVE_DELAY_MS,
            daily_goal: DEFAULT_DAILY_GOAL,
            prompt_library: None,
            default_sections: default_sections(),
        }
    }
}

impl ScriptorConfig {
    pub const KEYS: [&'static str; 4] = [
        "save-delay-ms",
        "daily-goal",
        "prompt-library",
        "default-sections",
    ];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ScriptorError::Io)?;
        let config: ScriptorConfig =
            serde_json::from_str(&content).map_err(ScriptorError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ScriptorError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ScriptorError::Serialization)?;
        fs::write(config_path, content).map_err(ScriptorError::Io)?;
        Ok(())
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }

    /// Display value for a config key, or `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "save-delay-ms" => Some(self.save_delay_ms.to_string()),
            "daily-goal" => Some(self.daily_goal.to_string()),
            "prompt-library" => Some(
                self.prompt_library
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "default-sections" => Some(self.default_sections.join(", ")),
            _ => None,
        }
    }

    /// Parse and set a config key. `default-sections` takes a comma separated list.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "save-delay-ms" => {
                self.save_delay_ms = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid delay in milliseconds: {}", value))?;
            }
            "daily-goal" => {
                let goal: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid word goal: {}", value))?;
                if goal == 0 {
                    return Err("Word goal must be at least 1".to_string());
                }
                self.daily_goal = goal;
            }
            "prompt-library" => {
                let value = value.trim();
                self.prompt_library = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "default-sections" => {
                let titles: Vec<String> = value
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if titles.is_empty() {
                    return Err("At least one default section is required".to_string());
                }
                self.default_sections = titles;
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}
