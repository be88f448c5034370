//! `scriptor config`: inspect and change the running configuration.
//!
//! Changes go to the live [`ScriptorConfig`] first and are written to
//! `config.json` only when they parse. Each accepted change says when it takes
//! effect, since some keys only matter on the next reset or prompt draw.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::ScriptorConfig;
use crate::error::Result;
use crate::prompts::PromptLibrary;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(
    config: &mut ScriptorConfig,
    data_dir: &Path,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ConfigAction::ShowAll => {
            let listing = ScriptorConfig::KEYS
                .iter()
                .map(|key| format!("{} = {}", key, config.get(key).unwrap_or_default()))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(result.with_output(listing))
        }
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => Ok(result.with_output(value)),
            None => {
                result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)));
                Ok(result)
            }
        },
        ConfigAction::Set(key, value) => {
            let mut next = config.clone();
            if let Err(e) = next.set(&key, &value) {
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            if next == *config {
                result.add_message(CmdMessage::info(format!("{} is already {}", key, value)));
                return Ok(result);
            }

            next.save(data_dir)?;
            *config = next;

            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            if let Some(note) = effect_note(config, &key) {
                result.add_message(note);
            }
            Ok(result)
        }
    }
}

fn effect_note(config: &ScriptorConfig, key: &str) -> Option<CmdMessage> {
    match key {
        "save-delay-ms" => Some(CmdMessage::info("Applies from the next edit.")),
        "default-sections" => Some(CmdMessage::info(format!(
            "A reset will start from these {} sections.",
            config.default_sections.len()
        ))),
        "prompt-library" => config
            .prompt_library
            .as_deref()
            .and_then(|path| check_library(path).err())
            .map(CmdMessage::warning),
        _ => None,
    }
}

fn check_library(path: &Path) -> std::result::Result<(), String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Prompt library {} is not readable: {}", path.display(), e))?;
    if PromptLibrary::parse(&raw).is_empty() {
        return Err(format!(
            "Prompt library {} has no `>>> Category` sections",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn set_updates_live_config_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ScriptorConfig::default();

        let set = run(
            &mut config,
            dir.path(),
            ConfigAction::Set("daily-goal".into(), "750".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].level, MessageLevel::Success);
        assert_eq!(config.daily_goal, 750);
        assert_eq!(ScriptorConfig::load(dir.path()).unwrap().daily_goal, 750);

        let shown = run(&mut config, dir.path(), ConfigAction::ShowKey("daily-goal".into())).unwrap();
        assert_eq!(shown.output.as_deref(), Some("750"));
    }

    #[test]
    fn show_all_lists_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ScriptorConfig::default();
        let all = run(&mut config, dir.path(), ConfigAction::ShowAll).unwrap();
        let listing = all.output.unwrap();
        assert!(listing.contains("save-delay-ms = 400"));
        assert!(listing.contains("daily-goal = 500"));
        assert_eq!(listing.lines().count(), ScriptorConfig::KEYS.len());
    }

    #[test]
    fn invalid_value_leaves_live_config_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ScriptorConfig::default();

        let result = run(
            &mut config,
            dir.path(),
            ConfigAction::Set("save-delay-ms".into(), "soon".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(config, ScriptorConfig::default());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unchanged_value_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ScriptorConfig::default();
        let result = run(
            &mut config,
            dir.path(),
            ConfigAction::Set("daily-goal".into(), "500".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn default_sections_note_mentions_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ScriptorConfig::default();
        let result = run(
            &mut config,
            dir.path(),
            ConfigAction::Set("default-sections".into(), "Intro, Body".into()),
        )
        .unwrap();
        assert_eq!(result.messages[1].content, "A reset will start from these 2 sections.");
    }

    #[test]
    fn unusable_prompt_library_is_saved_with_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("prompts.txt");
        fs::write(&library, "no headers here\n").unwrap();
        let mut config = ScriptorConfig::default();

        let result = run(
            &mut config,
            dir.path(),
            ConfigAction::Set("prompt-library".into(), library.display().to_string()),
        )
        .unwrap();
        assert_eq!(config.prompt_library.as_deref(), Some(library.as_path()));
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        assert!(result.messages[1].content.contains("no `>>> Category` sections"));
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ScriptorConfig::default();
        let result = run(&mut config, dir.path(), ConfigAction::ShowKey("font".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }
}
