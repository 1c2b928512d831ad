use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::{output::Output, CommandError};
use crate::config::{Config, ConfigManager};
use crate::core::{clock::SystemClock, errors::TrackerError, tracker::Tracker};
use crate::storage::JsonStorage;
use crate::utils::paths;

/// Everything a command handler needs: the tracker, user preferences and output.
pub struct CommandContext {
    pub tracker: Tracker,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub output: Output,
}

impl CommandContext {
    /// Resolves the home directory, loads config and opens the tracker.
    pub fn open(home: Option<PathBuf>, plain: bool) -> Result<Self, CommandError> {
        let home = home.unwrap_or_else(paths::app_home_dir);
        let config_manager = ConfigManager::with_base_dir(&home)?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(config.resolve_data_dir(&home))?;
        let tracker = Tracker::open(Box::new(storage), Box::new(SystemClock))?;
        let output = Output::new(config.color_output && !plain, config.currency_symbol.clone());
        for warning in tracker.load_warnings() {
            output.warning(warning);
        }
        Ok(Self {
            tracker,
            config,
            config_manager,
            output,
        })
    }

    /// Asks before a destructive action unless skipped by flag or config.
    pub fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool, CommandError> {
        if assume_yes || !self.config.confirm_deletes {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    /// Reports a mutation whose persist step failed, then propagates the error.
    pub fn persisted<T>(&self, result: Result<T, TrackerError>) -> Result<T, CommandError> {
        if let Err(err) = &result {
            if err.is_persistence() {
                self.output.warning(
                    "the change is kept for this session but could not be saved; it may be lost on reload",
                );
            }
        }
        result.map_err(CommandError::from)
    }
}
