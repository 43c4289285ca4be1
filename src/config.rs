use std::path::Path;

use homedir::my_home;
use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    search_query::{Conjunction, QueryConverter},
    stop_words::StopWords,
    storage::{BackendLocal, StorageManager},
};

const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Words dropped from every query, matched case-insensitively
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Newline separated stop-word list, relative to the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words_file: Option<String>,

    /// Conjunction placed between adjacent terms
    #[serde(default)]
    pub default_conjunction: Conjunction,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Config {
    /// `$FTSQ_BASE_PATH`, falling back to `~/.config/ftsq`.
    pub fn base_path() -> Result<String, ConfigError> {
        if let Ok(base_path) = std::env::var("FTSQ_BASE_PATH") {
            return Ok(base_path);
        }
        let home = my_home()
            .ok()
            .flatten()
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(format!("{}/.config/ftsq", home.to_string_lossy()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (idx, word) in self.stop_words.iter().enumerate() {
            if word.trim().is_empty() {
                return Err(ConfigError::EmptyStopWord(idx + 1));
            }
        }
        Ok(())
    }

    pub fn load_with(base_path: &str) -> Result<Self, ConfigError> {
        let store = BackendLocal::new(base_path)?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            store.write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())?;
        }

        let config_str = String::from_utf8(store.read(CONFIG_FILE)?)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            log::info!("upgrading {CONFIG_FILE} in {base_path}");
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let store = BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    /// Inline stop words plus the ones from `stop_words_file`.
    pub fn stop_words(&self) -> Result<StopWords, ConfigError> {
        let mut stop_words: StopWords = self.stop_words.iter().collect();

        if let Some(file) = &self.stop_words_file {
            let path = Path::new(&self.base_path).join(file);
            let text = std::fs::read_to_string(&path)?;
            let from_file = StopWords::from_list(&text);
            log::debug!("loaded {} stop words from {}", from_file.len(), path.display());
            stop_words.extend(from_file.iter());
        }

        Ok(stop_words)
    }

    pub fn converter(&self) -> Result<QueryConverter, ConfigError> {
        Ok(QueryConverter::new(self.stop_words()?).with_default_conjunction(self.default_conjunction))
    }
}
