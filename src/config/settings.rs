use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::prompt::Prompt;

/// Environment variable that supplies the API key without touching the config file
pub const API_KEY_ENV: &str = "JIRA_COMMIT_API_KEY";

/// Persisted user configuration.
///
/// Partial records are valid; missing values are collected by [`Config::fill_missing`].
/// Only these fields are ever written back, anything else in the file is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(rename = "jiraApiUrl", default, skip_serializing_if = "Option::is_none")]
    pub jira_api_url: Option<String>,
}

/// Where the API key for this run comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Env,
    Config,
    Missing,
}

/// Configuration complete enough to query the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub jira_api_url: String,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "jira-commit").ok_or(Error::ConfigDir)?;

        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Read the config file. Any read or parse failure counts as "no config".
    pub fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config not readable");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config not parseable");
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Remove the config file. A file that is already gone is not an error.
    pub fn delete(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::ConfigDelete {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn api_key_source(&self, env_key: Option<&str>) -> ApiKeySource {
        if env_key.is_some() {
            ApiKeySource::Env
        } else if non_blank(&self.api_key).is_some() {
            ApiKeySource::Config
        } else {
            ApiKeySource::Missing
        }
    }

    /// Prompt for every value the run needs but the config lacks.
    ///
    /// `env_key` is the already validated value of [`API_KEY_ENV`]; it wins over
    /// the file and is never copied into the returned config. The returned flag
    /// tells whether anything was prompted, i.e. whether the config should be saved.
    pub fn fill_missing(
        self,
        env_key: Option<&str>,
        prompt: &mut impl Prompt,
    ) -> Result<(Self, Settings, bool)> {
        let mut prompted = false;

        let api_key = match (env_key, non_blank(&self.api_key)) {
            (Some(key), _) => key.to_string(),
            (None, Some(key)) => key.to_string(),
            (None, None) => {
                prompted = true;
                ask_required(prompt, "Provide API_KEY : ", "API_KEY")?
            }
        };

        let jira_api_url = match non_blank(&self.jira_api_url) {
            Some(url) => url.to_string(),
            None => {
                prompted = true;
                ask_required(prompt, "Provide API URL : ", "URL")?
            }
        };

        let config = Self {
            api_key: match env_key {
                Some(_) => self.api_key,
                None => Some(api_key.clone()),
            },
            jira_api_url: Some(jira_api_url.clone()),
        };

        let settings = Settings {
            api_key,
            jira_api_url,
        };

        Ok((config, settings, prompted))
    }
}

/// Validate the raw value of [`API_KEY_ENV`]
pub fn env_api_key(raw: Option<String>) -> Result<Option<String>> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(Error::InvalidInput(API_KEY_ENV));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn ask_required(prompt: &mut impl Prompt, message: &str, field: &'static str) -> Result<String> {
    let answer = prompt.ask(message)?;
    if answer.trim().is_empty() {
        return Err(Error::InvalidInput(field));
    }
    Ok(answer.trim().to_string())
}
