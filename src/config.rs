use crate::Error;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.pugetsound.onebusaway.org/api/where";
pub const BASE_URL_VAR: &str = "OBA_BASE_URL";
pub const API_KEY_VAR: &str = "OBA_API_KEY";

/// Where and how to reach a OneBusAway server
///
/// The json form is `{"baseUrl": "...", "apiKey": "..."}`, both fields being optional.
#[derive(Derivative, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[derivative(Default, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[derivative(Default(value = "DEFAULT_BASE_URL.to_owned()"))]
    pub base_url: String,
    #[derivative(Debug = "ignore")]
    pub api_key: String,
}

impl Config {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Config {
            base_url: base_url.to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    /// Reads the configuration from a json file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let content = std::fs::read(path).map_err(|source| Error::NamedFileIO {
            file_name: file_name.clone(),
            source,
        })?;
        let config: Config = serde_json::from_slice(&content)
            .map_err(|e| Error::Config(format!("{}: {}", file_name, e)))?;
        log::debug!("configuration read from {}", file_name);
        Ok(config)
    }

    /// Default configuration with the `OBA_BASE_URL` and `OBA_API_KEY` variables applied
    pub fn from_env() -> Self {
        Config::default().with_env_overrides()
    }

    /// Replaces the fields whose environment variable is set and not blank
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        if let Some(base_url) = value(BASE_URL_VAR) {
            log::debug!("{} loaded from environment", BASE_URL_VAR);
            self.base_url = base_url;
        }
        if let Some(api_key) = value(API_KEY_VAR) {
            log::debug!("{} loaded from environment", API_KEY_VAR);
            self.api_key = api_key;
        }
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("the base url is empty".to_owned()));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "no api key, set apiKey in the configuration file or {}",
                API_KEY_VAR
            )));
        }
        Ok(())
    }
}
