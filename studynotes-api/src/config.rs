use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "STUDYNOTES";
pub const API_KEY_ENV: &str = "TOGETHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Per-profile overrides keyed by profile id
    #[serde(default)]
    pub tools: HashMap<String, ProfileOverride>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files; stdout only when unset
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProfileOverride {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub max_input_chars: Option<usize>,
    pub prompt_template: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            llm: LlmConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 300,
                api_key: None,
            },
            logging: LoggingConfig::default(),
            tools: HashMap::new(),
        }
    }
}

const DEFAULT_CONFIG_FILE: &str = r#"
[server]
host = "127.0.0.1"
port = 8080
max_upload_bytes = 26214400

[llm]
base_url = "https://api.together.xyz"
timeout_secs = 300
# api_key = "your-together-key"  # or set TOGETHER_API_KEY

[logging]
# directory = "~/.local/share/studynotes/logs"

# [tools.summarizer]
# model = "mistralai/Mistral-7B-Instruct-v0.1"
# max_tokens = 5000
# temperature = 0.7
# max_input_chars = 12000

# [tools.study-notes]
# model = "meta-llama/Llama-2-13b-chat-hf"
# max_tokens = 1000
# temperature = 0.3
"#;

impl ApiConfig {
    /// Load from `path`, or from the per-user config file, creating it with
    /// commented defaults when missing.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let config_path = get_config_path();
                ensure_default_file(&config_path)?;
                config_path
            }
        };

        let config = Self::from_file(&config_path)?;
        Ok((config, config_path))
    }

    /// Defaults, then the TOML file at `path`, then `STUDYNOTES__*` variables
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.max_upload_bytes", defaults.server.max_upload_bytes as i64)?
            .set_default("llm.base_url", defaults.llm.base_url)?
            .set_default("llm.timeout_secs", defaults.llm.timeout_secs as i64)?
            .add_source(File::from(path.to_path_buf()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;

        if let Some(directory) = &config.logging.directory {
            config.logging.directory = Some(expand_tilde(directory));
        }

        Ok(config)
    }

    /// Check every value that would otherwise fail late, at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port must be greater than 0".to_string()));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Message(
                "server.max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Message("llm.base_url must not be empty".to_string()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (id, overrides) in &self.tools {
            overrides
                .validate()
                .map_err(|message| ConfigError::Message(format!("tools.{id}: {message}")))?;
        }

        Ok(())
    }

    /// The configured key, falling back to `TOGETHER_API_KEY`
    pub fn api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl ProfileOverride {
    fn validate(&self) -> Result<(), String> {
        if self.max_tokens == Some(0) {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "temperature must be between 0.0 and 2.0, got {temperature}"
                ));
            }
        }
        if self.max_input_chars == Some(0) {
            return Err("max_input_chars must be greater than 0".to_string());
        }
        if let Some(template) = &self.prompt_template {
            if !template.contains(crate::profiles::TEXT_PLACEHOLDER) {
                return Err(format!(
                    "prompt_template must contain the {} placeholder",
                    crate::profiles::TEXT_PLACEHOLDER
                ));
            }
        }
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err("model must not be empty".to_string());
            }
        }
        Ok(())
    }
}

fn ensure_default_file(config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    if !config_path.exists() {
        std::fs::write(config_path, DEFAULT_CONFIG_FILE).map_err(|e| {
            ConfigError::Message(format!("Failed to write default config: {e}"))
        })?;
    }

    Ok(())
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("studynotes/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = home::home_dir() {
            let path_str = path.to_string_lossy();
            let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
            return PathBuf::from(expanded);
        }
    }
    path.to_path_buf()
}
