use std::fmt;
use std::path::Path;

use serde::Deserialize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};

use crate::session::DEFAULT_MIN_TRAINING_EXAMPLES;

const ENV_PREFIX: &str = "REMARK";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigHeader {
    pub msg: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub min_training_examples: usize,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub header: ConfigHeader,
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load `config.{toml,json,yaml,...}` from the working directory if present.
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(File::with_name("config").required(false))
    }

    /// Load an explicit configuration file, which must exist.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder: ConfigBuilder<DefaultState> = ConfigBuilder::<DefaultState>::default()
            .set_default("header.msg", "remark classifier")?
            .set_default("classifier.min_training_examples", DEFAULT_MIN_TRAINING_EXAMPLES as u64)?
            .set_default("classifier.show_progress", true)?
            .set_default("logging.level", "info")?
            // Defaults first, then the file, then REMARK__SECTION__KEY variables
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        builder.build()?.try_deserialize()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.header.msg)
    }
}
