use serde::Deserialize;

use crate::error::Error;
use crate::report::StatsGroup;

/// Optional YAML run configuration.
///
/// ```yaml
/// stats:
///   - file: stats.txt
///     flags: [loc, jumps]
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub stats: Vec<StatsGroup>,
}

impl Config {
    pub fn load(path: &str) -> Result<Config, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigRead(path.to_string(), e))?;
        Config::from_yaml(path, &text)
    }

    pub fn from_yaml(path: &str, text: &str) -> Result<Config, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::Config(path.to_string(), e))
    }
}
