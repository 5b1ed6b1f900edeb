use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct EnvConfig {
    /// Queries longer than this (in bytes) are rejected before parsing.
    pub max_query_len: usize,

    /// Whether `*` and `?` are wildcards in search terms by default.
    pub wildcard: bool,

    /// The rule set document used when none is given on the command line.
    pub rules_path: PathBuf,
}

impl EnvConfig {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// The configuration sources: defaults overridden by `QSEARCH_` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("QSEARCH_"))
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            max_query_len: 1024,
            wildcard: false,
            rules_path: PathBuf::from("qsearch-rules.toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults() {
        Jail::expect_with(|_| {
            let config = EnvConfig::load()?;
            assert_eq!(1024, config.max_query_len);
            assert!(!config.wildcard);
            assert_eq!(PathBuf::from("qsearch-rules.toml"), config.rules_path);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("QSEARCH_MAX_QUERY_LEN", "16");
            jail.set_env("QSEARCH_WILDCARD", "true");
            jail.set_env("QSEARCH_RULES_PATH", "/etc/qsearch/rules.toml");

            let config = EnvConfig::load()?;
            assert_eq!(16, config.max_query_len);
            assert!(config.wildcard);
            assert_eq!(PathBuf::from("/etc/qsearch/rules.toml"), config.rules_path);
            Ok(())
        });
    }
}
