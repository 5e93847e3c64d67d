use serde::Deserialize;
use std::path::PathBuf;

use crate::models::ChallengeMethod;
use crate::verifier;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Verifier length used when the CLI is not given --length.
    /// Must stay within the RFC 7636 range [43, 128].
    #[serde(default = "default_verifier_length")]
    pub verifier_length: usize,

    /// Challenge method used when the CLI is not given --method:
    /// "plain" or "S256".
    #[serde(default = "default_challenge_method")]
    pub challenge_method: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_verifier_length() -> usize { 128 }
fn default_challenge_method() -> String { "S256".into() }
fn default_log_dir() -> PathBuf { "/var/log/pkce-gen".into() }

impl Default for Config {
    fn default() -> Self {
        Self {
            verifier_length: default_verifier_length(),
            challenge_method: default_challenge_method(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Check config values against the core validators so a bad file fails
    /// at startup instead of on first use.
    pub fn validate(&self) -> anyhow::Result<()> {
        verifier::validate_length(self.verifier_length)?;
        self.challenge_method.parse::<ChallengeMethod>()?;
        Ok(())
    }
}
