use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PkceError;

/// Transform used to derive a code challenge from a code verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeMethod {
    #[serde(rename = "plain")]
    Plain,
    S256,
}

impl ChallengeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeMethod::Plain => "plain",
            ChallengeMethod::S256 => "S256",
        }
    }
}

impl Default for ChallengeMethod {
    fn default() -> Self {
        ChallengeMethod::S256
    }
}

impl fmt::Display for ChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeMethod {
    type Err = PkceError;

    // Method names are case-sensitive per RFC 7636; anything other than the
    // two registered values is an error, never a fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(ChallengeMethod::Plain),
            "S256" => Ok(ChallengeMethod::S256),
            other => Err(PkceError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// One generated verifier/challenge pair, as emitted by the CLI JSON mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PkcePair {
    pub code_verifier: String,
    pub code_challenge: String,
    pub code_challenge_method: ChallengeMethod,
}
