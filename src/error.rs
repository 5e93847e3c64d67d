use thiserror::Error;

/// Errors returned by the verifier generator and the challenge deriver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PkceError {
    #[error("invalid code verifier length {0}: must be between 43 and 128 characters")]
    InvalidLength(usize),

    #[error("code verifier contains characters outside the unreserved set [A-Za-z0-9-._~]")]
    InvalidCharacters,

    #[error("unsupported code challenge method '{0}': expected \"plain\" or \"S256\"")]
    UnsupportedMethod(String),
}
