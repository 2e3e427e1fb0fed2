use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::path;

pub const DEFAULT_ENV_VAR: &str = "JWT_TOKEN";

const SNIPPET_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum Error {
    #[error("sanitizing token file path: {0}")]
    PathUnsafe(#[from] path::Error),
    #[error("reading token file {path:?}: {source}")]
    FileUnreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("token file {0:?} is empty")]
    FileEmpty(String),
    #[error("environment variable {0:?} is not set")]
    EnvUnset(String),
    #[error("unknown token type: {0}")]
    UnknownSourceKind(String),
    #[error("JWT token size exceeds {0}MB limit")]
    TooLarge(u64),
    #[error("invalid JWT token format; expected 2 dots")]
    WrongShape,
}

/// Where the raw token text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Literal(String),
    File(String),
    /// Name of the variable; `None` means [`DEFAULT_ENV_VAR`].
    Environment(Option<String>),
}

impl TokenSource {
    /// Builds a source from a config file's `tokenType` / `jwtToken` pair.
    pub fn from_kind(kind: &str, value: String) -> Result<Self, Error> {
        match kind {
            "string" => Ok(TokenSource::Literal(value)),
            "file" => Ok(TokenSource::File(value)),
            "environment" => Ok(TokenSource::Environment(
                Some(value).filter(|v| !v.is_empty()),
            )),
            other => Err(Error::UnknownSourceKind(other.to_string())),
        }
    }

    pub fn acquire(&self) -> Result<String, Error> {
        match self {
            TokenSource::Literal(token) => Ok(token.clone()),
            TokenSource::File(file) => {
                let file = path::sanitize(file)?;
                debug!(path = %file, "reading token file");
                let content =
                    std::fs::read_to_string(&file).map_err(|source| Error::FileUnreadable {
                        path: file.clone(),
                        source,
                    })?;
                let token = content.trim();
                if token.is_empty() {
                    return Err(Error::FileEmpty(file));
                }
                Ok(token.to_string())
            }
            TokenSource::Environment(var) => {
                let var = var.as_deref().unwrap_or(DEFAULT_ENV_VAR);
                debug!(var, "reading token from environment");
                match std::env::var(var) {
                    Ok(token) if !token.is_empty() => Ok(token),
                    _ => Err(Error::EnvUnset(var.to_string())),
                }
            }
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Literal(_) => write!(f, "String"),
            TokenSource::File(file) => write!(f, "File ({file})"),
            TokenSource::Environment(var) => write!(
                f,
                "Environment ({})",
                var.as_deref().unwrap_or(DEFAULT_ENV_VAR)
            ),
        }
    }
}

/// Enforces the input ceiling and the compact `header.payload.signature` shape.
pub fn validate(token: &str, max_bytes: usize, max_mb: u64) -> Result<(), Error> {
    if token.len() > max_bytes {
        return Err(Error::TooLarge(max_mb));
    }
    if token.matches('.').count() != 2 {
        return Err(Error::WrongShape);
    }
    Ok(())
}

/// Shortens a token to `first10...last10` for status output.
pub fn snippet(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= SNIPPET_LEN * 2 + 3 {
        return token.to_string();
    }

    let head: String = chars[..SNIPPET_LEN].iter().collect();
    let tail: String = chars[chars.len() - SNIPPET_LEN..].iter().collect();
    format!("{head}...{tail}")
}
