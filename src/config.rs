use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::cli::JwtDecodeArgs;
use crate::formatter::{self, EpochUnit, Format};
use crate::path;
use crate::token::{self, TokenSource};

pub const DEFAULT_MAX_TOKEN_SIZE_MB: u64 = 1;
pub const DEFAULT_MAX_OUTPUT_SIZE_MB: u64 = 100;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum Error {
    #[error("if --config is used, it must be the sole argument")]
    ConfigNotSole,
    #[error("failed to read config file {path:?}: {source}")]
    ReadConfig {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    ParseConfig {
        path: String,
        source: serde_json::Error,
    },
    #[error("multiple token sources provided; only one is allowed")]
    MultipleTokenSources,
    #[error("no token source provided")]
    NoTokenSource,
    #[error(transparent)]
    Token(#[from] token::Error),
    #[error(transparent)]
    Format(#[from] formatter::Error),
    #[error("sanitizing {what} path: {source}")]
    Path {
        what: &'static str,
        source: path::Error,
    },
}

/// The JSON config file. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub jwt_token: String,
    pub token_type: String,
    pub output_format: String,
    pub output_file: String,
    pub convert_epoch: bool,
    pub epoch_unit: String,
    pub silent_exec: bool,
    #[serde(rename = "maxTokenSizeMB")]
    pub max_token_size_mb: u64,
    #[serde(rename = "maxOutputSizeMB")]
    pub max_output_size_mb: u64,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, Error> {
        let display = path.display().to_string();
        let data = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| Error::ParseConfig {
            path: display,
            source,
        })
    }
}

/// Fully merged and validated settings for one run.
#[derive(Debug, PartialEq)]
pub struct AppConfig {
    pub token_source: TokenSource,
    pub output_format: Format,
    pub output_file: String,
    pub convert_epoch: bool,
    pub epoch_unit: EpochUnit,
    pub silent: bool,
    pub max_token_size_mb: u64,
    pub max_output_size_mb: u64,
}

impl AppConfig {
    /// Reads the config file named by `--config`, if any, and merges it.
    pub fn load(args: &JwtDecodeArgs) -> Result<Self, Error> {
        let config_file = sanitized("config file", args.config.as_deref())?;

        let file = if config_file.is_empty() {
            FileConfig::default()
        } else {
            if has_other_flags(args) {
                return Err(Error::ConfigNotSole);
            }
            debug!(path = %config_file, "loading config file");
            FileConfig::read(Path::new(&config_file))?
        };

        Self::merge(args, file)
    }

    /// Flags win over the file: booleans are OR-ed, strings take the first
    /// non-empty value and sizes the first non-zero one.
    pub fn merge(args: &JwtDecodeArgs, file: FileConfig) -> Result<Self, Error> {
        let token_source = token_source(args, &file)?;

        let format = first_non_empty(args.output_format.as_deref(), &file.output_format);
        let output_format = if format.is_empty() {
            Format::Json
        } else {
            format.parse()?
        };

        let output_file = sanitized("output file", args.output_file.as_deref())?;
        let output_file = first_non_empty(Some(output_file.as_str()), &file.output_file);
        let output_file = if output_file.is_empty() {
            format!("claims.{}", output_format.extension())
        } else {
            output_file.to_string()
        };
        // the file's value has not been checked yet
        let output_file = sanitized("final output file", Some(&output_file))?;

        let epoch_unit = first_non_empty(args.epoch_unit.as_deref(), &file.epoch_unit);

        Ok(AppConfig {
            token_source,
            output_format,
            output_file,
            convert_epoch: args.convert_epoch || file.convert_epoch,
            epoch_unit: EpochUnit::parse(epoch_unit),
            silent: args.silent || file.silent_exec,
            max_token_size_mb: first_non_zero(
                args.max_token_size,
                file.max_token_size_mb,
                DEFAULT_MAX_TOKEN_SIZE_MB,
            ),
            max_output_size_mb: first_non_zero(
                args.max_output_size,
                file.max_output_size_mb,
                DEFAULT_MAX_OUTPUT_SIZE_MB,
            ),
        })
    }

    pub fn max_token_bytes(&self) -> usize {
        mb_to_bytes(self.max_token_size_mb)
    }

    pub fn max_output_bytes(&self) -> usize {
        mb_to_bytes(self.max_output_size_mb)
    }
}

fn mb_to_bytes(mb: u64) -> usize {
    usize::try_from(mb.saturating_mul(BYTES_PER_MB)).unwrap_or(usize::MAX)
}

fn has_other_flags(args: &JwtDecodeArgs) -> bool {
    args.token_string.is_some()
        || args.token_file.is_some()
        || args.token_env
        || args.output_format.is_some()
        || args.output_file.is_some()
        || args.convert_epoch
        || args.epoch_unit.is_some()
        || args.silent
        || args.max_token_size.is_some()
        || args.max_output_size.is_some()
}

fn token_source(args: &JwtDecodeArgs, file: &FileConfig) -> Result<TokenSource, Error> {
    let mut sources = Vec::new();
    if let Some(token) = args.token_string.as_deref().filter(|t| !t.is_empty()) {
        sources.push(TokenSource::Literal(token.to_string()));
    }
    if let Some(token_file) = args.token_file.as_deref().filter(|f| !f.is_empty()) {
        sources.push(TokenSource::File(sanitized("token file", Some(token_file))?));
    }
    if args.token_env {
        sources.push(TokenSource::Environment(None));
    }

    match sources.len() {
        0 if !file.token_type.is_empty() => {
            Ok(TokenSource::from_kind(&file.token_type, file.jwt_token.clone())?)
        }
        0 => Err(Error::NoTokenSource),
        1 => Ok(sources.remove(0)),
        _ => Err(Error::MultipleTokenSources),
    }
}

fn sanitized(what: &'static str, p: Option<&str>) -> Result<String, Error> {
    path::sanitize(p.unwrap_or_default()).map_err(|source| Error::Path { what, source })
}

fn first_non_empty<'a>(flag: Option<&'a str>, file: &'a str) -> &'a str {
    flag.filter(|v| !v.is_empty()).unwrap_or(file)
}

fn first_non_zero(flag: Option<u64>, file: u64, default: u64) -> u64 {
    [flag.unwrap_or(0), file]
        .into_iter()
        .find(|&v| v != 0)
        .unwrap_or(default)
}
